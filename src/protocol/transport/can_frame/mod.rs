//! In-memory representation of an SAE J1939 / NMEA 2000 CAN frame, with
//! conversions from and to any [`embedded_can::Frame`] so HAL drivers can
//! feed the bridge directly.
use embedded_can::{ExtendedId, Frame, Id};

use crate::core::MAX_CAN_PAYLOAD;
use crate::error::{FrameError, MalformedInput};
use crate::protocol::transport::can_id::CanId;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Raw NMEA 2000 frame as read from the CAN bus.
pub struct CanFrame {
    /// Full 29-bit CAN identifier stored inside a `u32`.
    pub id: CanId,
    /// Payload buffer. Classic CAN frames always provide eight bytes.
    pub data: [u8; MAX_CAN_PAYLOAD],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
}

impl CanFrame {
    /// Build a frame, refusing payloads longer than eight bytes.
    pub fn new(id: CanId, payload: &[u8]) -> Option<Self> {
        if payload.len() > MAX_CAN_PAYLOAD {
            return None;
        }
        let mut data = [0u8; MAX_CAN_PAYLOAD];
        data[..payload.len()].copy_from_slice(payload);
        Some(Self {
            id,
            data,
            len: payload.len(),
        })
    }

    /// Valid payload bytes. Fails when `len` was tampered with beyond 8.
    pub fn payload(&self) -> Result<&[u8], MalformedInput> {
        self.data
            .get(..self.len)
            .ok_or(MalformedInput::InvalidFrameLength { len: self.len })
    }

    /// Convert a driver frame. Standard identifiers and remote frames are
    /// not NMEA 2000 traffic.
    pub fn from_frame<F: Frame>(frame: &F) -> Result<Self, FrameError> {
        if frame.is_remote_frame() {
            return Err(FrameError::RemoteFrame);
        }
        let id = match frame.id() {
            Id::Extended(id) => CanId(id.as_raw()),
            Id::Standard(_) => return Err(FrameError::StandardId),
        };
        Self::new(id, frame.data()).ok_or(FrameError::InvalidDataLen {
            len: frame.data().len(),
        })
    }

    /// Convert into a driver frame (always extended).
    pub fn to_frame<F: Frame>(&self) -> Option<F> {
        let id = ExtendedId::new(self.id.0)?;
        F::new(id, self.payload().ok()?)
    }
}

impl Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        match id.into() {
            Id::Extended(id) => CanFrame::new(CanId(id.as_raw()), data),
            Id::Standard(_) => None,
        }
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        true
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        match ExtendedId::new(self.id.0) {
            Some(id) => Id::Extended(id),
            // Out-of-range identifiers are truncated to 29 bits.
            None => Id::Extended(ExtendedId::MAX),
        }
    }

    fn dlc(&self) -> usize {
        self.len.min(MAX_CAN_PAYLOAD)
    }

    fn data(&self) -> &[u8] {
        &self.data[..self.dlc()]
    }
}

//==================================================================================TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use embedded_can::StandardId;

    #[test]
    fn new_refuses_oversized_payload() {
        assert!(CanFrame::new(CanId(0), &[0; 9]).is_none());
        let frame = CanFrame::new(CanId(0), &[1, 2, 3]).unwrap();
        assert_eq!(frame.len, 3);
        assert_eq!(frame.payload(), Ok(&[1u8, 2, 3][..]));
    }

    #[test]
    fn payload_reports_corrupted_length() {
        let mut frame = CanFrame::new(CanId(0), &[0; 8]).unwrap();
        frame.len = 12;
        assert_eq!(
            frame.payload(),
            Err(MalformedInput::InvalidFrameLength { len: 12 })
        );
    }

    #[test]
    fn embedded_can_round_trip_keeps_extended_id() {
        let id = ExtendedId::new(0x09F1_1223).unwrap();
        let frame = <CanFrame as Frame>::new(id, &[0xFF, 0xB8, 0x0B]).unwrap();
        assert!(frame.is_extended());
        assert_eq!(frame.id.pgn(), 127250);
        assert_eq!(Frame::id(&frame), Id::Extended(id));

        let copy = CanFrame::from_frame(&frame).unwrap();
        assert_eq!(copy, frame);
    }

    #[test]
    fn standard_identifiers_are_rejected() {
        let id = StandardId::new(0x123).unwrap();
        assert!(<CanFrame as Frame>::new(id, &[0]).is_none());
    }
}
