//! Creation and extraction of the 29-bit CAN identifiers used by
//! NMEA 2000 (derived from the SAE J1939 specification).
//!
//! Layout, MSB first: `priority(3) | R(1) | DP(1) | PF(8) | PS(8) | SA(8)`.
//! `R | DP | PF | PS` is the 18-bit PGN field; for PDU1 messages (PF < 240)
//! PS is a destination address and does not belong to the PGN.
use crate::error::CanIdBuildError;

/// Mask of the 29 significant identifier bits.
pub const EXTENDED_ID_MASK: u32 = 0x1FFF_FFFF;

/// Largest value representable in the 18-bit PGN field.
pub const MAX_PGN: u32 = 0x3_FFFF;

//==================================================================================CAN_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Encapsulates an extended CAN identifier (29 bits) and exposes accessors
/// for priority, PGN, destination, and source.
pub struct CanId(pub u32);

impl CanId {
    /// Wrap a raw identifier, refusing values wider than 29 bits.
    pub const fn new(raw: u32) -> Option<Self> {
        if raw & !EXTENDED_ID_MASK == 0 {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Creates a pre-configured `CanIdBuilder` for a PGN and source address.
    pub fn builder(pgn: u32, source_address: u8) -> CanIdBuilder {
        CanIdBuilder::new(pgn, source_address)
    }

    /// Returns the priority (3 bits, value 0-7) encoded in the CAN ID.
    pub fn priority(&self) -> u8 {
        ((self.0 >> 26) & 0x07) as u8
    }

    /// Extracts the 18-bit PGN, handling the PDU1/PDU2 distinction.
    pub fn pgn(&self) -> u32 {
        let pgn_field = (self.0 >> 8) & MAX_PGN;
        if self.pdu_format() >= 240 {
            // PDU2: implicit destination, PS belongs to the PGN.
            pgn_field
        } else {
            // PDU1: PS stores the explicit destination.
            pgn_field & !0xFF
        }
    }

    /// Returns the destination address (PDU1) when the PGN requires one.
    pub fn destination(&self) -> Option<u8> {
        if self.pdu_format() >= 240 {
            None
        } else {
            Some(((self.0 >> 8) & 0xFF) as u8)
        }
    }

    /// Eight-bit source address (logical node identifier on the N2K network).
    pub fn source_address(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    fn pdu_format(&self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }
}
//==================================================================================CAN_ID_BUILDER
#[derive(Debug)]
/// Fluent builder that enforces the PDU1/PDU2 rules.
pub struct CanIdBuilder {
    pub priority: u8,
    pub pgn: u32,
    pub source_address: u8,
    pub destination: Option<u8>,
}

impl CanIdBuilder {
    /// Initializes the builder for a given PGN and source address.
    pub fn new(pgn: u32, source_address: u8) -> Self {
        Self {
            priority: 6, // Default priority
            pgn,
            source_address,
            destination: None,
        }
    }

    /// Sets the priority (3 bits) to use during construction.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority & 0x07;
        self
    }

    /// Assigns a destination address (PDU1). Implies a directed message.
    pub fn to_destination(mut self, destination_address: u8) -> Self {
        self.destination = Some(destination_address);
        self
    }

    /// Builds the CAN identifier while applying J1939 rules:
    /// - PF < 240 → addressed message (PDU1): `destination` mandatory and PGN PS byte must be `0`
    /// - PF ≥ 240 → broadcast (PDU2): `destination` must not be provided
    pub fn build(self) -> Result<CanId, CanIdBuildError> {
        if self.pgn > MAX_PGN {
            return Err(CanIdBuildError::PgnOutOfRange { pgn: self.pgn });
        }
        let pf = ((self.pgn >> 8) & 0xFF) as u8;
        let ps = (self.pgn & 0xFF) as u8;

        let ps_field = match self.destination {
            None if pf < 240 => return Err(CanIdBuildError::InvalidForBroadcast),
            None => ps,
            Some(_) if pf >= 240 => {
                return Err(CanIdBuildError::InvalidForFocusedMessage { pf })
            }
            Some(_) if ps != 0 => return Err(CanIdBuildError::PsFocusMessageMustBeNull),
            Some(da) => da,
        };

        let id = ((self.priority as u32) << 26)
            | ((self.pgn & !0xFF) << 8)
            | ((ps_field as u32) << 8)
            | (self.source_address as u32);
        Ok(CanId(id))
    }
}
