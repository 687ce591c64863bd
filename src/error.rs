//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (CAN ID construction,
//! payload access, sentence parsing, transport).
//!
//! None of them is fatal: the pipeline reports the failure and drops the
//! message that caused it.
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors that can occur while building a 29-bit CAN identifier.
pub enum CanIdBuildError {
    /// Attempt to build a broadcast message (PDU2) with PF < 240.
    #[error("Invalid for broadcast message: PF is too low")]
    InvalidForBroadcast,
    /// Attempt to send an addressed message (PDU1) with PF ≥ 240.
    #[error("Invalid for addressed message: PF is too high: {pf}")]
    InvalidForFocusedMessage { pf: u8 },
    /// In PDU1 the lower 8 bits of the PGN must remain zero.
    #[error("PDU1 PGNs require PS = 0")]
    PsFocusMessageMustBeNull,
    /// PGN does not fit in 18 bits.
    #[error("PGN {pgn} exceeds 18 bits")]
    PgnOutOfRange { pgn: u32 },
}

//==================================================================================TRANSLATE_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Outcome of a failed translation attempt (one message, either direction).
pub enum TranslateError {
    /// No decoder registered for this PGN.
    #[error("Unrecognized PGN {pgn}")]
    UnrecognizedPgn { pgn: u32 },
    /// No encoder registered for this sentence type.
    #[error("Unrecognized sentence type {tag:?}")]
    UnrecognizedSentence { tag: [u8; 3] },
    /// Input is structurally invalid.
    #[error("Malformed input: {0}")]
    Malformed(#[from] MalformedInput),
    /// Output does not fit in the caller-provided buffer.
    #[error("Output buffer too small")]
    BufferTooSmall,
    /// Unable to build the outgoing CAN identifier.
    #[error(transparent)]
    Build(#[from] CanIdBuildError),
}

impl From<core::fmt::Error> for TranslateError {
    fn from(_: core::fmt::Error) -> Self {
        Self::BufferTooSmall
    }
}

impl TranslateError {
    /// `true` for the low-severity "nobody handles this identifier" case.
    pub fn is_unrecognized(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedPgn { .. } | Self::UnrecognizedSentence { .. }
        )
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Reasons an input sentence or frame is rejected.
pub enum MalformedInput {
    /// Sentence does not start with `$`.
    #[error("Missing '$' start delimiter")]
    MissingStartDelimiter,
    /// Sentence is too short to carry a talker and a sentence type.
    #[error("Sentence too short")]
    TooShort,
    /// Sentence contains non-ASCII bytes.
    #[error("Non-ASCII sentence")]
    NotAscii,
    /// Required field absent (fewer commas than expected).
    #[error("Missing field {index}")]
    MissingField { index: usize },
    /// Required field present but empty.
    #[error("Empty field {index}")]
    EmptyField { index: usize },
    /// Field is not a decimal number.
    #[error("Non-numeric field {index}")]
    NonNumericField { index: usize },
    /// Value cannot be represented by the PGN raw field.
    #[error("Field {index} out of range")]
    OutOfRange { index: usize },
    /// Checksum digits are not two hexadecimal characters.
    #[error("Invalid checksum digits")]
    InvalidChecksum,
    /// Checksum present and different from the computed one.
    #[error("Checksum mismatch: expected {expected:#04X}, computed {computed:#04X}")]
    ChecksumMismatch { expected: u8, computed: u8 },
    /// Frame declares more than eight payload bytes.
    #[error("Invalid frame length {len}")]
    InvalidFrameLength { len: usize },
    /// Frame payload shorter than the PGN layout requires.
    #[error("Payload too short for field {field}")]
    PayloadTooShort { field: &'static str },
}

//==================================================================================FRAME_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failures converting a HAL frame into a [`CanFrame`](crate::protocol::transport::can_frame::CanFrame).
pub enum FrameError {
    /// NMEA 2000 only uses 29-bit identifiers.
    #[error("Standard (11-bit) identifier")]
    StandardId,
    /// Remote transmission requests carry no data.
    #[error("Remote frame")]
    RemoteFrame,
    /// Data Length Code above 8.
    #[error("Invalid data length {len}")]
    InvalidDataLen { len: usize },
}

//==================================================================================TRANSPORT_ERROR
#[derive(Debug, Error)]
/// Errors raised while handing a translated message to a transport.
pub enum TransportError<E: core::fmt::Debug> {
    /// Bus submission did not complete within the configured bound.
    #[error("CAN bus send timed out")]
    Timeout,
    /// CAN layer refused or failed to send the frame.
    #[error("CAN bus send error: {0:?}")]
    Bus(E),
    /// Serial port rejected a byte.
    #[error("Serial write error: {0:?}")]
    Serial(E),
}

//==================================================================================BITREADER_ERRORS
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised during bitwise payload reads.
pub enum BitReaderError {
    /// Attempted to read past the end of the payload.
    #[error("Attempted to read out of bounds -> end bit: {end_bit}, available: {available}")]
    OutOfBounds { end_bit: usize, available: usize },
    /// Requested more bits than the target type can hold.
    #[error("Cannot read more than {max} bits. Requested: {asked}")]
    TooLongForType { max: u8, asked: u8 },
}
//==================================================================================BITWRITER_ERRORS
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised during bitwise payload writes.
pub enum BitWriterError {
    /// Attempted to write beyond the payload capacity.
    #[error("Attempted to write out of bounds -> end bit: {end_bit}, available: {available}")]
    OutOfBounds { end_bit: usize, available: usize },
    /// Field is too large for the provided type.
    #[error("Cannot write more than {max} bits. Requested: {asked}")]
    TooLongForType { max: u8, asked: u8 },
    /// Value does not fit in the field (or collides with the sentinel).
    #[error("Value {value} does not fit in {bits} bits")]
    ValueTooLarge { value: i64, bits: u8 },
}
