//! Static translation registries.
//!
//! * [`DECODERS`]: PGN → decoder producing an NMEA 0183 sentence.
//! * [`ENCODERS`]: sentence type → encoder producing an NMEA 2000 payload.
//!
//! Both tables are `'static` and never mutated. Supporting a new message kind
//! means adding a module with its descriptor and handler, then one table
//! entry; [`decode_frame`] and [`encode_sentence`] stay untouched.
//!
//! Coverage is deliberately asymmetric:
//!
//! | PGN | Decodes to | Encoded from |
//! |-----|------------|--------------|
//! | 127250 Vessel Heading | `HDT` | `HDT`, `HDM` |
//! | 128267 Water Depth | `DPT` | `DPT` |
//! | 129026 COG & SOG, Rapid Update | `VTG` | - |
use crate::config::{BridgeConfig, ChecksumPolicy};
use crate::core::{FieldDescriptor, PgnDescriptor, MAX_CAN_PAYLOAD};
use crate::error::{MalformedInput, TranslateError};
use crate::infra::codec::bits::{PayloadReader, PayloadWriter};
use crate::infra::codec::checksum;
use crate::infra::codec::sentence::{SentenceView, SentenceWriter};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::CanId;

pub mod pgn127250;
pub mod pgn128267;
pub mod pgn129026;

/// Conversion factor applied to radian values to obtain degrees.
///
/// Kept at the five-decimal value used by deployed converters so that
/// encode/decode results match existing installations bit for bit.
pub const RAD_TO_DEG: f64 = 57.2958;

/// Metres per second to knots.
pub const MS_TO_KNOTS: f64 = 1.94384;

/// Knots to kilometres per hour.
pub const KNOTS_TO_KMH: f64 = 1.852;

//==================================================================================TABLE_TYPES
/// Formats the sentence body (everything before `*`) for one PGN.
pub type DecodeFn =
    fn(&PayloadReader<'_>, &BridgeConfig, &mut SentenceWriter<'_>) -> Result<(), TranslateError>;

/// Fills the payload fields one sentence type provides.
pub type EncodeFn = fn(&SentenceView<'_>, &mut PayloadWriter<'_>) -> Result<(), MalformedInput>;

/// Decode table entry.
pub struct DecoderEntry {
    pub descriptor: &'static PgnDescriptor,
    /// Sentence type produced.
    pub sentence_type: [u8; 3],
    pub decode: DecodeFn,
}

/// Encode table entry.
pub struct EncoderEntry {
    /// Sentence type consumed.
    pub sentence_type: [u8; 3],
    pub descriptor: &'static PgnDescriptor,
    pub encode: EncodeFn,
}

//==================================================================================TABLES
/// Binary → ASCII handlers.
pub static DECODERS: &[DecoderEntry] = &[
    pgn127250::HDT_DECODER,
    pgn128267::DPT_DECODER,
    pgn129026::VTG_DECODER,
];

/// ASCII → binary handlers.
pub static ENCODERS: &[EncoderEntry] = &[
    pgn127250::HDT_ENCODER,
    pgn127250::HDM_ENCODER,
    pgn128267::DPT_ENCODER,
];

pub fn find_decoder(pgn: u32) -> Option<&'static DecoderEntry> {
    DECODERS.iter().find(|entry| entry.descriptor.id == pgn)
}

pub fn find_encoder(sentence_type: [u8; 3]) -> Option<&'static EncoderEntry> {
    ENCODERS
        .iter()
        .find(|entry| entry.sentence_type == sentence_type)
}

//==================================================================================DECODE
/// Translate a frame into a complete sentence (`$...*HH\r\n`) written to `out`.
///
/// Returns the number of bytes written. The PGN is looked up before `out` is
/// touched, so an unrecognized frame leaves the buffer as it was. A sentence
/// that does not fit fails with [`TranslateError::BufferTooSmall`]; bytes
/// already written are then meaningless.
pub fn decode_frame(
    frame: &CanFrame,
    config: &BridgeConfig,
    out: &mut [u8],
) -> Result<usize, TranslateError> {
    let pgn = frame.id.pgn();
    let entry = find_decoder(pgn).ok_or(TranslateError::UnrecognizedPgn { pgn })?;

    let reader = PayloadReader::new(frame.payload()?);
    let mut writer = SentenceWriter::new(out);
    writer.begin(config.talker.as_bytes(), &entry.sentence_type)?;
    (entry.decode)(&reader, config, &mut writer)?;
    writer.finish()?;
    Ok(writer.len())
}

/// Physical value of a required-to-exist field; `None` when unavailable.
pub(crate) fn read_field(
    reader: &PayloadReader<'_>,
    field: &'static FieldDescriptor,
) -> Result<Option<f64>, TranslateError> {
    reader
        .value(field)
        .map_err(|_| MalformedInput::PayloadTooShort { field: field.id }.into())
}

/// Raw value of an enumerated field; `None` when unavailable or absent.
pub(crate) fn read_lookup(reader: &PayloadReader<'_>, field: &'static FieldDescriptor) -> Option<u64> {
    reader.raw(field).ok().flatten()
}

//==================================================================================ENCODE
/// Translate a sentence (with or without its CR/LF) into a frame ready for the bus.
pub fn encode_sentence(sentence: &[u8], config: &BridgeConfig) -> Result<CanFrame, TranslateError> {
    let view = SentenceView::parse(sentence)?;
    let sentence_type = view.sentence_type();
    let entry = find_encoder(sentence_type)
        .ok_or(TranslateError::UnrecognizedSentence { tag: sentence_type })?;

    if config.checksum_policy == ChecksumPolicy::Verify {
        checksum::verify(sentence)?;
    }

    let descriptor = entry.descriptor;
    let len = (descriptor.length as usize).min(MAX_CAN_PAYLOAD);
    let mut data = [0u8; MAX_CAN_PAYLOAD];
    (entry.encode)(&view, &mut PayloadWriter::new(&mut data[..len]))?;

    let id = CanId::builder(descriptor.id, config.source_address)
        .with_priority(descriptor.priority)
        .build()?;
    CanFrame::new(id, &data[..len])
        .ok_or(MalformedInput::InvalidFrameLength { len }.into())
}

/// Encode a physical value, mapping range failures to the sentence field index.
pub(crate) fn write_field(
    writer: &mut PayloadWriter<'_>,
    field: &'static FieldDescriptor,
    value: f64,
    index: usize,
) -> Result<(), MalformedInput> {
    writer
        .write_value(field, value)
        .map_err(|_| MalformedInput::OutOfRange { index })
}

/// Encode an enumerated value (reference bits and similar).
pub(crate) fn write_lookup(
    writer: &mut PayloadWriter<'_>,
    field: &'static FieldDescriptor,
    raw: u64,
) -> Result<(), MalformedInput> {
    writer
        .write_raw(field.bits_offset as usize, field.bits_length, raw)
        .map_err(|_| MalformedInput::PayloadTooShort { field: field.id })
}
