//! PGN 128267 – Water Depth.
//!
//! ```text
//! byte 0      SID
//! bytes 1-4   depth below transducer   u32, 0.01 m
//! bytes 5-6   transducer offset        i16, 0.001 m (+ to waterline, - to keel)
//! byte 7      maximum range scale      u8, 10 m
//! ```
use core::fmt::Write;

use super::{read_field, write_field, DecoderEntry, EncoderEntry};
use crate::config::BridgeConfig;
use crate::core::{FieldDescriptor, PgnDescriptor};
use crate::error::{MalformedInput, TranslateError};
use crate::infra::codec::bits::{PayloadReader, PayloadWriter};
use crate::infra::codec::sentence::{Fixed, SentenceView, SentenceWriter};

pub const PGN: u32 = 128267;

pub const FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor {
        id: "Sid",
        bits_offset: 0,
        bits_length: 8,
        is_signed: false,
        resolution: 1.0,
        physical_unit: None,
    },
    FieldDescriptor {
        id: "Depth",
        bits_offset: 8,
        bits_length: 32,
        is_signed: false,
        resolution: 0.01,
        physical_unit: Some("m"),
    },
    FieldDescriptor {
        id: "Offset",
        bits_offset: 40,
        bits_length: 16,
        is_signed: true,
        resolution: 0.001,
        physical_unit: Some("m"),
    },
    FieldDescriptor {
        id: "Range",
        bits_offset: 56,
        bits_length: 8,
        is_signed: false,
        resolution: 10.0,
        physical_unit: Some("m"),
    },
];

const DEPTH: &FieldDescriptor = &FIELDS[1];
const OFFSET: &FieldDescriptor = &FIELDS[2];
const RANGE: &FieldDescriptor = &FIELDS[3];

pub const DESCRIPTOR: PgnDescriptor = PgnDescriptor {
    id: PGN,
    name: "Water Depth",
    priority: 3,
    length: 8,
    fields: &FIELDS,
};

pub const DPT_DECODER: DecoderEntry = DecoderEntry {
    descriptor: &DESCRIPTOR,
    sentence_type: *b"DPT",
    decode: decode_dpt,
};

pub const DPT_ENCODER: EncoderEntry = EncoderEntry {
    sentence_type: *b"DPT",
    descriptor: &DESCRIPTOR,
    encode: encode_dpt,
};

/// `,<depth m>,<offset m>,<range m>`.
///
/// An unavailable offset is reported as `0.0`; an unavailable range leaves the
/// last field empty. Offset and range only need to be present in the payload
/// when the depth is.
fn decode_dpt(
    reader: &PayloadReader<'_>,
    _config: &BridgeConfig,
    out: &mut SentenceWriter<'_>,
) -> Result<(), TranslateError> {
    let depth = read_field(reader, DEPTH)?;
    let offset = reader.value(OFFSET).ok().flatten().unwrap_or(0.0);
    let range = reader.value(RANGE).ok().flatten();
    write!(
        out,
        ",{},{},{}",
        Fixed(depth, 2),
        Fixed(Some(offset), 1),
        Fixed(range, 0)
    )?;
    Ok(())
}

/// Field 1 depth (required), field 2 offset and field 3 maximum range (optional).
fn encode_dpt(sentence: &SentenceView<'_>, out: &mut PayloadWriter<'_>) -> Result<(), MalformedInput> {
    let depth = sentence.number(1)?;
    write_field(out, DEPTH, depth, 1)?;
    if let Some(offset) = sentence.optional_number(2)? {
        write_field(out, OFFSET, offset, 2)?;
    }
    if let Some(range) = sentence.optional_number(3)? {
        write_field(out, RANGE, range, 3)?;
    }
    Ok(())
}
