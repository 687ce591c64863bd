//! PGN 127250 – Vessel Heading.
//!
//! ```text
//! byte 0      SID
//! bytes 1-2   heading     u16, 0.0001 rad
//! bytes 3-4   deviation   i16, 0.0001 rad
//! bytes 5-6   variation   i16, 0.0001 rad
//! byte 7      reference   2 bits (0 = true, 1 = magnetic), 6 reserved bits
//! ```
//!
//! Decodes to `HDT`; encoded from `HDT` (true) and `HDM` (magnetic).
use core::fmt::Write;

use super::{read_field, write_field, write_lookup, DecoderEntry, EncoderEntry, RAD_TO_DEG};
use crate::config::BridgeConfig;
use crate::core::{FieldDescriptor, PgnDescriptor};
use crate::error::{MalformedInput, TranslateError};
use crate::infra::codec::bits::{PayloadReader, PayloadWriter};
use crate::infra::codec::sentence::{Fixed, SentenceView, SentenceWriter};

pub const PGN: u32 = 127250;

/// Heading reference values (2-bit lookup).
pub const REFERENCE_TRUE: u64 = 0;
pub const REFERENCE_MAGNETIC: u64 = 1;

pub const FIELDS: [FieldDescriptor; 5] = [
    FieldDescriptor {
        id: "Sid",
        bits_offset: 0,
        bits_length: 8,
        is_signed: false,
        resolution: 1.0,
        physical_unit: None,
    },
    FieldDescriptor {
        id: "Heading",
        bits_offset: 8,
        bits_length: 16,
        is_signed: false,
        resolution: 0.0001,
        physical_unit: Some("rad"),
    },
    FieldDescriptor {
        id: "Deviation",
        bits_offset: 24,
        bits_length: 16,
        is_signed: true,
        resolution: 0.0001,
        physical_unit: Some("rad"),
    },
    FieldDescriptor {
        id: "Variation",
        bits_offset: 40,
        bits_length: 16,
        is_signed: true,
        resolution: 0.0001,
        physical_unit: Some("rad"),
    },
    FieldDescriptor {
        id: "Reference",
        bits_offset: 56,
        bits_length: 2,
        is_signed: false,
        resolution: 1.0,
        physical_unit: None,
    },
];

const HEADING: &FieldDescriptor = &FIELDS[1];
const REFERENCE: &FieldDescriptor = &FIELDS[4];

pub const DESCRIPTOR: PgnDescriptor = PgnDescriptor {
    id: PGN,
    name: "Vessel Heading",
    priority: 2,
    length: 8,
    fields: &FIELDS,
};

pub const HDT_DECODER: DecoderEntry = DecoderEntry {
    descriptor: &DESCRIPTOR,
    sentence_type: *b"HDT",
    decode: decode_hdt,
};

pub const HDT_ENCODER: EncoderEntry = EncoderEntry {
    sentence_type: *b"HDT",
    descriptor: &DESCRIPTOR,
    encode: encode_hdt,
};

pub const HDM_ENCODER: EncoderEntry = EncoderEntry {
    sentence_type: *b"HDM",
    descriptor: &DESCRIPTOR,
    encode: encode_hdm,
};

/// `,<heading °>,T` – the raw value is scaled by 0.0001 then by [`RAD_TO_DEG`].
fn decode_hdt(
    reader: &PayloadReader<'_>,
    _config: &BridgeConfig,
    out: &mut SentenceWriter<'_>,
) -> Result<(), TranslateError> {
    let heading = read_field(reader, HEADING)?.map(|rad| rad * RAD_TO_DEG);
    write!(out, ",{},T", Fixed(heading, 1))?;
    Ok(())
}

fn encode_hdt(sentence: &SentenceView<'_>, out: &mut PayloadWriter<'_>) -> Result<(), MalformedInput> {
    encode_heading(sentence, out, REFERENCE_TRUE)
}

fn encode_hdm(sentence: &SentenceView<'_>, out: &mut PayloadWriter<'_>) -> Result<(), MalformedInput> {
    encode_heading(sentence, out, REFERENCE_MAGNETIC)
}

/// Field 1 carries the heading in degrees. SID, deviation and variation stay
/// unavailable.
fn encode_heading(
    sentence: &SentenceView<'_>,
    out: &mut PayloadWriter<'_>,
    reference: u64,
) -> Result<(), MalformedInput> {
    let degrees = sentence.number(1)?;
    write_field(out, HEADING, degrees / RAD_TO_DEG, 1)?;
    write_lookup(out, REFERENCE, reference)
}
