//! PGN 129026 – COG & SOG, Rapid Update.
//!
//! ```text
//! byte 0      SID
//! byte 1      COG reference  2 bits (0 = true, 1 = magnetic), 6 reserved bits
//! bytes 2-3   COG            u16, 0.0001 rad
//! bytes 4-5   SOG            u16, 0.01 m/s
//! bytes 6-7   reserved
//! ```
//!
//! Decoded to `VTG` only.
use core::fmt::Write;

use super::{read_field, read_lookup, DecoderEntry, KNOTS_TO_KMH, MS_TO_KNOTS, RAD_TO_DEG};
use crate::config::BridgeConfig;
use crate::core::{FieldDescriptor, PgnDescriptor};
use crate::error::TranslateError;
use crate::infra::codec::bits::PayloadReader;
use crate::infra::codec::sentence::{Fixed, SentenceWriter};

pub const PGN: u32 = 129026;

const REFERENCE_MAGNETIC: u64 = 1;

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
        id: "CogReference",
        bits_offset: 8,
        bits_length: 2,
        is_signed: false,
        resolution: 1.0,
        physical_unit: None,
    },
    FieldDescriptor {
        id: "Cog",
        bits_offset: 16,
        bits_length: 16,
        is_signed: false,
        resolution: 0.0001,
        physical_unit: Some("rad"),
    },
    FieldDescriptor {
        id: "Sog",
        bits_offset: 32,
        bits_length: 16,
        is_signed: false,
        resolution: 0.01,
        physical_unit: Some("m/s"),
    },
];

const COG_REFERENCE: &FieldDescriptor = &FIELDS[1];
const COG: &FieldDescriptor = &FIELDS[2];
const SOG: &FieldDescriptor = &FIELDS[3];

pub const DESCRIPTOR: PgnDescriptor = PgnDescriptor {
    id: PGN,
    name: "COG & SOG, Rapid Update",
    priority: 2,
    length: 8,
    fields: &FIELDS,
};

pub const VTG_DECODER: DecoderEntry = DecoderEntry {
    descriptor: &DESCRIPTOR,
    sentence_type: *b"VTG",
    decode: decode_vtg,
};

/// `,<cog true>,T,<cog mag>,M,<sog kn>,N,<sog km/h>,K,A`.
///
/// The course lands in the true or magnetic slot according to the reference
/// bits; the other slot stays empty.
fn decode_vtg(
    reader: &PayloadReader<'_>,
    _config: &BridgeConfig,
    out: &mut SentenceWriter<'_>,
) -> Result<(), TranslateError> {
    let cog = read_field(reader, COG)?.map(|rad| rad * RAD_TO_DEG);
    let knots = read_field(reader, SOG)?.map(|ms| ms * MS_TO_KNOTS);
    let kmh = knots.map(|kn| kn * KNOTS_TO_KMH);

    let (true_course, magnetic_course) = match read_lookup(reader, COG_REFERENCE) {
        Some(REFERENCE_MAGNETIC) => (None, cog),
        _ => (cog, None),
    };

    write!(
        out,
        ",{},T,{},M,{},N,{},K,A",
        Fixed(true_course, 1),
        Fixed(magnetic_course, 1),
        Fixed(knots, 2),
        Fixed(kmh, 2)
    )?;
    Ok(())
}
