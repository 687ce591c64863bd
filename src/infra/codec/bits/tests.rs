//! Test suite for PayloadReader and PayloadWriter edge cases.
use super::*;

const U16_AT_BYTE1: FieldDescriptor = FieldDescriptor {
    id: "u16",
    bits_offset: 8,
    bits_length: 16,
    is_signed: false,
    resolution: 0.0001,
    physical_unit: Some("rad"),
};

const I16_AT_BYTE3: FieldDescriptor = FieldDescriptor {
    id: "i16",
    bits_offset: 24,
    bits_length: 16,
    is_signed: true,
    resolution: 0.001,
    physical_unit: Some("m"),
};

const TWO_BITS_AT_BYTE7: FieldDescriptor = FieldDescriptor {
    id: "reference",
    bits_offset: 56,
    bits_length: 2,
    is_signed: false,
    resolution: 1.0,
    physical_unit: None,
};

#[test]
/// Little-endian aligned reads.
fn test_read_aligned_fields() {
    let data = [0x12, 0x34, 0x56, 0x78];
    let reader = PayloadReader::new(&data);
    assert_eq!(reader.read_raw(0, 8).unwrap(), 0x12);
    assert_eq!(reader.read_raw(8, 16).unwrap(), 0x5634);
    assert_eq!(reader.read_raw(0, 32).unwrap(), 0x7856_3412);
}

#[test]
/// Read fields spanning two bytes at a non-aligned offset.
fn test_read_non_aligned_bits() {
    // 0b1010_1111, 0b1111_1010 -> bits 4..12 = 0b1010_1010
    let data = [0b1010_1111, 0b1111_1010];
    let reader = PayloadReader::new(&data);
    assert_eq!(reader.read_raw(4, 8).unwrap(), 0b1010_1010);
    assert_eq!(reader.read_raw(12, 4).unwrap(), 0b1111);
    assert_eq!(reader.read_raw(0, 2).unwrap(), 0b11);
}

#[test]
/// Reads past the payload are rejected with the requested end bit.
fn test_read_out_of_bounds() {
    let data = [0xFF, 0xFF];
    let reader = PayloadReader::new(&data);
    assert_eq!(
        reader.read_raw(8, 16),
        Err(BitReaderError::OutOfBounds {
            end_bit: 24,
            available: 16
        })
    );
    assert_eq!(
        reader.read_raw(0, 65),
        Err(BitReaderError::TooLongForType { max: 64, asked: 65 })
    );
}

#[test]
/// All-ones raw values decode as unavailable.
fn test_sentinel_is_unavailable() {
    let data = [0x00, 0xFF, 0xFF, 0xFF, 0x7F, 0, 0, 0xFF];
    let reader = PayloadReader::new(&data);
    assert_eq!(reader.value(&U16_AT_BYTE1).unwrap(), None);
    // 0x7FFF is the signed "unavailable" value.
    assert_eq!(reader.value(&I16_AT_BYTE3).unwrap(), None);
    assert_eq!(reader.raw(&TWO_BITS_AT_BYTE7).unwrap(), None);
}

#[test]
/// Resolution and sign extension produce the physical value.
fn test_value_scaling() {
    // heading raw 3000 = 0x0BB8, offset raw -500 = 0xFE0C
    let data = [0xFF, 0xB8, 0x0B, 0x0C, 0xFE, 0, 0, 0xFC];
    let reader = PayloadReader::new(&data);
    let heading = reader.value(&U16_AT_BYTE1).unwrap().unwrap();
    assert!((heading - 0.3).abs() < 1e-9);
    let offset = reader.value(&I16_AT_BYTE3).unwrap().unwrap();
    assert!((offset + 0.5).abs() < 1e-9);
    assert_eq!(reader.raw(&TWO_BITS_AT_BYTE7).unwrap(), Some(0));
}

#[test]
/// A fresh writer fills the payload with the unavailable pattern.
fn test_writer_prefills_sentinel() {
    let mut data = [0u8; 8];
    PayloadWriter::new(&mut data);
    assert_eq!(data, [0xFF; 8]);
}

#[test]
/// Bit fields only touch their own bits.
fn test_write_two_bit_field_keeps_reserved_bits() {
    let mut data = [0u8; 8];
    let mut writer = PayloadWriter::new(&mut data);
    writer.write_raw(56, 2, 0).unwrap();
    assert_eq!(data[7], 0xFC);
}

#[test]
/// Physical values are rounded to the nearest raw step.
fn test_write_value_rounds() {
    let mut data = [0u8; 8];
    let mut writer = PayloadWriter::new(&mut data);
    // 0.78539... rad / 0.0001 = 7853.98 -> 7854
    writer.write_value(&U16_AT_BYTE1, 45.0 / 57.2958).unwrap();
    writer.write_value(&I16_AT_BYTE3, -0.5).unwrap();
    assert_eq!(&data[1..3], &7854u16.to_le_bytes());
    assert_eq!(&data[3..5], &(-500i16).to_le_bytes());
}

#[test]
/// Values colliding with the sentinels or exceeding the width are refused.
fn test_write_value_out_of_range() {
    let mut data = [0u8; 8];
    let mut writer = PayloadWriter::new(&mut data);
    assert!(writer.write_value(&U16_AT_BYTE1, -0.1).is_err());
    assert!(writer.write_value(&U16_AT_BYTE1, 6.5535).is_err());
    assert!(writer.write_value(&I16_AT_BYTE3, 32.767).is_err());
    assert!(writer.write_value(&I16_AT_BYTE3, f64::NAN).is_err());
    // Nothing was written.
    assert_eq!(data, [0xFF; 8]);
}

#[test]
/// Writes beyond the buffer are rejected.
fn test_write_out_of_bounds() {
    let mut data = [0u8; 2];
    let mut writer = PayloadWriter::new(&mut data);
    assert_eq!(
        writer.write_raw(8, 16, 1),
        Err(BitWriterError::OutOfBounds {
            end_bit: 24,
            available: 16
        })
    );
}
