//! Bit-level access to NMEA 2000 payloads.
//!
//! Fields are little-endian and packed LSB first: bit `n` of the payload is
//! bit `n % 8` of byte `n / 8`. Offsets are absolute, so a decoder can pick
//! any field of a [`PgnDescriptor`](crate::core::PgnDescriptor) without
//! walking the preceding ones.
use crate::core::{FieldDescriptor, UNAVAILABLE};
use crate::error::{BitReaderError, BitWriterError};

//==================================================================================BITREADER
/// Read-only view over a received payload.
pub struct PayloadReader<'a> {
    /// Valid payload bytes (the frame's `len` already applied).
    buffer: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer }
    }

    /// Read `num_bits` bits starting at absolute bit `bits_offset`.
    /// `num_bits` must stay in the [1, 64] range.
    pub fn read_raw(&self, bits_offset: usize, num_bits: u8) -> Result<u64, BitReaderError> {
        if !(1..=64).contains(&num_bits) {
            return Err(BitReaderError::TooLongForType {
                max: 64,
                asked: num_bits,
            });
        }

        let available = self.buffer.len() * 8;
        let end_bit = bits_offset + num_bits as usize;
        if end_bit > available {
            return Err(BitReaderError::OutOfBounds { end_bit, available });
        }

        let mut result: u64 = 0;
        let mut bits_read = 0usize;
        while bits_read < num_bits as usize {
            let cursor = bits_offset + bits_read;
            let byte = self.buffer[cursor / 8];
            let bit_offset = cursor % 8;

            // Bits still available in this byte.
            let chunk = (8 - bit_offset).min(num_bits as usize - bits_read);
            let mask = ((1u16 << chunk) - 1) as u8;
            result |= (((byte >> bit_offset) & mask) as u64) << bits_read;

            bits_read += chunk;
        }
        Ok(result)
    }

    /// Raw value of a field, `None` when it carries an "unavailable" pattern.
    pub fn raw(&self, field: &FieldDescriptor) -> Result<Option<u64>, BitReaderError> {
        let raw = self.read_raw(field.bits_offset as usize, field.bits_length)?;
        if field.is_unavailable(raw) {
            Ok(None)
        } else {
            Ok(Some(raw))
        }
    }

    /// Physical value of a field (`raw * resolution`, sign-extended when needed).
    pub fn value(&self, field: &FieldDescriptor) -> Result<Option<f64>, BitReaderError> {
        Ok(self
            .raw(field)?
            .map(|raw| sign_extend(raw, field) as f64 * field.resolution))
    }
}

fn sign_extend(raw: u64, field: &FieldDescriptor) -> i64 {
    let bits = field.bits_length as u32;
    if field.is_signed && bits < 64 && raw & (1u64 << (bits - 1)) != 0 {
        (raw | !field.raw_mask()) as i64
    } else {
        raw as i64
    }
}

//==================================================================================BITWRITER
/// Writer building an outgoing payload.
///
/// The buffer is filled with the "unavailable" pattern on creation: every
/// field an encoder does not touch ends up all ones, reserved bits included.
pub struct PayloadWriter<'a> {
    buffer: &'a mut [u8],
}

impl<'a> PayloadWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        buffer.fill(UNAVAILABLE);
        Self { buffer }
    }

    /// Write the `num_bits` low bits of `value` at absolute bit `bits_offset`.
    pub fn write_raw(
        &mut self,
        bits_offset: usize,
        num_bits: u8,
        value: u64,
    ) -> Result<(), BitWriterError> {
        if !(1..=64).contains(&num_bits) {
            return Err(BitWriterError::TooLongForType {
                max: 64,
                asked: num_bits,
            });
        }

        let available = self.buffer.len() * 8;
        let end_bit = bits_offset + num_bits as usize;
        if end_bit > available {
            return Err(BitWriterError::OutOfBounds { end_bit, available });
        }

        let mut remaining = value;
        let mut bits_written = 0usize;
        while bits_written < num_bits as usize {
            let cursor = bits_offset + bits_written;
            let index = cursor / 8;
            let bit_offset = cursor % 8;

            let chunk = (8 - bit_offset).min(num_bits as usize - bits_written);
            let mask = ((1u16 << chunk) - 1) as u8;
            self.buffer[index] &= !(mask << bit_offset);
            self.buffer[index] |= (remaining as u8 & mask) << bit_offset;
            remaining >>= chunk;

            bits_written += chunk;
        }
        Ok(())
    }

    /// Write a physical value: `raw = round(value / resolution)`.
    ///
    /// Fails when the raw value does not fit in the field or collides with an
    /// "unavailable" pattern.
    pub fn write_value(&mut self, field: &FieldDescriptor, value: f64) -> Result<(), BitWriterError> {
        let raw = to_raw(value, field.resolution).ok_or(BitWriterError::ValueTooLarge {
            value: i64::MAX,
            bits: field.bits_length,
        })?;
        let bits = field.bits_length;
        let mask = field.raw_mask();

        let encoded = if field.is_signed {
            let max = (mask >> 1) as i64;
            let min = -max - 1;
            if raw < min || raw >= max || raw == -1 {
                return Err(BitWriterError::ValueTooLarge { value: raw, bits });
            }
            raw as u64 & mask
        } else {
            if raw < 0 || raw as u64 >= mask {
                return Err(BitWriterError::ValueTooLarge { value: raw, bits });
            }
            raw as u64
        };

        self.write_raw(field.bits_offset as usize, bits, encoded)
    }
}

/// Round half away from zero; `None` for NaN and infinities.
fn to_raw(value: f64, resolution: f64) -> Option<i64> {
    let scaled = value / resolution;
    if !scaled.is_finite() {
        return None;
    }
    let rounded = if scaled >= 0.0 {
        scaled + 0.5
    } else {
        scaled - 0.5
    };
    // `as` saturates, range checks happen against the field width.
    Some(rounded as i64)
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
