//! Defines the data contract shared by the codecs and the static registries:
//! bounded sentence buffers and the descriptors documenting each PGN layout.
//!
//! Descriptors are plain `'static` data. Registries reference them to read and
//! write payload fields; nothing in this module is mutated at runtime.
use core::fmt;

/// Maximum NMEA 0183 sentence length, `$` and CR/LF included.
pub const NMEA_MAX_LEN: usize = 82;

/// Classic CAN payload size.
pub const MAX_CAN_PAYLOAD: usize = 8;

/// Byte pattern used by NMEA 2000 for "data not available".
pub const UNAVAILABLE: u8 = 0xFF;

/// Descriptor for a single PGN field.
#[derive(Debug)]
pub struct FieldDescriptor {
    /// 1. Field identifier.
    pub id: &'static str,
    /// 2. Absolute bit offset of the first bit (LSB first, little-endian).
    pub bits_offset: u16,
    /// 3. Field bit length (1..=32).
    pub bits_length: u8,
    /// 4. Two's complement field.
    pub is_signed: bool,
    /// 5. Resolution factor: physical value = raw * resolution.
    pub resolution: f64,
    /// 6. Physical unit of `raw * resolution` (e.g. "rad", "m", "m/s").
    pub physical_unit: Option<&'static str>,
}

impl FieldDescriptor {
    /// Largest raw value the field can carry (all bits set).
    pub const fn raw_mask(&self) -> u64 {
        if self.bits_length >= 64 {
            u64::MAX
        } else {
            (1u64 << self.bits_length) - 1
        }
    }

    /// Whether `raw` is one of the "unavailable" patterns for this field:
    /// all ones, or the positive maximum for signed fields.
    pub const fn is_unavailable(&self, raw: u64) -> bool {
        let mask = self.raw_mask();
        if raw & mask == mask {
            return true;
        }
        self.is_signed && raw & mask == mask >> 1
    }
}

/// Descriptor for an entire PGN layout.
#[derive(Debug)]
pub struct PgnDescriptor {
    /// 1. PGN identifier.
    pub id: u32,
    /// 2. PGN name (diagnostics).
    pub name: &'static str,
    /// 3. Default priority used when we emit this PGN.
    pub priority: u8,
    /// 4. Payload length in bytes.
    pub length: u8,
    /// 5. Ordered list of field descriptors.
    pub fields: &'static [FieldDescriptor],
}

impl PgnDescriptor {
    /// Look a field up by identifier.
    pub fn field(&self, id: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }
}

//==================================================================================SENTENCE_BUF
/// Bounded, length-tracked byte buffer holding one NMEA 0183 sentence.
///
/// Writes never exceed [`NMEA_MAX_LEN`]: `push`/`extend` refuse the bytes that
/// do not fit and `fmt::Write` reports `fmt::Error` on overflow, so a formatter
/// stops instead of silently producing a truncated sentence.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SentenceBuf {
    len: usize,
    data: [u8; NMEA_MAX_LEN],
}

impl Default for SentenceBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceBuf {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            len: 0,
            data: [0; NMEA_MAX_LEN],
        }
    }

    /// Build a buffer from a slice, failing when it does not fit.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let mut buf = Self::new();
        buf.extend(bytes).then_some(buf)
    }

    /// Number of valid bytes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks whether the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remaining room in bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        NMEA_MAX_LEN - self.len
    }

    /// Reset the buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append one byte. Returns `false` when the buffer is full.
    #[inline]
    pub fn push(&mut self, byte: u8) -> bool {
        if self.len == NMEA_MAX_LEN {
            return false;
        }
        self.data[self.len] = byte;
        self.len += 1;
        true
    }

    /// Append a slice atomically: nothing is written if it does not fit.
    pub fn extend(&mut self, bytes: &[u8]) -> bool {
        if bytes.len() > self.remaining() {
            return false;
        }
        self.data[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        true
    }

    /// Immutable view over the populated bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Text view; `None` when the content is not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }
}

impl fmt::Write for SentenceBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.extend(s.as_bytes()) {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}

impl fmt::Debug for SentenceBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(text) => write!(f, "SentenceBuf({:?})", text),
            None => write!(f, "SentenceBuf({:?})", self.as_bytes()),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SentenceBuf {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]:a}", self.as_bytes())
    }
}
