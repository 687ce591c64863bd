//! Zero-copy tokenizer for NMEA 0183 sentences.
//!
//! `$TTSSS,f1,f2,...*HH\r\n` is exposed as a talker id (`TT`), a sentence type
//! (`SSS`) and comma-separated fields addressed by position. Field `0` is the
//! address field itself (`TTSSS`), so data fields start at index `1`.
//!
//! [`SentenceWriter`] is the other direction: it formats a sentence into a
//! caller-provided buffer and appends the checksum and CR/LF.
use core::fmt;

use crate::error::MalformedInput;
use crate::infra::codec::checksum::{checksum, sentence_body, to_hex_pair};

/// Borrowed view over one sentence.
#[derive(Debug, Clone, Copy)]
pub struct SentenceView<'a> {
    /// Bytes strictly between `$` and `*` (or the end of the line).
    body: &'a [u8],
    talker: [u8; 2],
    sentence_type: [u8; 3],
}

impl<'a> SentenceView<'a> {
    /// Validate the framing and locate talker and sentence type.
    pub fn parse(sentence: &'a [u8]) -> Result<Self, MalformedInput> {
        if sentence.first() != Some(&b'$') {
            return Err(MalformedInput::MissingStartDelimiter);
        }
        if !sentence.is_ascii() {
            return Err(MalformedInput::NotAscii);
        }

        let body = sentence_body(sentence);
        let address_len = body.iter().position(|&b| b == b',').unwrap_or(body.len());
        if address_len < 5 {
            return Err(MalformedInput::TooShort);
        }

        Ok(Self {
            body,
            talker: [body[0], body[1]],
            sentence_type: [body[2], body[3], body[4]],
        })
    }

    pub fn talker(&self) -> [u8; 2] {
        self.talker
    }

    pub fn sentence_type(&self) -> [u8; 3] {
        self.sentence_type
    }

    /// Body covered by the checksum.
    pub fn body(&self) -> &'a [u8] {
        self.body
    }

    /// Raw field by position; `None` when the sentence has fewer fields.
    pub fn field(&self, index: usize) -> Option<&'a [u8]> {
        self.body.split(|&b| b == b',').nth(index)
    }

    /// Number of fields, address field included.
    pub fn field_count(&self) -> usize {
        self.body.split(|&b| b == b',').count()
    }

    /// Mandatory numeric field.
    pub fn number(&self, index: usize) -> Result<f64, MalformedInput> {
        let field = self
            .field(index)
            .ok_or(MalformedInput::MissingField { index })?;
        if field.is_empty() {
            return Err(MalformedInput::EmptyField { index });
        }
        parse_number(field).ok_or(MalformedInput::NonNumericField { index })
    }

    /// Optional numeric field: missing or empty yields `None`.
    pub fn optional_number(&self, index: usize) -> Result<Option<f64>, MalformedInput> {
        match self.field(index) {
            None | Some([]) => Ok(None),
            Some(field) => parse_number(field)
                .map(Some)
                .ok_or(MalformedInput::NonNumericField { index }),
        }
    }
}

/// Decimal number as found in NMEA fields (`045.0`, `-1.5`, `12`).
fn parse_number(field: &[u8]) -> Option<f64> {
    // `f64::from_str` also accepts "inf"/"NaN"; NMEA fields never carry them.
    if !field
        .iter()
        .all(|&b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+'))
    {
        return None;
    }
    let text = core::str::from_utf8(field).ok()?;
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

//==================================================================================WRITER
/// Bounded sentence formatter over a caller-provided buffer.
///
/// Each `write_str` is all-or-nothing: when the text does not fit, nothing is
/// written and `fmt::Error` is returned, so the buffer is never overrun.
pub struct SentenceWriter<'a> {
    buffer: &'a mut [u8],
    len: usize,
}

impl<'a> SentenceWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, len: 0 }
    }

    /// Write `$`, the talker id and the sentence type.
    pub fn begin(&mut self, talker: &[u8; 2], sentence_type: &[u8; 3]) -> fmt::Result {
        self.write_bytes(b"$")?;
        self.write_bytes(talker)?;
        self.write_bytes(sentence_type)
    }

    /// Append `*HH\r\n`, the checksum covering everything after `$`.
    pub fn finish(&mut self) -> fmt::Result {
        let cs = checksum(sentence_body(self.as_bytes()));
        let [hi, lo] = to_hex_pair(cs);
        self.write_bytes(&[b'*', hi, lo, b'\r', b'\n'])
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> fmt::Result {
        let end = self.len + bytes.len();
        let target = self.buffer.get_mut(self.len..end).ok_or(fmt::Error)?;
        target.copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }
}

impl fmt::Write for SentenceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes())
    }
}

/// Fixed-precision field that renders empty when the value is unavailable.
pub struct Fixed(pub Option<f64>, pub usize);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.*}", self.1, value),
            None => Ok(()),
        }
    }
}
