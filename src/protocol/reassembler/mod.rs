//! NMEA 0183 sentence reassembler: turns the byte stream received on the
//! serial line into discrete sentence buffers.
//!
//! One instance per serial transport, owned by the serial producer. The
//! buffer never grows past `NMEA_MAX_LEN - 1` bytes: once full, bytes are
//! dropped until the next line feed and the truncated sentence is handed
//! over as is (downstream validation rejects it).
use crate::core::{SentenceBuf, NMEA_MAX_LEN};

/// Bytes kept per line, the terminator excluded.
pub const REASSEMBLY_CAPACITY: usize = NMEA_MAX_LEN - 1;

//==================================================================================Enums and Structs
/// Line accumulator with an explicit write cursor.
#[derive(Debug, Clone, Copy)]
pub struct SentenceReassembler {
    buffer: [u8; REASSEMBLY_CAPACITY],
    cursor: usize,
    /// Bytes dropped on the current line because the buffer was full.
    overflowed: usize,
}

impl Default for SentenceReassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceReassembler {
    pub const fn new() -> Self {
        Self {
            buffer: [0; REASSEMBLY_CAPACITY],
            cursor: 0,
            overflowed: 0,
        }
    }

    //==================================================================================Process Functions
    /// Feed one byte.
    ///
    /// * `\r` is discarded.
    /// * `\n` closes the line: a non-empty line starting with `$` is returned,
    ///   anything else is discarded. The cursor resets in both cases.
    /// * Other bytes are appended while there is room.
    pub fn push(&mut self, byte: u8) -> Option<SentenceBuf> {
        match byte {
            b'\r' => None,
            b'\n' => {
                let line = &self.buffer[..self.cursor];
                let sentence = match line.first() {
                    Some(b'$') => SentenceBuf::from_slice(line),
                    _ => None,
                };
                self.reset();
                sentence
            }
            _ => {
                if self.cursor < REASSEMBLY_CAPACITY {
                    self.buffer[self.cursor] = byte;
                    self.cursor += 1;
                } else {
                    self.overflowed += 1;
                }
                None
            }
        }
    }

    /// Drop the pending line.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.overflowed = 0;
    }

    /// Bytes accumulated on the current line.
    pub fn pending(&self) -> usize {
        self.cursor
    }

    /// Whether the current line lost bytes to the capacity bound.
    pub fn is_truncated(&self) -> bool {
        self.overflowed > 0
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
