//! Byte-level serial port capabilities (UART poll-in / poll-out).
//!
//! Both are synchronous: a poll returns immediately and a write pushes a
//! single byte into the transmitter.

/// Receive side: next byte already received, if any.
pub trait SerialRead {
    /// `None` when the receive FIFO is empty.
    fn poll_byte(&mut self) -> Option<u8>;
}

/// Transmit side.
pub trait SerialWrite {
    type Error: core::fmt::Debug;
    /// Write one byte out.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}
