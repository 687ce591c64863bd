//! Minimal abstraction for an asynchronous CAN bus. Allows the library to plug
//! into various implementations (embedded HAL, desktop driver, etc.).
//!
//! Transmission and reception are separate traits: most drivers split into a
//! TX half, owned by the translation pipeline, and an RX half (or interrupt
//! callback) feeding the bus producer.
use crate::protocol::transport::can_frame::CanFrame;
use core::future::Future;

/// Contract to submit CAN frames.
pub trait CanBus {
    type Error: core::fmt::Debug;
    /// Emit a frame on the bus. Asynchronous to accommodate non-blocking drivers.
    /// The caller bounds the wait; implementations do not need their own timeout.
    fn send<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;
}

/// Contract to receive CAN frames ("receive everything" filter).
pub trait CanListener {
    type Error: core::fmt::Debug;
    /// Retrieve the next available frame. Asynchronously waits until data arrives.
    fn recv<'a>(&'a mut self) -> impl Future<Output = Result<CanFrame, Self::Error>> + 'a;
}
