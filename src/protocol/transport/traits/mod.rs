//! Capability traits implemented by the firmware (or test doubles): CAN bus,
//! serial port, and timer.
pub mod bridge_timer;
pub mod can_bus;
pub mod serial_port;
