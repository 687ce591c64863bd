//! NMEA 2000 / NMEA 0183 transport layer: CAN frame representation, 29-bit
//! identifier management, and the capability traits the bridge consumes
//! (bus submission, bus reception, serial bytes, timer).

pub mod can_frame;
pub mod can_id;
pub mod traits;

/// Bounded wait when submitting a single CAN frame (ms).
///
/// Prevents indefinite blocking when the bus is faulty, disconnected, or saturated.
///
/// # Timeout rationale
///
/// On an NMEA 2000 bus @ 250 kbps with CAN arbitration:
/// - Maximum time for one frame (8 bytes): ~0.5 ms (no contention)
/// - With arbitration and retransmissions: ~10–20 ms
/// - Safety margin ×5 → 100 ms
///
/// The pipeline races [`CanBus::send`](traits::can_bus::CanBus::send) against
/// [`BridgeTimer::delay_ms`](traits::bridge_timer::BridgeTimer::delay_ms) with
/// this value (overridable through
/// [`BridgeConfig`](crate::config::BridgeConfig)); a frame that loses the race
/// is dropped.
pub const CAN_SEND_TIMEOUT_MS: u32 = 100;
