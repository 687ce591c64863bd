//! High-level components of the bridge: message routing, translation tables,
//! sentence reassembly, diagnostics, and CAN transport primitives.
pub mod diagnostics;
pub mod messages;
pub mod pipeline;
pub mod reassembler;
pub mod registry;
pub mod transport;
