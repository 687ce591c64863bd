//! Codecs used by the registries.
//!
//! * [`checksum`]: NMEA 0183 XOR checksum framing.
//! * [`bits`]: little-endian, LSB-first field access inside CAN payloads.
//! * [`sentence`]: zero-copy tokenizer for ASCII sentences.
pub mod bits;
pub mod checksum;
pub mod sentence;
