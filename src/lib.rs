//! `korri-bridge` library: a `no_std` translation engine between NMEA 2000
//! (binary CAN payloads keyed by PGN) and NMEA 0183 (ASCII sentences over a
//! serial line). The crate exposes the shared data types, the payload and
//! sentence codecs, the PGN/sentence registries and the single-consumer
//! pipeline that serializes translation work coming from two producers.
#![no_std]
//==================================================================================
/// Bridge configuration (talker id, source address, timeouts, checksum policy).
pub mod config;
/// Core data types shared by the codecs and the registries.
pub mod core;
/// Error taxonomy (unrecognized identifiers, malformed input, transport failures).
pub mod error;
/// Low-level codecs: checksum, bit-level payload access, sentence tokenizer.
pub mod infra;
/// Protocol logic: transport abstractions, reassembly, registries and pipeline.
pub mod protocol;
//==================================================================================
