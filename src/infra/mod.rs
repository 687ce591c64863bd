//! Infrastructure layer: byte- and bit-level codecs shared by both
//! translation directions.
pub mod codec;
