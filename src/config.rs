//! Runtime configuration of the bridge.
//!
//! Queue capacity is a compile-time bound (const generic, default
//! [`MSG_QUEUE_SIZE`]); everything else lives in [`BridgeConfig`], built with
//! fluent `with_*` setters on top of [`Default`].
use crate::protocol::transport::CAN_SEND_TIMEOUT_MS;

/// Reference capacity of the translation queue (outstanding messages).
pub const MSG_QUEUE_SIZE: usize = 32;

/// Source address used for emitted frames until an address-claim layer provides one.
pub const DEFAULT_SOURCE_ADDRESS: u8 = 0xFF;

/// Talker id stamped on emitted sentences (`HE`: heading/north-seeking gyro).
pub const DEFAULT_TALKER: TalkerId = TalkerId(*b"HE");

/// Two-character NMEA 0183 talker identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TalkerId([u8; 2]);

impl TalkerId {
    /// Accepts two ASCII uppercase letters or digits.
    pub const fn new(id: [u8; 2]) -> Option<Self> {
        if is_talker_char(id[0]) && is_talker_char(id[1]) {
            Some(Self(id))
        } else {
            None
        }
    }

    pub const fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumerics are accepted by `new`.
        core::str::from_utf8(&self.0).unwrap_or("??")
    }
}

const fn is_talker_char(c: u8) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

/// What to do with the `*HH` suffix of incoming sentences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChecksumPolicy {
    /// Accept the sentence whatever its checksum says.
    #[default]
    Ignore,
    /// Reject sentences whose checksum is present and does not match.
    Verify,
}

/// Bridge-wide settings shared by the encoders, decoders and pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    /// Talker id of sentences produced from bus frames.
    pub talker: TalkerId,
    /// Source address (8 bits) of frames produced from sentences.
    pub source_address: u8,
    /// Bounded wait when submitting a frame to the bus.
    pub send_timeout_ms: u32,
    /// Checksum handling for incoming sentences.
    pub checksum_policy: ChecksumPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            talker: DEFAULT_TALKER,
            source_address: DEFAULT_SOURCE_ADDRESS,
            send_timeout_ms: CAN_SEND_TIMEOUT_MS,
            checksum_policy: ChecksumPolicy::Ignore,
        }
    }
}

impl BridgeConfig {
    pub fn with_talker(mut self, talker: TalkerId) -> Self {
        self.talker = talker;
        self
    }

    pub fn with_source_address(mut self, source_address: u8) -> Self {
        self.source_address = source_address;
        self
    }

    pub fn with_send_timeout_ms(mut self, millis: u32) -> Self {
        self.send_timeout_ms = millis;
        self
    }

    pub fn with_checksum_policy(mut self, policy: ChecksumPolicy) -> Self {
        self.checksum_policy = policy;
        self
    }
}
