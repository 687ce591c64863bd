//! Bridge events and their counters.
//!
//! The bridge only *reports*: each dropped or translated message becomes a
//! [`BridgeEvent`], recorded into a shared [`BridgeStats`] and logged through
//! `defmt` when the feature is enabled. Rendering or persisting the counters
//! is left to the firmware (LED, telemetry PGN, console...).
use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::TranslateError;
use crate::protocol::messages::ConverterMessage;

/// Direction of a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// NMEA 2000 frame → NMEA 0183 sentence.
    BusToSerial,
    /// NMEA 0183 sentence → NMEA 2000 frame.
    SerialToBus,
}

impl Direction {
    pub fn of(message: &ConverterMessage) -> Self {
        match message {
            ConverterMessage::FromBus(_) => Self::BusToSerial,
            ConverterMessage::FromSerial(_) => Self::SerialToBus,
        }
    }
}

/// Something worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeEvent {
    /// A message was translated and handed to its transport.
    Translated(Direction),
    /// PGN or sentence type without a registered handler.
    Unrecognized(Direction),
    /// Input rejected as structurally invalid.
    Malformed(Direction),
    /// Queue full when a producer tried to enqueue.
    Backpressure(Direction),
    /// Outbound write failed or timed out.
    TransportFailure(Direction),
    /// Output did not fit the translation buffer.
    Overflow(Direction),
}

impl BridgeEvent {
    /// Classify a translation failure.
    pub fn from_error(direction: Direction, error: &TranslateError) -> Self {
        match error {
            TranslateError::UnrecognizedPgn { .. } | TranslateError::UnrecognizedSentence { .. } => {
                Self::Unrecognized(direction)
            }
            TranslateError::Malformed(_) | TranslateError::Build(_) => Self::Malformed(direction),
            TranslateError::BufferTooSmall => Self::Overflow(direction),
        }
    }

    pub fn direction(&self) -> Direction {
        match *self {
            Self::Translated(d)
            | Self::Unrecognized(d)
            | Self::Malformed(d)
            | Self::Backpressure(d)
            | Self::TransportFailure(d)
            | Self::Overflow(d) => d,
        }
    }
}

//==================================================================================STATS
/// Lock-free counters shared by producers and the pipeline.
///
/// All methods take `&self`, so a single `static` instance can be used from
/// interrupt handlers and tasks alike.
#[derive(Debug, Default)]
pub struct BridgeStats {
    frames_decoded: AtomicU32,
    sentences_encoded: AtomicU32,
    unrecognized: AtomicU32,
    malformed: AtomicU32,
    backpressure: AtomicU32,
    transport_failures: AtomicU32,
    overflows: AtomicU32,
}

/// Point-in-time copy of [`BridgeStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatsSnapshot {
    pub frames_decoded: u32,
    pub sentences_encoded: u32,
    pub unrecognized: u32,
    pub malformed: u32,
    pub backpressure: u32,
    pub transport_failures: u32,
    pub overflows: u32,
}

impl StatsSnapshot {
    /// Messages dropped for any reason.
    pub fn dropped(&self) -> u32 {
        self.unrecognized
            .wrapping_add(self.malformed)
            .wrapping_add(self.backpressure)
            .wrapping_add(self.transport_failures)
            .wrapping_add(self.overflows)
    }
}

impl BridgeStats {
    pub const fn new() -> Self {
        Self {
            frames_decoded: AtomicU32::new(0),
            sentences_encoded: AtomicU32::new(0),
            unrecognized: AtomicU32::new(0),
            malformed: AtomicU32::new(0),
            backpressure: AtomicU32::new(0),
            transport_failures: AtomicU32::new(0),
            overflows: AtomicU32::new(0),
        }
    }

    /// Count the event and log it at its severity.
    pub fn record(&self, event: &BridgeEvent) {
        let counter = match event {
            BridgeEvent::Translated(Direction::BusToSerial) => &self.frames_decoded,
            BridgeEvent::Translated(Direction::SerialToBus) => &self.sentences_encoded,
            BridgeEvent::Unrecognized(_) => &self.unrecognized,
            BridgeEvent::Malformed(_) => &self.malformed,
            BridgeEvent::Backpressure(_) => &self.backpressure,
            BridgeEvent::TransportFailure(_) => &self.transport_failures,
            BridgeEvent::Overflow(_) => &self.overflows,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        log_event(event);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames_decoded: self.frames_decoded.load(Ordering::Relaxed),
            sentences_encoded: self.sentences_encoded.load(Ordering::Relaxed),
            unrecognized: self.unrecognized.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
            backpressure: self.backpressure.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
            overflows: self.overflows.load(Ordering::Relaxed),
        }
    }
}

#[cfg(feature = "defmt")]
fn log_event(event: &BridgeEvent) {
    match event {
        BridgeEvent::Translated(_) => defmt::trace!("bridge: {}", event),
        BridgeEvent::Unrecognized(_) => defmt::debug!("bridge: {}", event),
        BridgeEvent::Malformed(_) | BridgeEvent::Backpressure(_) | BridgeEvent::Overflow(_) => {
            defmt::warn!("bridge: {}", event)
        }
        BridgeEvent::TransportFailure(_) => defmt::error!("bridge: {}", event),
    }
}

#[cfg(not(feature = "defmt"))]
fn log_event(_event: &BridgeEvent) {}
