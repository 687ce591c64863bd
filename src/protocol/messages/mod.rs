//! Messages exchanged between the producers and the translation pipeline.
use crate::core::SentenceBuf;
use crate::protocol::transport::can_frame::CanFrame;

/// Unit of work queued for the pipeline. Copied by value into the queue,
/// consumed once, never requeued.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConverterMessage {
    /// Frame received on the CAN bus, to be decoded into a sentence.
    FromBus(CanFrame),
    /// Sentence reassembled from the serial line, to be encoded into a frame.
    FromSerial(SentenceBuf),
}

impl ConverterMessage {
    /// Short label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FromBus(_) => "bus",
            Self::FromSerial(_) => "serial",
        }
    }
}
