//! Translation pipeline and its producers.
//!
//! The firmware provides a pre-allocated [`embassy_sync::channel::Channel`]
//! and a [`BridgeStats`], then splits the [`Bridge`] into:
//!
//! * [`BusIngress`]: fed from the CAN receive path (callback or listener task);
//! * [`SerialIngress`]: fed byte by byte from the UART, owns the reassembler;
//! * [`TranslationPipeline`]: the single consumer, owning both outbound transports.
//!
//! Producers never block: when the queue is full the new message is dropped
//! and counted as backpressure. The consumer waits indefinitely for work and
//! handles one message at a time, in arrival order. A failed message is
//! reported and dropped; it never stops the loop.
use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    channel::{Channel, Receiver, Sender, TrySendError},
};
use futures_util::{future::select, future::Either, pin_mut};

use crate::config::{BridgeConfig, MSG_QUEUE_SIZE};
use crate::core::{SentenceBuf, NMEA_MAX_LEN};
use crate::error::{TransportError, TranslateError};
use crate::protocol::diagnostics::{BridgeEvent, BridgeStats, Direction};
use crate::protocol::messages::ConverterMessage;
use crate::protocol::reassembler::SentenceReassembler;
use crate::protocol::registry::{decode_frame, encode_sentence};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::bridge_timer::BridgeTimer;
use crate::protocol::transport::traits::can_bus::{CanBus, CanListener};
use crate::protocol::transport::traits::serial_port::{SerialRead, SerialWrite};

/// Queue shared by the producers and the pipeline.
pub type BridgeChannel<M, const N: usize = MSG_QUEUE_SIZE> = Channel<M, ConverterMessage, N>;

//==================================================================================BRIDGE
/// Bridge wiring, before it is split into its running parts.
pub struct Bridge<'a, M: RawMutex, const N: usize = MSG_QUEUE_SIZE> {
    channel: &'a Channel<M, ConverterMessage, N>,
    stats: &'a BridgeStats,
    config: BridgeConfig,
}

impl<'a, M: RawMutex, const N: usize> Bridge<'a, M, N> {
    pub fn new(
        channel: &'a Channel<M, ConverterMessage, N>,
        stats: &'a BridgeStats,
        config: BridgeConfig,
    ) -> Self {
        Self {
            channel,
            stats,
            config,
        }
    }

    /// Inject the outbound transports and split into producers and consumer.
    pub fn into_parts<C, W, T>(
        self,
        can_bus: C,
        serial_tx: W,
        timer: T,
    ) -> BridgeParts<'a, M, C, W, T, N>
    where
        C: CanBus,
        W: SerialWrite,
        T: BridgeTimer,
    {
        BridgeParts {
            bus_ingress: BusIngress {
                sender: self.channel.sender(),
                stats: self.stats,
            },
            serial_ingress: SerialIngress {
                reassembler: SentenceReassembler::new(),
                sender: self.channel.sender(),
                stats: self.stats,
            },
            pipeline: TranslationPipeline {
                receiver: self.channel.receiver(),
                can_bus,
                serial_tx,
                timer,
                stats: self.stats,
                config: self.config,
            },
        }
    }
}

/// Bundle returned by [`Bridge::into_parts`].
pub struct BridgeParts<'a, M, C, W, T, const N: usize>
where
    M: RawMutex,
    C: CanBus,
    W: SerialWrite,
    T: BridgeTimer,
{
    pub bus_ingress: BusIngress<'a, M, N>,
    pub serial_ingress: SerialIngress<'a, M, N>,
    pub pipeline: TranslationPipeline<'a, M, C, W, T, N>,
}

/// Non-blocking enqueue; a full queue drops the message.
fn enqueue<M: RawMutex, const N: usize>(
    sender: &Sender<'_, M, ConverterMessage, N>,
    stats: &BridgeStats,
    message: ConverterMessage,
) -> bool {
    let direction = Direction::of(&message);
    match sender.try_send(message) {
        Ok(()) => true,
        Err(TrySendError::Full(_dropped)) => {
            stats.record(&BridgeEvent::Backpressure(direction));
            false
        }
    }
}

//==================================================================================PRODUCERS
/// Bus-side producer.
///
/// Cheap to copy: hand one to the CAN receive interrupt and another to a
/// listener task if needed.
pub struct BusIngress<'a, M: RawMutex, const N: usize> {
    sender: Sender<'a, M, ConverterMessage, N>,
    stats: &'a BridgeStats,
}

impl<M: RawMutex, const N: usize> Clone for BusIngress<'_, M, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RawMutex, const N: usize> Copy for BusIngress<'_, M, N> {}

impl<'a, M: RawMutex, const N: usize> BusIngress<'a, M, N> {
    /// Queue a received frame. Returns `false` when it was dropped.
    pub fn on_frame(&self, frame: &CanFrame) -> bool {
        enqueue(&self.sender, self.stats, ConverterMessage::FromBus(frame.clone()))
    }

    /// Forward every frame from `listener` until it fails; returns that error.
    pub async fn listen<L: CanListener>(&self, listener: &mut L) -> L::Error {
        loop {
            match listener.recv().await {
                Ok(frame) => {
                    self.on_frame(&frame);
                }
                Err(err) => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("bus listener stopped: {}", defmt::Debug2Format(&err));
                    return err;
                }
            }
        }
    }
}

/// Serial-side producer, owning the line reassembler.
pub struct SerialIngress<'a, M: RawMutex, const N: usize> {
    reassembler: SentenceReassembler,
    sender: Sender<'a, M, ConverterMessage, N>,
    stats: &'a BridgeStats,
}

impl<'a, M: RawMutex, const N: usize> SerialIngress<'a, M, N> {
    /// Feed one received byte. Returns `true` when it completed a sentence
    /// that made it into the queue.
    pub fn on_byte(&mut self, byte: u8) -> bool {
        match self.reassembler.push(byte) {
            Some(sentence) => self.on_sentence(sentence),
            None => false,
        }
    }

    /// Queue an already delimited sentence.
    pub fn on_sentence(&mut self, sentence: SentenceBuf) -> bool {
        enqueue(&self.sender, self.stats, ConverterMessage::FromSerial(sentence))
    }

    /// Drain every byte currently available on `port`.
    /// Returns the number of sentences queued.
    pub fn poll<R: SerialRead>(&mut self, port: &mut R) -> usize {
        let mut queued = 0;
        while let Some(byte) = port.poll_byte() {
            if self.on_byte(byte) {
                queued += 1;
            }
        }
        queued
    }

    /// Discard a partially received line.
    pub fn reset(&mut self) {
        self.reassembler.reset();
    }
}

//==================================================================================CONSUMER
/// Why a message was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DropReason {
    /// Decode or encode failed.
    Translation(TranslateError),
    /// Bus submission exceeded the configured bound.
    SendTimeout,
    /// Bus driver reported an error.
    BusError,
    /// Serial driver refused a byte.
    SerialError,
}

/// Result of processing one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Translated and handed to the outbound transport.
    Delivered,
    Dropped(DropReason),
}

impl Outcome {
    fn event(&self, direction: Direction) -> BridgeEvent {
        match self {
            Self::Delivered => BridgeEvent::Translated(direction),
            Self::Dropped(DropReason::Translation(err)) => BridgeEvent::from_error(direction, err),
            Self::Dropped(_) => BridgeEvent::TransportFailure(direction),
        }
    }
}

impl<E: core::fmt::Debug> From<TransportError<E>> for DropReason {
    fn from(err: TransportError<E>) -> Self {
        match err {
            TransportError::Timeout => Self::SendTimeout,
            TransportError::Bus(_) => Self::BusError,
            TransportError::Serial(_) => Self::SerialError,
        }
    }
}

/// Single consumer of the queue.
pub struct TranslationPipeline<'a, M, C, W, T, const N: usize>
where
    M: RawMutex,
    C: CanBus,
    W: SerialWrite,
    T: BridgeTimer,
{
    receiver: Receiver<'a, M, ConverterMessage, N>,
    can_bus: C,
    serial_tx: W,
    timer: T,
    stats: &'a BridgeStats,
    config: BridgeConfig,
}

impl<'a, M, C, W, T, const N: usize> TranslationPipeline<'a, M, C, W, T, N>
where
    M: RawMutex,
    C: CanBus,
    W: SerialWrite,
    T: BridgeTimer,
{
    /// Process messages for the lifetime of the program.
    pub async fn run(mut self) -> ! {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "bridge pipeline started (talker {}, source address {})",
            self.config.talker.as_str(),
            self.config.source_address
        );
        loop {
            let message = self.receiver.receive().await;
            self.process(message).await;
        }
    }

    /// Translate one message and hand it to the opposite transport.
    pub async fn process(&mut self, message: ConverterMessage) -> Outcome {
        let direction = Direction::of(&message);
        let outcome = match message {
            ConverterMessage::FromBus(frame) => self.bus_to_serial(&frame),
            ConverterMessage::FromSerial(sentence) => self.serial_to_bus(&sentence).await,
        };
        self.stats.record(&outcome.event(direction));
        outcome
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn stats(&self) -> &'a BridgeStats {
        self.stats
    }

    fn bus_to_serial(&mut self, frame: &CanFrame) -> Outcome {
        let mut out = [0u8; NMEA_MAX_LEN];
        let len = match decode_frame(frame, &self.config, &mut out) {
            Ok(len) => len,
            Err(err) => return Outcome::Dropped(DropReason::Translation(err)),
        };
        match self.write_serial(&out[..len]) {
            Ok(()) => Outcome::Delivered,
            Err(err) => Outcome::Dropped(err.into()),
        }
    }

    async fn serial_to_bus(&mut self, sentence: &SentenceBuf) -> Outcome {
        let frame = match encode_sentence(sentence.as_bytes(), &self.config) {
            Ok(frame) => frame,
            Err(err) => return Outcome::Dropped(DropReason::Translation(err)),
        };
        match self.send_frame(&frame).await {
            Ok(()) => Outcome::Delivered,
            Err(err) => Outcome::Dropped(err.into()),
        }
    }

    fn write_serial(&mut self, bytes: &[u8]) -> Result<(), TransportError<W::Error>> {
        for &byte in bytes {
            if let Err(err) = self.serial_tx.write_byte(byte) {
                #[cfg(feature = "defmt")]
                defmt::error!("serial write failed: {}", defmt::Debug2Format(&err));
                return Err(TransportError::Serial(err));
            }
        }
        Ok(())
    }

    /// Submit `frame`, giving up after `send_timeout_ms`.
    async fn send_frame(&mut self, frame: &CanFrame) -> Result<(), TransportError<C::Error>> {
        let send = self.can_bus.send(frame);
        let timeout = self.timer.delay_ms(self.config.send_timeout_ms);
        pin_mut!(send);
        pin_mut!(timeout);

        match select(send, timeout).await {
            Either::Left((Ok(()), _)) => Ok(()),
            Either::Left((Err(err), _)) => {
                #[cfg(feature = "defmt")]
                defmt::error!("CAN send failed: {}", defmt::Debug2Format(&err));
                Err(TransportError::Bus(err))
            }
            Either::Right(((), _)) => {
                #[cfg(feature = "defmt")]
                defmt::error!(
                    "CAN send timed out after {} ms (PGN {})",
                    self.config.send_timeout_ms,
                    frame.id.pgn()
                );
                Err(TransportError::Timeout)
            }
        }
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
