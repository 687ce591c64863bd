//! Producer-side tests: enqueue, reassembly hand-off and backpressure.
//! The async consumer is exercised by the integration tests.
use super::*;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;

use crate::protocol::transport::can_id::CanId;

struct NullBus;

impl CanBus for NullBus {
    type Error = ();

    async fn send<'a>(&'a mut self, _frame: &'a CanFrame) -> Result<(), Self::Error> {
        Ok(())
    }
}

struct NullSerial;

impl SerialWrite for NullSerial {
    type Error = ();

    fn write_byte(&mut self, _byte: u8) -> Result<(), Self::Error> {
        Ok(())
    }
}

struct NullTimer;

impl BridgeTimer for NullTimer {
    async fn delay_ms(&mut self, _millis: u32) {}
}

struct BytePort<'a> {
    bytes: &'a [u8],
}

impl SerialRead for BytePort<'_> {
    fn poll_byte(&mut self) -> Option<u8> {
        let (&first, rest) = self.bytes.split_first()?;
        self.bytes = rest;
        Some(first)
    }
}

fn heading_frame(source: u8) -> CanFrame {
    let id = CanId::builder(127250, source).with_priority(2).build().unwrap();
    CanFrame::new(id, &[0x00, 0xB8, 0x0B, 0xFF, 0xFF, 0xFF, 0xFF, 0xFC]).unwrap()
}

#[test]
fn bus_frames_are_queued_in_order() {
    let channel = Channel::<NoopRawMutex, ConverterMessage, 4>::new();
    let stats = BridgeStats::new();
    let parts = Bridge::new(&channel, &stats, BridgeConfig::default())
        .into_parts(NullBus, NullSerial, NullTimer);

    assert!(parts.bus_ingress.on_frame(&heading_frame(1)));
    assert!(parts.bus_ingress.on_frame(&heading_frame(2)));

    assert_eq!(
        channel.try_receive().unwrap(),
        ConverterMessage::FromBus(heading_frame(1))
    );
    assert_eq!(
        channel.try_receive().unwrap(),
        ConverterMessage::FromBus(heading_frame(2))
    );
    assert!(channel.try_receive().is_err());
}

#[test]
fn full_queue_drops_the_newest_message() {
    let channel = Channel::<NoopRawMutex, ConverterMessage, 2>::new();
    let stats = BridgeStats::new();
    let parts = Bridge::new(&channel, &stats, BridgeConfig::default())
        .into_parts(NullBus, NullSerial, NullTimer);

    assert!(parts.bus_ingress.on_frame(&heading_frame(1)));
    assert!(parts.bus_ingress.on_frame(&heading_frame(2)));
    assert!(!parts.bus_ingress.on_frame(&heading_frame(3)));

    assert_eq!(stats.snapshot().backpressure, 1);
    assert_eq!(channel.len(), 2);
    assert_eq!(
        channel.try_receive().unwrap(),
        ConverterMessage::FromBus(heading_frame(1))
    );
}

#[test]
fn serial_bytes_become_sentences() {
    let channel = Channel::<NoopRawMutex, ConverterMessage, 4>::new();
    let stats = BridgeStats::new();
    let mut parts = Bridge::new(&channel, &stats, BridgeConfig::default())
        .into_parts(NullBus, NullSerial, NullTimer);

    let mut port = BytePort {
        bytes: b"garbage\r\n$HEHDT,045.0,T*2E\r\n$HEDPT,2.5",
    };
    assert_eq!(parts.serial_ingress.poll(&mut port), 1);

    match channel.try_receive().unwrap() {
        ConverterMessage::FromSerial(sentence) => {
            assert_eq!(sentence.as_bytes(), b"$HEHDT,045.0,T*2E")
        }
        other => panic!("unexpected message {other:?}"),
    }
    assert!(channel.try_receive().is_err());

    // The partial DPT line completes with the next chunk.
    let mut port = BytePort { bytes: b"*48\r\n" };
    assert_eq!(parts.serial_ingress.poll(&mut port), 1);
    assert_eq!(channel.len(), 1);
}

#[test]
fn reset_discards_a_partial_line() {
    let channel = Channel::<NoopRawMutex, ConverterMessage, 4>::new();
    let stats = BridgeStats::new();
    let mut parts = Bridge::new(&channel, &stats, BridgeConfig::default())
        .into_parts(NullBus, NullSerial, NullTimer);

    for &b in b"$HEHDT,04" {
        assert!(!parts.serial_ingress.on_byte(b));
    }
    parts.serial_ingress.reset();
    for &b in b"5.0,T\r\n" {
        parts.serial_ingress.on_byte(b);
    }
    assert!(channel.is_empty());
}

#[test]
fn outcomes_map_to_events() {
    let dir = Direction::SerialToBus;
    assert_eq!(Outcome::Delivered.event(dir), BridgeEvent::Translated(dir));
    assert_eq!(
        Outcome::Dropped(DropReason::SendTimeout).event(dir),
        BridgeEvent::TransportFailure(dir)
    );
    assert_eq!(
        Outcome::Dropped(DropReason::Translation(TranslateError::UnrecognizedSentence {
            tag: *b"GGA"
        }))
        .event(dir),
        BridgeEvent::Unrecognized(dir)
    );
    assert_eq!(
        DropReason::from(TransportError::<()>::Timeout),
        DropReason::SendTimeout
    );
    assert_eq!(
        DropReason::from(TransportError::Bus(())),
        DropReason::BusError
    );
}
