//! # Bridge Demo
//!
//! Runs the whole bridge on the host with in-memory transports:
//! - NMEA 2000 frames (heading, depth, COG/SOG) are decoded to NMEA 0183 sentences
//! - NMEA 0183 sentences (HDT, HDM, DPT) arriving byte by byte are encoded to frames
//! - unsupported or malformed input is dropped and counted
//!
//! ```bash
//! cargo run --example bridge_demo
//! ```

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use korri_bridge::config::{BridgeConfig, TalkerId, MSG_QUEUE_SIZE};
use korri_bridge::protocol::diagnostics::BridgeStats;
use korri_bridge::protocol::messages::ConverterMessage;
use korri_bridge::protocol::pipeline::Bridge;
use korri_bridge::protocol::transport::can_frame::CanFrame;
use korri_bridge::protocol::transport::can_id::CanId;
use korri_bridge::protocol::transport::traits::bridge_timer::BridgeTimer;
use korri_bridge::protocol::transport::traits::can_bus::CanBus;
use korri_bridge::protocol::transport::traits::serial_port::{SerialRead, SerialWrite};
use std::collections::VecDeque;

/// CAN transmitter printing every frame it is asked to send.
struct PrintingBus;

impl CanBus for PrintingBus {
    type Error = ();

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        println!(
            "   -> CAN  id=0x{:08X} pgn={} prio={} src=0x{:02X} data={:02X?}",
            frame.id.0,
            frame.id.pgn(),
            frame.id.priority(),
            frame.id.source_address(),
            &frame.data[..frame.len]
        );
        Ok(())
    }
}

/// UART transmitter printing complete lines.
#[derive(Default)]
struct PrintingUart {
    line: Vec<u8>,
}

impl SerialWrite for PrintingUart {
    type Error = ();

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.line.push(byte);
        if byte == b'\n' {
            print!("   -> UART {}", String::from_utf8_lossy(&self.line));
            self.line.clear();
        }
        Ok(())
    }
}

/// UART receive FIFO.
struct Fifo(VecDeque<u8>);

impl SerialRead for Fifo {
    fn poll_byte(&mut self) -> Option<u8> {
        self.0.pop_front()
    }
}

struct TokioTimer;

impl BridgeTimer for TokioTimer {
    async fn delay_ms(&mut self, millis: u32) {
        tokio::time::sleep(std::time::Duration::from_millis(millis as u64)).await;
    }
}

fn frame(pgn: u32, data: [u8; 8]) -> CanFrame {
    let id = CanId::builder(pgn, 0x23)
        .with_priority(2)
        .build()
        .expect("valid identifier");
    CanFrame::new(id, &data).expect("8-byte payload")
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== korri-bridge demo ===\n");

    // ======================================================================
    // 1. Wiring: queue, counters, configuration, transports
    // ======================================================================
    let channel = Channel::<NoopRawMutex, ConverterMessage, MSG_QUEUE_SIZE>::new();
    let stats = BridgeStats::new();
    let config = BridgeConfig::default()
        .with_talker(TalkerId::new(*b"II").expect("valid talker"))
        .with_source_address(0x42);

    let parts = Bridge::new(&channel, &stats, config).into_parts(
        PrintingBus,
        PrintingUart::default(),
        TokioTimer,
    );
    let bus_ingress = parts.bus_ingress;
    let mut serial_ingress = parts.serial_ingress;
    let mut pipeline = parts.pipeline;

    // ======================================================================
    // 2. NMEA 2000 -> NMEA 0183
    // ======================================================================
    println!("1. Frames received on the CAN bus");
    bus_ingress.on_frame(&frame(127250, [0x00, 0xB8, 0x0B, 0xFF, 0xFF, 0xFF, 0xFF, 0xFC]));
    bus_ingress.on_frame(&frame(128267, [0x01, 0xFA, 0x00, 0x00, 0x00, 0xF4, 0x01, 0x05]));
    bus_ingress.on_frame(&frame(129026, [0x00, 0xFC, 0x10, 0x27, 0xF4, 0x01, 0xFF, 0xFF]));
    bus_ingress.on_frame(&frame(129025, [0x00; 8])); // no decoder: dropped

    // ======================================================================
    // 3. NMEA 0183 -> NMEA 2000, bytes trickling in from the UART
    // ======================================================================
    println!("2. Bytes received on the UART");
    let mut uart = Fifo(
        b"$HEHDT,045.0,T*2E\r\n$HEHDM,270.5,M\r\n$SDDPT,12.34,-0.3,100\r\nHEHDT,1,T\r\n$GPGGA,,,,\r\n"
            .iter()
            .copied()
            .collect(),
    );
    let queued = serial_ingress.poll(&mut uart);
    println!("   {queued} sentences queued\n");

    // ======================================================================
    // 4. Drain the queue
    // ======================================================================
    println!("3. Pipeline output");
    while let Ok(message) = channel.try_receive() {
        let kind = message.kind();
        let outcome = pipeline.process(message).await;
        println!("   [{kind}] {outcome:?}");
    }

    // ======================================================================
    // 5. Counters
    // ======================================================================
    let snapshot = stats.snapshot();
    println!("\n4. Statistics");
    println!("   frames decoded:    {}", snapshot.frames_decoded);
    println!("   sentences encoded: {}", snapshot.sentences_encoded);
    println!("   unrecognized:      {}", snapshot.unrecognized);
    println!("   malformed:         {}", snapshot.malformed);
    println!("   backpressure:      {}", snapshot.backpressure);
    println!("   transport errors:  {}", snapshot.transport_failures);
}
