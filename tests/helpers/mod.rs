/// Test doubles simulating the CAN bus, the serial port and the timer during
/// integration tests.
use korri_bridge::protocol::transport::{
    can_frame::CanFrame,
    traits::{
        bridge_timer::BridgeTimer,
        can_bus::{CanBus, CanListener},
        serial_port::{SerialRead, SerialWrite},
    },
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::{mpsc, Mutex};
use tokio::time::{sleep, Duration};

#[derive(Clone)]
#[allow(dead_code)]
/// In-memory CAN bus reproducing the `CanBus` / `CanListener` behavior.
pub struct MockCanBus {
    tx: mpsc::UnboundedSender<CanFrame>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<CanFrame>>>,
}

#[allow(dead_code)]
impl MockCanBus {
    /// Construct a pair of interconnected buses (DUT ↔ host).
    pub fn create_pair() -> (Self, Self) {
        let (dut_tx, host_rx) = mpsc::unbounded_channel();
        let (host_tx, dut_rx) = mpsc::unbounded_channel();

        let dut_bus = Self {
            tx: dut_tx,
            rx: Arc::new(Mutex::new(dut_rx)),
        };

        let host_bus = Self {
            tx: host_tx,
            rx: Arc::new(Mutex::new(host_rx)),
        };

        (dut_bus, host_bus)
    }

    /// Frame already delivered to this end, without waiting.
    pub fn try_recv(&self) -> Option<CanFrame> {
        self.rx.try_lock().ok()?.try_recv().ok()
    }
}

impl CanBus for MockCanBus {
    type Error = ();

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        self.tx.send(frame.clone()).map_err(|_| ())?;
        Ok(())
    }
}

impl CanListener for MockCanBus {
    type Error = ();

    async fn recv<'a>(&'a mut self) -> Result<CanFrame, Self::Error> {
        let mut rx = self.rx.lock().await;
        rx.recv().await.ok_or(())
    }
}

#[allow(dead_code)]
/// Bus whose transmit never completes (disconnected transceiver).
pub struct StalledBus;

impl CanBus for StalledBus {
    type Error = ();

    async fn send<'a>(&'a mut self, _frame: &'a CanFrame) -> Result<(), Self::Error> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

#[allow(dead_code)]
/// Bus rejecting every frame (bus-off controller).
pub struct BusOff;

impl CanBus for BusOff {
    type Error = &'static str;

    async fn send<'a>(&'a mut self, _frame: &'a CanFrame) -> Result<(), Self::Error> {
        Err("bus off")
    }
}

#[derive(Clone, Default)]
#[allow(dead_code)]
/// Serial transmitter recording every byte written.
pub struct MockSerial {
    written: Arc<StdMutex<Vec<u8>>>,
    fail: bool,
}

#[allow(dead_code)]
impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transmitter refusing every byte.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Everything written so far.
    pub fn output(&self) -> Vec<u8> {
        self.written.lock().unwrap().clone()
    }

    /// Written output split on CR/LF into sentences.
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8(self.output())
            .unwrap()
            .split("\r\n")
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

impl SerialWrite for MockSerial {
    type Error = ();

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        if self.fail {
            return Err(());
        }
        self.written.lock().unwrap().push(byte);
        Ok(())
    }
}

#[allow(dead_code)]
/// UART receive FIFO preloaded with bytes.
pub struct MockPort {
    pending: VecDeque<u8>,
}

#[allow(dead_code)]
impl MockPort {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            pending: bytes.iter().copied().collect(),
        }
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes);
    }
}

impl SerialRead for MockPort {
    fn poll_byte(&mut self) -> Option<u8> {
        self.pending.pop_front()
    }
}

#[allow(dead_code)]
/// Timer based on `tokio::time::sleep` to drive delays in tests.
pub struct MockTimer;

impl BridgeTimer for MockTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}
