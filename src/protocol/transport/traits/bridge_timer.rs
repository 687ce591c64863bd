//! Asynchronous timer abstraction bounding the bus submission wait.

/// Timer trait abstraction; must remain thread-safe when applicable.
pub trait BridgeTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl core::future::Future<Output = ()> + 'a;
}

/// [`BridgeTimer`] backed by `embassy_time::Timer` (requires a time driver).
#[cfg(feature = "embassy-timer")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyTimer;

#[cfg(feature = "embassy-timer")]
impl BridgeTimer for EmbassyTimer {
    async fn delay_ms(&mut self, millis: u32) {
        embassy_time::Timer::after(embassy_time::Duration::from_millis(millis as u64)).await;
    }
}
