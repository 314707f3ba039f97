/// Monotonic millisecond clock plus the short sleep the blocking player
/// uses between ticks.
pub trait Clock {
    fn now_ms(&self) -> u64;
    fn delay_ms(&mut self, ms: u32);
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

pub struct FnClock<N, D> {
    now: N,
    delay: D,
}

impl<N: Fn() -> u64, D: FnMut(u32)> FnClock<N, D> {
    pub fn new(now: N, delay: D) -> Self {
        Self { now, delay }
    }
}

impl<N: Fn() -> u64, D: FnMut(u32)> Clock for FnClock<N, D> {
    fn now_ms(&self) -> u64 {
        (self.now)()
    }

    fn delay_ms(&mut self, ms: u32) {
        (self.delay)(ms)
    }
}

#[cfg(feature = "embassy")]
pub use embassy_clock::EmbassyClock;

#[cfg(feature = "embassy")]
mod embassy_clock {
    use embassy_time::{block_for, Duration, Instant};

    use super::Clock;

    #[derive(Clone, Copy, Debug, Default)]
    pub struct EmbassyClock;

    impl Clock for EmbassyClock {
        fn now_ms(&self) -> u64 {
            Instant::now().as_millis()
        }

        fn delay_ms(&mut self, ms: u32) {
            block_for(Duration::from_millis(ms as u64));
        }
    }
}
