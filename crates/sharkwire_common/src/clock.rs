/// Monotonic tick source with busy-wait helpers.
///
/// Tick conversions truncate, matching how the target's tick macros behave.
pub trait Clock {
    /// Current value of the monotonic tick counter.
    fn ticks(&self) -> u64;

    fn ticks_per_second(&self) -> u64;

    fn ticks_from_ms(&self, ms: u64) -> u64 {
        ms * self.ticks_per_second() / 1_000
    }

    fn ticks_from_us(&self, us: u64) -> u64 {
        us * self.ticks_per_second() / 1_000_000
    }

    fn ticks_since(&self, start: u64) -> u64 {
        self.ticks().wrapping_sub(start)
    }

    /// Spin until at least `ticks` ticks have elapsed.
    ///
    /// Clocks that do not advance on their own (virtual time) must override
    /// this, otherwise the loop never terminates.
    fn wait_ticks(&mut self, ticks: u64) {
        let start = self.ticks();
        while self.ticks_since(start) < ticks {
            std::hint::spin_loop();
        }
    }

    fn wait_ms(&mut self, ms: u64) {
        let ticks = self.ticks_from_ms(ms);
        self.wait_ticks(ticks);
    }

    fn wait_us(&mut self, us: u64) {
        let ticks = self.ticks_from_us(us);
        self.wait_ticks(ticks);
    }
}
