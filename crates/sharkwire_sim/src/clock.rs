use std::cell::Cell;
use std::rc::Rc;

use sharkwire_common::Clock;

use crate::TICKS_PER_SECOND;

/// Virtual tick counter shared by the simulated bus and clock.
///
/// Time only moves when something spends it: a bus access or a wait.
#[derive(Clone, Debug, Default)]
pub struct SimTime(Rc<Cell<u64>>);

impl SimTime {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> u64 {
        self.0.get()
    }

    /// Move time forward and return the new value.
    pub fn advance(&self, ticks: u64) -> u64 {
        let now = self.0.get().wrapping_add(ticks);
        self.0.set(now);
        now
    }
}

pub struct SimClock {
    time: SimTime,
}

impl SimClock {
    pub fn new(time: SimTime) -> Self {
        Self { time }
    }

    pub fn time(&self) -> &SimTime {
        &self.time
    }
}

impl Clock for SimClock {
    fn ticks(&self) -> u64 {
        self.time.now()
    }

    fn ticks_per_second(&self) -> u64 {
        TICKS_PER_SECOND
    }

    fn wait_ticks(&mut self, ticks: u64) {
        self.time.advance(ticks);
    }
}
