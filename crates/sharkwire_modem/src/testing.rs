//! Hand-rolled collaborators for unit tests.

use std::cell::Cell;
use std::ops::RangeInclusive;

use sharkwire_common::{Clock, PiBus};

use crate::{physical_address, Pins, PortOffset};

/// How the fake bus answers reads of the CTS sense bit, by read index.
#[derive(Copy, Clone, Debug)]
pub(crate) enum CtsScript {
    Never,
    Always,
    /// Clear for the first `n` reads, then not clear.
    First(usize),
    /// Not clear for the first `n` reads, then clear.
    After(usize),
}

impl CtsScript {
    fn clear(self, read: usize) -> bool {
        match self {
            CtsScript::Never => false,
            CtsScript::Always => true,
            CtsScript::First(n) => read < n,
            CtsScript::After(n) => read >= n,
        }
    }
}

/// Bus that records every write and scripts the pin reads.
pub(crate) struct RecordingBus {
    pub(crate) accessible: RangeInclusive<u32>,
    pub(crate) cts: CtsScript,
    pub(crate) writes: Vec<(u32, u32)>,
    pub(crate) reads: usize,
}

impl RecordingBus {
    pub(crate) fn new(cts: CtsScript) -> Self {
        Self {
            accessible: 0x1000_0000..=0x1FBF_FFFF,
            cts,
            writes: Vec::new(),
            reads: 0,
        }
    }

    /// Values written to the pin port at `base_page`, low half only.
    pub(crate) fn pin_writes(&self, base_page: u8) -> Vec<u16> {
        let address = physical_address(base_page, PortOffset::WritePins.register());
        self.writes
            .iter()
            .filter(|(a, _)| *a == address)
            .map(|(_, v)| *v as u16)
            .collect()
    }
}

impl PiBus for RecordingBus {
    fn is_accessible(&self, address: u32) -> bool {
        self.accessible.contains(&address)
    }

    fn read32(&mut self, _address: u32) -> u32 {
        let clear = self.cts.clear(self.reads);
        self.reads += 1;
        let pins = u32::from(if clear { 0 } else { Pins::CTS.bits() });
        (pins << 16) | pins
    }

    fn write32(&mut self, address: u32, value: u32) {
        self.writes.push((address, value));
    }
}

/// Microsecond clock that moves by `step` on every read and jumps on waits.
pub(crate) struct ManualClock {
    now: Cell<u64>,
    step: u64,
    pub(crate) waits: Vec<u64>,
}

impl ManualClock {
    pub(crate) fn new(step: u64) -> Self {
        Self {
            now: Cell::new(0),
            step,
            waits: Vec::new(),
        }
    }

    pub(crate) fn now(&self) -> u64 {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn ticks(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }

    fn ticks_per_second(&self) -> u64 {
        1_000_000
    }

    fn wait_ticks(&mut self, ticks: u64) {
        self.waits.push(ticks);
        self.now.set(self.now.get() + ticks);
    }
}
