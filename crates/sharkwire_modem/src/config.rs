use std::num::NonZeroU32;

use typed_builder::TypedBuilder;

use crate::Pins;

/// 20000 bit/s, a 50 µs bit period.
pub const DEFAULT_BAUD_RATE: NonZeroU32 = match NonZeroU32::new(20_000) {
    Some(rate) => rate,
    None => panic!("baud rate must be non-zero"),
};

/// Pin-port words making up one encoded frame.
///
/// Only the TX bit differs between them; every other bit repeats the idle
/// pattern so the auxiliary outputs hold still while a byte goes out.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FramePatterns {
    pub start: u16,
    pub stop: u16,
    pub zero: u16,
    pub one: u16,
}

impl FramePatterns {
    /// Frame words for a line idling at `idle` with TX on `tx_mask`.
    pub const fn from_idle(idle: u16, tx_mask: u16) -> Self {
        let high = idle | tx_mask;
        let low = idle & !tx_mask;
        Self {
            start: high,
            stop: low,
            zero: low,
            one: high,
        }
    }
}

/// Wiring and timing of the modem line.
///
/// The defaults match the SharkWire cartridge. Parts of the GAL pin map are
/// still guesswork, so every mask is overridable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct LineConfig {
    /// Direction mask written during initialisation, 1 = output.
    #[builder(default = Pins::OUTPUTS.bits())]
    pub directions: u16,
    /// Output levels between transmissions (TX high).
    #[builder(default = Pins::IDLE.bits())]
    pub idle_pattern: u16,
    /// Output levels while announcing readiness to the modem.
    #[builder(default = Pins::READY.bits())]
    pub ready_pattern: u16,
    /// Output bit carrying the serial data.
    #[builder(default = Pins::TX.bits())]
    pub tx_mask: u16,
    /// Input bit that reads 0 while the modem is clear to send.
    #[builder(default = Pins::CTS.bits())]
    pub cts_mask: u16,
    #[builder(default = DEFAULT_BAUD_RATE)]
    pub baud_rate: NonZeroU32,
    /// How long the ready pattern is held before returning to idle.
    #[builder(default = 200)]
    pub settle_ms: u64,
    /// How long to wait for clear-to-send after the ready pulse.
    #[builder(default = 2_000)]
    pub handshake_timeout_ms: u64,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LineConfig {
    /// Duration of one bit on the wire, in microseconds.
    pub fn bit_period_us(&self) -> u64 {
        1_000_000 / u64::from(self.baud_rate.get())
    }

    /// Frame words derived from the idle pattern and the TX bit.
    #[inline]
    pub fn frame_patterns(&self) -> FramePatterns {
        FramePatterns::from_idle(self.idle_pattern, self.tx_mask)
    }

    /// Whether a read-pins sample shows the modem as clear to send.
    #[inline]
    pub fn clear_to_send(&self, pins: u16) -> bool {
        pins & self.cts_mask == 0
    }
}
