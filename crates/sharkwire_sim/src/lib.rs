//! Host-side stand-in for the console, the GameShark GAL and the SharkWire
//! modem, so the driver can run without hardware.

mod bus;
mod clock;
mod gal;
mod peer;

pub use bus::SimBus;
pub use clock::{SimClock, SimTime};
pub use gal::Gal;
pub use peer::{PeerConfig, SimModem};

/// CPU counter rate: half of the 93.75 MHz CPU clock.
pub const TICKS_PER_SECOND: u64 = 46_875_000;

/// Time one PI bus access takes, roughly a microsecond.
pub const PI_ACCESS_TICKS: u64 = 47;

/// Value read back from addresses nothing answers at.
pub const OPEN_BUS: u32 = 0xFFFF_FFFF;

#[inline]
pub(crate) const fn ticks_from_ms(ms: u64) -> u64 {
    ms * TICKS_PER_SECOND / 1_000
}

#[inline]
pub(crate) const fn ticks_from_us(us: u64) -> u64 {
    us * TICKS_PER_SECOND / 1_000_000
}
