pub mod addressing;
pub mod config;
mod error;
pub mod frame;
mod modem;
pub mod pins;
pub mod port;

pub use addressing::{physical_address, RegisterBus};
pub use config::{FramePatterns, LineConfig, DEFAULT_BAUD_RATE};
pub use error::{Error, Result};
pub use frame::{encode_byte, Frame, FRAME_LEN};
pub use modem::{LineState, Modem};
pub use pins::Pins;
pub use port::{GalPort, PortOffset, IO_WINDOW};

/// Base page the GAL answers at after power-on.
pub const DEFAULT_BASE_PAGE: u8 = 0x10;

/// Base page the modem is driven from.
///
/// Reading the GAL window at the power-on page hits 0xB0400000, which
/// misbehaves on real hardware, so the driver relocates before touching
/// the modem.
pub const RELOCATED_BASE_PAGE: u8 = 0x1E;

#[cfg(test)]
mod testing;
