use sharkwire_common::PiBus;

use crate::{RegisterBus, Result};

/// High byte of the 24-bit register address that selects the GAL's IO
/// window.
pub const IO_WINDOW: u8 = 0x40;

/// IO registers known to be exposed by the GAL.
///
/// The map comes from community reverse engineering; no other offsets are
/// known to be safe to touch.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u16)]
pub enum PortOffset {
    /// Current level of every pin.
    ReadPins = 0x0000,
    /// Moves the GAL to a new base page.
    SetBase = 0x0400,
    /// Pin directions, 1 = output (driven from `WritePins`), 0 = input.
    SetDirections = 0x0600,
    /// Output latch.
    WritePins = 0x0800,
}

impl PortOffset {
    #[inline]
    pub const fn offset(self) -> u16 {
        self as u16
    }

    /// 24-bit register address of this port inside the IO window.
    #[inline]
    pub const fn register(self) -> u32 {
        ((IO_WINDOW as u32) << 16) | self.offset() as u32
    }

    pub const fn from_offset(offset: u16) -> Option<Self> {
        match offset {
            0x0000 => Some(Self::ReadPins),
            0x0400 => Some(Self::SetBase),
            0x0600 => Some(Self::SetDirections),
            0x0800 => Some(Self::WritePins),
            _ => None,
        }
    }
}

/// 16-bit logical port space layered over [`RegisterBus`].
///
/// The GAL latches 32 bits per access, so even 16-bit data goes out as a
/// high/low pair.
pub struct GalPort<B> {
    regs: RegisterBus<B>,
}

impl<B: PiBus> GalPort<B> {
    pub fn new(bus: B, base_page: u8) -> Self {
        Self {
            regs: RegisterBus::new(bus, base_page),
        }
    }

    pub fn read_port(&mut self, port: PortOffset) -> Result<u32> {
        self.regs.read_register(port.register())
    }

    pub fn write_port16(&mut self, port: PortOffset, data_hi: u16, data_lo: u16) -> Result<()> {
        let data = ((data_hi as u32) << 16) | data_lo as u32;
        self.regs.write_register(port.register(), data)
    }

    #[inline]
    pub fn write_port16_same(&mut self, port: PortOffset, data: u16) -> Result<()> {
        self.write_port16(port, data, data)
    }

    /// Relocate the GAL to `base_page`.
    ///
    /// The write must land at the page the GAL currently answers at, so the
    /// context is only updated once it has gone out.
    pub fn set_base_page(&mut self, base_page: u8) -> Result<()> {
        let old = self.regs.base_page();
        self.write_port16_same(PortOffset::SetBase, base_page as u16)?;
        self.regs.set_base_page(base_page);
        log::debug!("GAL base page {old:#04x} -> {base_page:#04x}");
        Ok(())
    }

    #[inline]
    pub fn base_page(&self) -> u8 {
        self.regs.base_page()
    }

    /// Low half of the read-pins register.
    pub fn read_pins(&mut self) -> Result<u16> {
        Ok(self.read_port(PortOffset::ReadPins)? as u16)
    }

    pub fn write_pins(&mut self, pins: u16) -> Result<()> {
        self.write_port16_same(PortOffset::WritePins, pins)
    }

    pub fn set_directions(&mut self, directions: u16) -> Result<()> {
        self.write_port16_same(PortOffset::SetDirections, directions)
    }

    pub fn bus(&self) -> &B {
        self.regs.bus()
    }

    pub fn bus_mut(&mut self) -> &mut B {
        self.regs.bus_mut()
    }

    pub fn into_bus(self) -> B {
        self.regs.into_inner()
    }
}
