use sharkwire_common::PiBus;

use crate::{Error, Result};

/// Mask applied to a register offset before the base page is merged in.
const OFFSET_MASK: u32 = 0x00FF_FFFF;

/// Physical PI address of `offset` inside the 16 MiB window selected by
/// `base_page`.
#[inline]
pub const fn physical_address(base_page: u8, offset: u32) -> u32 {
    ((base_page as u32) << 24) | (offset & OFFSET_MASK)
}

/// Register access relative to the GAL's relocatable base page.
///
/// The base page lives here rather than in a global so that every address
/// computation goes through the same context as the bus it targets.
pub struct RegisterBus<B> {
    bus: B,
    base_page: u8,
}

impl<B: PiBus> RegisterBus<B> {
    pub fn new(bus: B, base_page: u8) -> Self {
        Self { bus, base_page }
    }

    #[inline]
    pub fn base_page(&self) -> u8 {
        self.base_page
    }

    /// Only the port layer may move the page, and only after the GAL has
    /// been told about it.
    pub(crate) fn set_base_page(&mut self, base_page: u8) {
        self.base_page = base_page;
    }

    pub fn read_register(&mut self, offset: u32) -> Result<u32> {
        let address = self.checked_address(offset)?;
        let value = self.bus.read32(address);
        log::trace!("read  {address:#010x} -> {value:#010x}");
        Ok(value)
    }

    pub fn write_register(&mut self, offset: u32, value: u32) -> Result<()> {
        let address = self.checked_address(offset)?;
        log::trace!("write {address:#010x} <- {value:#010x}");
        self.bus.write32(address, value);
        Ok(())
    }

    fn checked_address(&self, offset: u32) -> Result<u32> {
        let address = physical_address(self.base_page, offset);
        if !self.bus.is_accessible(address) {
            return Err(Error::AddressOutOfRange { address });
        }
        Ok(address)
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_inner(self) -> B {
        self.bus
    }
}
