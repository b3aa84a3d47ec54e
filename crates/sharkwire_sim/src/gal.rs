use sharkwire_modem::{PortOffset, DEFAULT_BASE_PAGE, IO_WINDOW};

use crate::{SimModem, OPEN_BUS};

/// GameShark GAL IO block.
///
/// It only answers inside the IO window of its current base page. Pin reads
/// mix the output latch (for pins set as outputs) with whatever the modem
/// drives on the inputs.
pub struct Gal {
    base_page: u8,
    directions: u16,
    latch: u16,
    modem: SimModem,
}

impl Gal {
    pub fn new(modem: SimModem) -> Self {
        Self {
            base_page: DEFAULT_BASE_PAGE,
            directions: 0,
            latch: 0,
            modem,
        }
    }

    pub fn base_page(&self) -> u8 {
        self.base_page
    }

    pub fn directions(&self) -> u16 {
        self.directions
    }

    pub fn latch(&self) -> u16 {
        self.latch
    }

    pub fn modem(&self) -> &SimModem {
        &self.modem
    }

    pub fn modem_mut(&mut self) -> &mut SimModem {
        &mut self.modem
    }

    fn decode(&self, address: u32) -> Option<PortOffset> {
        if (address >> 24) as u8 != self.base_page || (address >> 16) as u8 != IO_WINDOW {
            return None;
        }
        PortOffset::from_offset(address as u16)
    }

    /// Level of every pin as seen from the read-pins register.
    pub fn pins(&mut self, now: u64) -> u16 {
        let inputs = self.modem.inputs(now);
        (self.latch & self.directions) | (inputs & !self.directions)
    }

    pub(crate) fn read(&mut self, address: u32, now: u64) -> u32 {
        match self.decode(address) {
            Some(PortOffset::ReadPins) => {
                let pins = self.pins(now) as u32;
                (pins << 16) | pins
            }
            Some(port) => {
                log::trace!("read of write-only GAL port {port:?}");
                OPEN_BUS
            }
            None => OPEN_BUS,
        }
    }

    pub(crate) fn write(&mut self, address: u32, value: u32, now: u64) {
        let Some(port) = self.decode(address) else {
            log::trace!("write {address:#010x} missed the GAL at page {:#04x}", self.base_page);
            return;
        };

        // Both halves carry the same data; the GAL latches the low one.
        let data = value as u16;
        match port {
            PortOffset::SetBase => {
                log::debug!("GAL moved to base page {:#04x}", data as u8);
                self.base_page = data as u8;
            }
            PortOffset::SetDirections => self.directions = data,
            PortOffset::WritePins => {
                self.latch = data;
                self.modem.drive(self.latch & self.directions, now);
            }
            PortOffset::ReadPins => {}
        }
    }
}
