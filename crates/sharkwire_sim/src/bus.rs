use sharkwire_common::PiBus;

use crate::{Gal, SimModem, SimTime, OPEN_BUS, PI_ACCESS_TICKS};

/// Address ranges the PI can reach (cartridge domains 1 and 2).
const PI_RANGES: [(u32, u32); 5] = [
    (0x0500_0000, 0x05FF_FFFF),
    (0x0600_0000, 0x07FF_FFFF),
    (0x0800_0000, 0x0FFF_FFFF),
    (0x1000_0000, 0x1FBF_FFFF),
    (0x1FD0_0000, 0x7FFF_FFFF),
];

/// PI bus with the GAL plugged into the cartridge slot.
///
/// Every access costs [`PI_ACCESS_TICKS`] of virtual time.
pub struct SimBus {
    time: SimTime,
    gal: Gal,
    accesses: u64,
}

impl SimBus {
    pub fn new(time: SimTime, gal: Gal) -> Self {
        Self {
            time,
            gal,
            accesses: 0,
        }
    }

    pub fn gal(&self) -> &Gal {
        &self.gal
    }

    pub fn gal_mut(&mut self) -> &mut Gal {
        &mut self.gal
    }

    pub fn modem(&self) -> &SimModem {
        self.gal.modem()
    }

    pub fn modem_mut(&mut self) -> &mut SimModem {
        self.gal.modem_mut()
    }

    pub fn time(&self) -> &SimTime {
        &self.time
    }

    /// Number of reads and writes issued so far.
    pub fn accesses(&self) -> u64 {
        self.accesses
    }

    fn begin_access(&mut self, address: u32) -> u64 {
        if !self.is_accessible(address) {
            log::warn!("PI access to unreachable address {address:#010x}");
        }
        self.accesses += 1;
        self.time.advance(PI_ACCESS_TICKS)
    }
}

impl PiBus for SimBus {
    fn is_accessible(&self, address: u32) -> bool {
        PI_RANGES
            .iter()
            .any(|&(start, end)| (start..=end).contains(&address))
    }

    fn read32(&mut self, address: u32) -> u32 {
        let now = self.begin_access(address);
        if !self.is_accessible(address) {
            return OPEN_BUS;
        }
        self.gal.read(address, now)
    }

    fn write32(&mut self, address: u32, value: u32) {
        let now = self.begin_access(address);
        if self.is_accessible(address) {
            self.gal.write(address, value, now);
        }
    }
}
