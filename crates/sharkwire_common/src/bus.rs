/// Raw access to the console's peripheral interface (PI) bus.
///
/// Addresses are full 32-bit physical bus addresses. Implementations do not
/// validate on `read32`/`write32`; callers are expected to check
/// `is_accessible` first and treat a miss as a broken configuration.
pub trait PiBus {
    /// Whether `address` falls inside a range the PI can reach.
    fn is_accessible(&self, address: u32) -> bool;
    fn read32(&mut self, address: u32) -> u32;
    fn write32(&mut self, address: u32, value: u32);
}
