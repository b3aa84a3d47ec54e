use bitflags::bitflags;

bitflags! {
    /// GAL pin assignment as wired on the SharkWire cartridge.
    ///
    /// Bits 12-15 are not wired to anything known. Several of the other
    /// assignments are untested, which is why the driver takes its masks
    /// from [`LineConfig`](crate::LineConfig) instead of from here directly.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct Pins: u16 {
        const OUT0 = 1 << 0;
        const IN1 = 1 << 1;
        /// Receive data from the modem.
        const RX = 1 << 2;
        /// Transmit data to the modem.
        const TX = 1 << 3;
        /// Request-to-send, active low.
        const RTS = 1 << 4;
        /// Clear-to-send from the modem, active low.
        const CTS = 1 << 5;
        const OUT6 = 1 << 6;
        const OUT7 = 1 << 7;
        const IN8 = 1 << 8;
        const IN9 = 1 << 9;
        /// Raised together with the idle pattern to announce the host.
        const OUT10 = 1 << 10;
        const IN11 = 1 << 11;
    }
}

impl Pins {
    /// Every pin the GAL drives.
    pub const OUTPUTS: Pins = Pins::OUT0
        .union(Pins::TX)
        .union(Pins::RTS)
        .union(Pins::OUT6)
        .union(Pins::OUT7)
        .union(Pins::OUT10);

    /// TX high with the auxiliary outputs at their resting levels.
    pub const IDLE: Pins = Pins::TX.union(Pins::OUT6).union(Pins::OUT7);

    /// Idle levels plus the ready pulse.
    pub const READY: Pins = Pins::IDLE.union(Pins::OUT10);
}
