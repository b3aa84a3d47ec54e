use anyhow::{Context, Result};
use sharkwire_common::{Clock, PiBus, StatusDisplay};
use sharkwire_modem::{GalPort, LineConfig, Modem, DEFAULT_BASE_PAGE, RELOCATED_BASE_PAGE};
use sharkwire_sim::{Gal, PeerConfig, SimBus, SimClock, SimModem, SimTime};

/// Bytes a busy modem accepts when no count is given.
const DEFAULT_BUSY_CAPACITY: usize = 2;

/// What sits on the other end of the simulated cartridge.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Scenario {
    /// Modem answers the handshake and takes everything.
    Ready,
    /// Nothing answers the handshake.
    Absent,
    /// Modem answers but raises CTS after this many bytes.
    Busy(usize),
}

impl Scenario {
    /// Parse `ready`, `absent`, `busy` or `busy:<bytes>`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ready" | "modem" => Some(Scenario::Ready),
            "absent" | "none" => Some(Scenario::Absent),
            "busy" => Some(Scenario::Busy(DEFAULT_BUSY_CAPACITY)),
            other => other
                .strip_prefix("busy:")
                .and_then(|n| n.parse().ok())
                .map(Scenario::Busy),
        }
    }

    fn peer(self) -> SimModem {
        match self {
            Scenario::Ready => SimModem::default(),
            Scenario::Absent => SimModem::absent(),
            Scenario::Busy(capacity) => {
                SimModem::new(PeerConfig::builder().capacity(Some(capacity)).build())
            }
        }
    }
}

/// Outcome of one bring-up and send.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Session {
    pub initialised: bool,
    pub sent: usize,
    /// What the simulated modem decoded off the TX line.
    pub received: Vec<u8>,
}

/// Prints the status line the way the cartridge menu shows it.
pub struct ConsoleStatus;

impl StatusDisplay for ConsoleStatus {
    fn show_modem_status(&mut self, initialised: bool) {
        println!("Modem initialised: {}", if initialised { "yes" } else { "no" });
    }
}

/// Relocate the GAL, bring the line up, report it, and send `command` if
/// the modem answered. Returns whether it answered and how many bytes went
/// out.
pub fn drive<B: PiBus, C: Clock>(
    modem: &mut Modem<B, C>,
    command: &[u8],
    display: &mut impl StatusDisplay,
) -> Result<(bool, usize)> {
    modem
        .port_mut()
        .set_base_page(RELOCATED_BASE_PAGE)
        .context("relocating the GAL")?;

    let initialised = modem.init().context("initialising the modem")?;
    display.show_modem_status(initialised);
    if !initialised {
        return Ok((false, 0));
    }

    let sent = modem.transmit(command).context("sending command")?;
    if sent < command.len() {
        log::warn!("modem stopped accepting after {sent} of {} bytes", command.len());
    }
    Ok((true, sent))
}

/// Run `command` against the simulated cartridge described by `scenario`.
pub fn run(
    scenario: Scenario,
    command: &[u8],
    display: &mut impl StatusDisplay,
) -> Result<Session> {
    log::info!("simulating {scenario:?}");

    let time = SimTime::new();
    let bus = SimBus::new(time.clone(), Gal::new(scenario.peer()));
    let port = GalPort::new(bus, DEFAULT_BASE_PAGE);
    let mut modem = Modem::new(port, SimClock::new(time), LineConfig::default());

    let (initialised, sent) = drive(&mut modem, command, display)?;
    let (port, clock) = modem.into_parts();
    log::debug!("session took {} ticks", clock.ticks());
    let bus = port.into_bus();

    Ok(Session {
        initialised,
        sent,
        received: bus.modem().received().to_vec(),
    })
}

#[cfg(test)]
mod tests;
