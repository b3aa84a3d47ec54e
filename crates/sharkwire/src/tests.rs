use sharkwire_common::StatusDisplay;
use sharkwire_modem::{Error, GalPort, LineConfig, Modem};
use sharkwire_sim::{Gal, SimBus, SimClock, SimModem, SimTime};

use super::{drive, run, Scenario};

#[derive(Default)]
struct RecordingDisplay {
    shown: Vec<bool>,
}

impl StatusDisplay for RecordingDisplay {
    fn show_modem_status(&mut self, initialised: bool) {
        self.shown.push(initialised);
    }
}

#[test]
fn scenario_names_parse() {
    assert_eq!(Scenario::parse("ready"), Some(Scenario::Ready));
    assert_eq!(Scenario::parse("absent"), Some(Scenario::Absent));
    assert_eq!(Scenario::parse("busy"), Some(Scenario::Busy(2)));
    assert_eq!(Scenario::parse("busy:7"), Some(Scenario::Busy(7)));
    assert_eq!(Scenario::parse("busy:x"), None);
    assert_eq!(Scenario::parse("gb"), None);
}

#[test]
fn ready_modem_receives_command() {
    let mut display = RecordingDisplay::default();
    let session = run(Scenario::Ready, b"ATZ\r", &mut display).unwrap();

    assert_eq!(display.shown, vec![true]);
    assert!(session.initialised);
    assert_eq!(session.sent, 4);
    assert_eq!(session.received, b"ATZ\r");
}

#[test]
fn absent_modem_reports_no_and_sends_nothing() {
    let mut display = RecordingDisplay::default();
    let session = run(Scenario::Absent, b"ATZ\r", &mut display).unwrap();

    assert_eq!(display.shown, vec![false]);
    assert!(!session.initialised);
    assert_eq!(session.sent, 0);
    assert!(session.received.is_empty());
}

#[test]
fn busy_modem_takes_partial_command() {
    let mut display = RecordingDisplay::default();
    let session = run(Scenario::Busy(3), b"ATDT1\r", &mut display).unwrap();

    assert_eq!(display.shown, vec![true]);
    assert_eq!(session.sent, 3);
    assert_eq!(session.received, b"ATD");
}

#[test]
fn unmapped_cartridge_is_fatal_before_reporting() {
    let time = SimTime::new();
    let bus = SimBus::new(time.clone(), Gal::new(SimModem::default()));
    let mut modem = Modem::new(
        GalPort::new(bus, 0x90),
        SimClock::new(time),
        LineConfig::default(),
    );
    let mut display = RecordingDisplay::default();

    let err = drive(&mut modem, b"ATZ\r", &mut display).unwrap_err();

    assert!(display.shown.is_empty());
    assert_eq!(
        err.downcast_ref::<Error>(),
        Some(&Error::AddressOutOfRange {
            address: 0x9040_0400
        })
    );
}
