use super::{LineState, Modem};
use crate::testing::{CtsScript, ManualClock, RecordingBus};
use crate::{encode_byte, Error, GalPort, LineConfig, DEFAULT_BASE_PAGE};

const IDLE: u16 = 0x00C8;
const READY: u16 = 0x04C8;

fn modem(cts: CtsScript, step: u64) -> Modem<RecordingBus, ManualClock> {
    Modem::new(
        GalPort::new(RecordingBus::new(cts), DEFAULT_BASE_PAGE),
        ManualClock::new(step),
        LineConfig::default(),
    )
}

fn pin_writes(modem: &Modem<RecordingBus, ManualClock>) -> Vec<u16> {
    modem.port().bus().pin_writes(DEFAULT_BASE_PAGE)
}

#[test]
fn init_drives_directions_idle_and_ready_pulse() {
    let mut modem = modem(CtsScript::Always, 1);
    assert_eq!(modem.state(), LineState::Unconfigured);

    assert_eq!(modem.init(), Ok(true));
    assert_eq!(modem.state(), LineState::Ready);

    assert_eq!(
        modem.port().bus().writes,
        vec![
            (0x1040_0600, 0x04D9_04D9),
            (0x1040_0800, 0x00C8_00C8),
            (0x1040_0800, 0x04C8_04C8),
            (0x1040_0800, 0x00C8_00C8),
        ]
    );
    // Settle delay only; the poll itself never sleeps.
    assert_eq!(modem.clock().waits, vec![200_000]);
}

#[test]
fn init_succeeds_once_cts_clears_inside_the_window() {
    let mut modem = modem(CtsScript::After(5), 10);
    let start = modem.clock().now();

    assert_eq!(modem.init(), Ok(true));

    let elapsed = modem.clock().now() - start;
    assert!(elapsed < 200_000 + 2_000_000, "elapsed {elapsed}");
    assert_eq!(modem.port().bus().reads, 6);
}

#[test]
fn init_times_out_after_the_full_window() {
    let step = 1_000;
    let mut modem = modem(CtsScript::Never, step);
    let start = modem.clock().now();

    assert_eq!(modem.init(), Ok(false));
    assert_eq!(modem.state(), LineState::TimedOut);

    // One poll iteration reads the clock once and the pins once.
    let elapsed = modem.clock().now() - start;
    let window = 200_000 + 2_000_000;
    assert!(elapsed >= window, "elapsed {elapsed}");
    assert!(elapsed <= window + 2 * step, "elapsed {elapsed}");
    assert_eq!(pin_writes(&modem).last(), Some(&IDLE));
}

#[test]
fn init_honours_custom_timing() {
    let config = LineConfig::builder()
        .settle_ms(50)
        .handshake_timeout_ms(10)
        .build();
    let mut modem = Modem::new(
        GalPort::new(RecordingBus::new(CtsScript::Never), DEFAULT_BASE_PAGE),
        ManualClock::new(100),
        config,
    );

    assert_eq!(modem.init(), Ok(false));
    assert_eq!(modem.clock().waits, vec![50_000]);
    assert!(modem.clock().now() >= 60_000);
}

#[test]
fn init_is_fatal_on_unmapped_gal() {
    let mut bus = RecordingBus::new(CtsScript::Always);
    bus.accessible = 0x0500_0000..=0x05FF_FFFF;
    let mut modem = Modem::new(
        GalPort::new(bus, DEFAULT_BASE_PAGE),
        ManualClock::new(1),
        LineConfig::default(),
    );

    assert_eq!(
        modem.init(),
        Err(Error::AddressOutOfRange {
            address: 0x1040_0600
        })
    );
    assert_eq!(modem.state(), LineState::Unconfigured);
    assert!(modem.port().bus().writes.is_empty());
}

#[test]
fn transmit_empty_buffer_leaves_line_idle() {
    let mut modem = modem(CtsScript::Always, 1);

    assert_eq!(modem.transmit(&[]), Ok(0));
    assert_eq!(pin_writes(&modem), vec![IDLE, IDLE]);
    assert_eq!(modem.port().bus().reads, 0);
    assert!(modem.clock().waits.is_empty());
}

#[test]
fn transmit_stops_before_first_byte_without_cts() {
    let mut modem = modem(CtsScript::Never, 1);

    assert_eq!(modem.transmit(b"ATZ\r"), Ok(0));
    assert_eq!(pin_writes(&modem), vec![IDLE, IDLE]);
    assert_eq!(modem.port().bus().reads, 1);
}

#[test]
fn transmit_sends_whole_buffer_with_cts() {
    let mut modem = modem(CtsScript::Always, 1);
    let command = b"AT\r";

    assert_eq!(modem.transmit(command), Ok(command.len()));

    let writes = pin_writes(&modem);
    assert_eq!(writes.len(), 1 + 10 * command.len() + 1);
    assert_eq!(writes.first(), Some(&IDLE));
    assert_eq!(writes.last(), Some(&IDLE));

    let patterns = modem.config().frame_patterns();
    for (i, &byte) in command.iter().enumerate() {
        let expected: Vec<u16> = encode_byte(byte, &patterns).into_iter().collect();
        assert_eq!(&writes[1 + i * 10..11 + i * 10], expected.as_slice());
    }

    // One bit period after every encoded byte.
    assert_eq!(modem.clock().waits, vec![50; 10 * command.len()]);
    assert_eq!(modem.port().bus().reads, command.len());
}

#[test]
fn transmit_stops_at_byte_boundary_when_cts_drops() {
    let mut modem = modem(CtsScript::First(2), 1);

    assert_eq!(modem.transmit(b"ATZ\r"), Ok(2));

    let writes = pin_writes(&modem);
    assert_eq!(writes.len(), 1 + 2 * 10 + 1);
    let patterns = modem.config().frame_patterns();
    assert_eq!(&writes[1..11], encode_byte(b'A', &patterns).0);
    assert_eq!(&writes[11..21], encode_byte(b'T', &patterns).0);
    assert_eq!(writes.last(), Some(&IDLE));
    assert_eq!(modem.clock().waits.len(), 20);
}

#[test]
fn transmit_holds_corrected_aux_lines_through_the_frame() {
    let config = LineConfig::builder().idle_pattern(0x00C9).build();
    let mut modem = Modem::new(
        GalPort::new(RecordingBus::new(CtsScript::Always), DEFAULT_BASE_PAGE),
        ManualClock::new(1),
        config,
    );

    assert_eq!(modem.transmit(&[0x00]), Ok(1));

    let writes = pin_writes(&modem);
    assert_eq!(
        writes,
        vec![
            0x00C9, // idle
            0x00C9, // start
            0x00C1, 0x00C1, 0x00C1, 0x00C1, 0x00C1, 0x00C1, 0x00C1, 0x00C1,
            0x00C1, // stop
            0x00C9, // idle
        ]
    );
    // Bit 0 is an aux output; only TX may move.
    assert!(writes.iter().all(|w| w & 0x0001 != 0));
}

#[test]
fn transmit_does_not_raise_ready_pulse() {
    let mut modem = modem(CtsScript::Always, 1);
    modem.transmit(&[0xFF, 0x00]).unwrap();
    assert!(!pin_writes(&modem).contains(&READY));
}

#[test]
fn transmit_is_fatal_on_unmapped_gal() {
    let mut bus = RecordingBus::new(CtsScript::Always);
    bus.accessible = 0x0500_0000..=0x05FF_FFFF;
    let mut modem = Modem::new(
        GalPort::new(bus, DEFAULT_BASE_PAGE),
        ManualClock::new(1),
        LineConfig::default(),
    );

    assert!(matches!(
        modem.transmit(b"AT"),
        Err(Error::AddressOutOfRange { .. })
    ));
    assert!(modem.port().bus().writes.is_empty());
}
