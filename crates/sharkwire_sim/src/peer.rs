use sharkwire_modem::{LineConfig, Pins, FRAME_LEN};
use typed_builder::TypedBuilder;

use crate::{ticks_from_ms, ticks_from_us};

/// Behaviour of the simulated modem.
#[derive(Copy, Clone, Debug, TypedBuilder)]
pub struct PeerConfig {
    /// Time from the end of the ready pulse to CTS going low. `None` models
    /// a cartridge with no modem answering.
    #[builder(default = Some(150))]
    pub answer_delay_ms: Option<u64>,
    /// Shortest ready pulse the modem's detector reacts to.
    #[builder(default = 200)]
    pub min_ready_ms: u64,
    /// Bytes accepted before CTS is raised again. `None` = unlimited.
    #[builder(default)]
    pub capacity: Option<usize>,
    /// Wiring and framing the modem expects.
    #[builder(default)]
    pub line: LineConfig,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Pin word currently on the line and when it was written.
#[derive(Copy, Clone, Debug)]
struct Held {
    pins: u16,
    since: u64,
    sampled: bool,
}

/// SharkWire modem on the far side of the GAL pins.
///
/// The receiver samples each written pin word once it has been held for a
/// bit period. Words held shorter are glitches; words held two bit periods
/// or more mean the line went idle, which drops any partial frame.
/// Sampling is lazy: it happens whenever the host touches the GAL.
pub struct SimModem {
    config: PeerConfig,
    bit_ticks: u64,
    ready_since: Option<u64>,
    answer_at: Option<u64>,
    forced_cts: Option<bool>,
    held: Option<Held>,
    symbols: Vec<u16>,
    received: Vec<u8>,
    framing_errors: usize,
}

impl Default for SimModem {
    fn default() -> Self {
        Self::new(PeerConfig::default())
    }
}

impl SimModem {
    pub fn new(config: PeerConfig) -> Self {
        Self {
            bit_ticks: ticks_from_us(config.line.bit_period_us()),
            config,
            ready_since: None,
            answer_at: None,
            forced_cts: None,
            held: None,
            symbols: Vec::with_capacity(FRAME_LEN),
            received: Vec::new(),
            framing_errors: 0,
        }
    }

    /// No modem answering the handshake.
    pub fn absent() -> Self {
        Self::new(PeerConfig::builder().answer_delay_ms(None).build())
    }

    pub fn config(&self) -> &PeerConfig {
        &self.config
    }

    /// Bytes decoded from the TX line so far.
    pub fn received(&self) -> &[u8] {
        &self.received
    }

    pub fn framing_errors(&self) -> usize {
        self.framing_errors
    }

    /// Whether a long enough ready pulse has been seen.
    pub fn answered(&self) -> bool {
        self.answer_at.is_some()
    }

    /// Pin CTS regardless of handshake state; `None` hands it back.
    pub fn force_clear_to_send(&mut self, clear: Option<bool>) {
        self.forced_cts = clear;
    }

    pub fn clear_to_send(&self, now: u64) -> bool {
        if let Some(clear) = self.forced_cts {
            return clear;
        }
        let answered = self.answer_at.is_some_and(|at| now >= at);
        let has_room = self
            .config
            .capacity
            .map_or(true, |capacity| self.received.len() < capacity);
        answered && has_room
    }

    /// Levels the modem drives onto the GAL inputs.
    pub(crate) fn inputs(&mut self, now: u64) -> u16 {
        self.sample(now);
        // RX idles high; nothing is ever sent back.
        let mut pins = Pins::RX.bits();
        if !self.clear_to_send(now) {
            pins |= self.config.line.cts_mask;
        }
        pins
    }

    /// Host wrote `pins` (already masked to outputs) at `now`.
    pub(crate) fn drive(&mut self, pins: u16, now: u64) {
        self.sample(now);
        self.track_ready(pins, now);

        if let Some(prev) = self.held.take() {
            if now.wrapping_sub(prev.since) >= 2 * self.bit_ticks && !self.symbols.is_empty() {
                log::debug!("line idle mid-frame, dropping {} symbols", self.symbols.len());
                self.symbols.clear();
            }
        }
        self.held = Some(Held {
            pins,
            since: now,
            sampled: false,
        });
    }

    fn track_ready(&mut self, pins: u16, now: u64) {
        let line = &self.config.line;
        let ready_bits = line.ready_pattern & !line.idle_pattern;
        let raised = ready_bits != 0 && pins & ready_bits == ready_bits;

        match (self.ready_since, raised) {
            (None, true) => self.ready_since = Some(now),
            (Some(since), false) => {
                self.ready_since = None;
                if now.wrapping_sub(since) < ticks_from_ms(self.config.min_ready_ms) {
                    log::debug!("ready pulse too short, ignored");
                } else if let Some(delay) = self.config.answer_delay_ms {
                    log::debug!("ready pulse seen, answering in {delay} ms");
                    self.answer_at = Some(now + ticks_from_ms(delay));
                }
            }
            _ => {}
        }
    }

    fn sample(&mut self, now: u64) {
        let symbol = match self.held.as_mut() {
            Some(held) if !held.sampled => {
                let age = now.wrapping_sub(held.since);
                if age < self.bit_ticks || age >= 2 * self.bit_ticks {
                    return;
                }
                held.sampled = true;
                held.pins
            }
            _ => return,
        };
        self.push_symbol(symbol);
    }

    fn push_symbol(&mut self, symbol: u16) {
        if self.symbols.is_empty() && symbol != self.config.line.frame_patterns().start {
            return;
        }
        self.symbols.push(symbol);
        if self.symbols.len() < FRAME_LEN {
            return;
        }

        match self.decode_frame() {
            Some(byte) => {
                log::debug!("rx {byte:#04x}");
                self.received.push(byte);
            }
            None => {
                log::warn!("framing error: {:04x?}", self.symbols);
                self.framing_errors += 1;
            }
        }
        self.symbols.clear();
    }

    fn decode_frame(&self) -> Option<u8> {
        let frame = self.config.line.frame_patterns();
        if self.symbols[FRAME_LEN - 1] != frame.stop {
            return None;
        }
        self.symbols[1..FRAME_LEN - 1]
            .iter()
            .enumerate()
            .try_fold(0u8, |byte, (bit, &symbol)| {
                if symbol == frame.one {
                    Some(byte | (1 << bit))
                } else if symbol == frame.zero {
                    Some(byte)
                } else {
                    None
                }
            })
    }
}
