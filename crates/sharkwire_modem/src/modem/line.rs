use sharkwire_common::{Clock, PiBus};

use super::{LineState, Modem};
use crate::Result;

impl<B: PiBus, C: Clock> Modem<B, C> {
    /// Bring the line up and wait for the modem to answer.
    ///
    /// Returns `Ok(true)` once clear-to-send is seen and `Ok(false)` if the
    /// handshake timeout runs out first. A silent modem and a slow one look
    /// the same from here. `Err` only carries fatal bus errors.
    pub fn init(&mut self) -> Result<bool> {
        self.state = LineState::Unconfigured;

        self.port.set_directions(self.config.directions)?;
        self.enter(LineState::DirectionsSet);

        self.idle()?;
        self.enter(LineState::IdleHigh);

        // TX stays high; the modem only reacts if the pulse is held long
        // enough for its detector.
        self.port.write_pins(self.config.ready_pattern)?;
        self.enter(LineState::ReadyAsserted);
        self.clock.wait_ms(self.config.settle_ms);

        self.idle()?;
        self.enter(LineState::IdleSettled);

        if self.poll_clear_to_send()? {
            self.enter(LineState::Ready);
            log::info!("modem clear to send");
            Ok(true)
        } else {
            self.enter(LineState::TimedOut);
            log::warn!(
                "modem did not clear to send within {} ms",
                self.config.handshake_timeout_ms
            );
            Ok(false)
        }
    }

    /// Tight poll on the CTS sense bit, bounded by elapsed ticks only.
    fn poll_clear_to_send(&mut self) -> Result<bool> {
        let timeout = self.clock.ticks_from_ms(self.config.handshake_timeout_ms);
        let start = self.clock.ticks();
        while self.clock.ticks_since(start) < timeout {
            if self.clear_to_send()? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
