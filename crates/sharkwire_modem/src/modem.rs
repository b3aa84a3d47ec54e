use sharkwire_common::{Clock, PiBus};

use crate::{GalPort, LineConfig, Result};

mod line;
mod transmit;

/// Progress of the line bring-up sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum LineState {
    #[default]
    Unconfigured,
    DirectionsSet,
    /// Idle pattern on the pins, ready pulse not raised yet.
    IdleHigh,
    ReadyAsserted,
    /// Back to idle after the ready pulse, waiting for clear-to-send.
    IdleSettled,
    Ready,
    TimedOut,
}

/// Software UART talking to the SharkWire modem through the GAL.
///
/// All bus traffic goes through the owned [`GalPort`]; all waiting goes
/// through the owned [`Clock`]. Nothing here is reentrant.
pub struct Modem<B, C> {
    port: GalPort<B>,
    clock: C,
    config: LineConfig,
    state: LineState,
}

impl<B: PiBus, C: Clock> Modem<B, C> {
    pub fn new(port: GalPort<B>, clock: C, config: LineConfig) -> Self {
        Self {
            port,
            clock,
            config,
            state: LineState::Unconfigured,
        }
    }

    #[inline]
    pub fn state(&self) -> LineState {
        self.state
    }

    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    pub fn port(&self) -> &GalPort<B> {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut GalPort<B> {
        &mut self.port
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_parts(self) -> (GalPort<B>, C) {
        (self.port, self.clock)
    }

    fn enter(&mut self, state: LineState) {
        log::debug!("line {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    fn clear_to_send(&mut self) -> Result<bool> {
        let pins = self.port.read_pins()?;
        Ok(self.config.clear_to_send(pins))
    }

    fn idle(&mut self) -> Result<()> {
        self.port.write_pins(self.config.idle_pattern)
    }
}

#[cfg(test)]
mod tests;
