use sharkwire_common::{Clock, PiBus};

use super::Modem;
use crate::{encode_byte, Result};

impl<B: PiBus, C: Clock> Modem<B, C> {
    /// Clock `buffer` out on TX and return how many bytes went out whole.
    ///
    /// Flow control is sampled once before each byte. When the modem is not
    /// clear to send the loop stops there; that is a short count, not an
    /// error. CTS is not re-sampled inside a byte, so a modem that drops it
    /// mid-frame may garble that byte.
    ///
    /// The idle pattern is written back however the loop ends, including
    /// when a fatal bus error cuts it short; that error is still returned.
    pub fn transmit(&mut self, buffer: &[u8]) -> Result<usize> {
        let sent = self.idle().and_then(|()| self.transmit_frames(buffer));
        let restored = self.idle();
        let sent = sent?;
        restored?;

        log::info!("sent {sent} of {} bytes", buffer.len());
        Ok(sent)
    }

    fn transmit_frames(&mut self, buffer: &[u8]) -> Result<usize> {
        let bit_ticks = self.clock.ticks_from_us(self.config.bit_period_us());
        let patterns = self.config.frame_patterns();

        for (sent, &byte) in buffer.iter().enumerate() {
            if !self.clear_to_send()? {
                log::warn!("modem not clear to send, stopping after {sent} bytes");
                return Ok(sent);
            }

            log::debug!("tx {byte:#04x}");
            for word in encode_byte(byte, &patterns) {
                self.port.write_pins(word)?;
                self.clock.wait_ticks(bit_ticks);
            }
        }

        Ok(buffer.len())
    }
}
