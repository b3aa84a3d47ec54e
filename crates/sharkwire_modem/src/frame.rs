use crate::FramePatterns;

/// Encoded words per source byte: start, eight data bits, stop.
pub const FRAME_LEN: usize = 10;

/// One source byte as the sequence of pin-port words that clock it out.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Frame(pub [u16; FRAME_LEN]);

impl Frame {
    #[inline]
    pub fn words(&self) -> &[u16; FRAME_LEN] {
        &self.0
    }
}

impl IntoIterator for Frame {
    type Item = u16;
    type IntoIter = std::array::IntoIter<u16, FRAME_LEN>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Encode `byte` LSB first between the start and stop patterns.
pub fn encode_byte(byte: u8, patterns: &FramePatterns) -> Frame {
    let mut frame = [0u16; FRAME_LEN];
    frame[0] = patterns.start;
    frame[FRAME_LEN - 1] = patterns.stop;
    for bit in 0..8 {
        frame[bit + 1] = if byte & (1 << bit) != 0 {
            patterns.one
        } else {
            patterns.zero
        };
    }
    Frame(frame)
}
