use std::default::Default;
use texture::Texel;

/// A color channel of an 8-bit texel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Maps normal map color channels to the x, y and z axes of the decoded normal.
///
/// Normal maps from different tools disagree on the channel order, so the
/// swizzle has to be calibrated against the maps in use. The default reads
/// green as x, red as y and blue as z.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalEncoding {
    pub channels: [Channel; 3],
}

impl NormalEncoding {
    pub fn rgb() -> Self {
        NormalEncoding {
            channels: [Channel::Red, Channel::Green, Channel::Blue],
        }
    }

    /// Picks the encoded values for x, y and z from the given texel, in [0, 255].
    pub fn swizzle(&self, texel: &Texel) -> [f32; 3] {
        [
            texel.channel(self.channels[0]),
            texel.channel(self.channels[1]),
            texel.channel(self.channels[2]),
        ]
    }
}

impl Default for NormalEncoding {
    fn default() -> Self {
        NormalEncoding {
            channels: [Channel::Green, Channel::Red, Channel::Blue],
        }
    }
}
