use core::ops::Index;

/// One RGB color channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in sample order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of this channel within an R, G, B sample triple.
    pub fn offset(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

/// An RGB triple of channel values in `0..=maxval`.
///
/// Pixels are values: transforms build a new pixel instead of mutating one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Pixel {
    pub const fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }

    /// A pixel with all three channels set to `v`.
    pub const fn gray(v: u16) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Channels in R, G, B order.
    pub fn channels(self) -> [u16; 3] {
        [self.r, self.g, self.b]
    }

    /// Build a pixel by mapping every channel through `f`.
    pub fn map(self, mut f: impl FnMut(u16) -> u16) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Copy of this pixel with `channel` replaced by `value`.
    pub fn with(self, channel: Channel, value: u16) -> Self {
        match channel {
            Channel::Red => Self { r: value, ..self },
            Channel::Green => Self { g: value, ..self },
            Channel::Blue => Self { b: value, ..self },
        }
    }
}

impl Index<Channel> for Pixel {
    type Output = u16;

    fn index(&self, channel: Channel) -> &u16 {
        match channel {
            Channel::Red => &self.r,
            Channel::Green => &self.g,
            Channel::Blue => &self.b,
        }
    }
}

impl From<[u16; 3]> for Pixel {
    fn from([r, g, b]: [u16; 3]) -> Self {
        Self::new(r, g, b)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB16> for Pixel {
    fn from(p: rgb::RGB16) -> Self {
        Self::new(p.r, p.g, p.b)
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGB16 {
    fn from(p: Pixel) -> Self {
        rgb::RGB16::new(p.r, p.g, p.b)
    }
}
