//! Logical output channels and their path to physical pins.
//!
//! ```text
//! ChannelState bit i  ──►  ChannelMap entry i  ──►  PinBank slot
//! ```
//!
//! The index correspondence is the whole contract: bit 0 of the mask is
//! channel 1 on the host side, entry 0 of the map, and whatever pin that
//! entry names. An off-by-one anywhere along this path swaps outputs.

pub mod driver;
pub mod map;
pub mod sync;

#[cfg(test)]
pub(crate) mod mock;

pub use driver::{OutputDriver, PinBank};
pub use map::ChannelMap;
pub use sync::StateSynchronizer;

/// Upper bound on channels: one bit each in a `u32` mask.
pub const MAX_CHANNELS: usize = 32;

/// Desired on/off state of every channel, bit `i` = channel `i`.
///
/// Active-high at this level: a set bit means "on", regardless of the
/// electrical polarity of the output stage.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelState(u32);

impl ChannelState {
    /// Every channel off. The state at power-up.
    pub const ALL_OFF: Self = Self(0);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// `true` if `channel` is on. Channels past bit 31 are always off.
    pub const fn is_on(self, channel: usize) -> bool {
        channel < MAX_CHANNELS && (self.0 >> channel) & 1 != 0
    }

    /// Copy of `self` with `channel` switched to `on`.
    pub const fn with(self, channel: usize, on: bool) -> Self {
        if channel >= MAX_CHANNELS {
            return self;
        }
        if on {
            Self(self.0 | (1 << channel))
        } else {
            Self(self.0 & !(1 << channel))
        }
    }

    /// Keep only the low `channels` bits.
    pub const fn truncate(self, channels: usize) -> Self {
        if channels >= MAX_CHANNELS {
            self
        } else {
            Self(self.0 & ((1u32 << channels) - 1))
        }
    }

    /// Number of channels switched on.
    pub const fn count_on(self) -> u32 {
        self.0.count_ones()
    }
}

impl From<u32> for ChannelState {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

/// Index into the board's pin bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(u8);

impl PinId {
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Electrical convention of the output stage.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// On → logic high.
    #[default]
    ActiveHigh,
    /// On → logic low (LED sinking into the GPIO).
    ActiveLow,
}

impl Polarity {
    /// Pin level (`true` = high) that realises `on`.
    pub const fn level(self, on: bool) -> bool {
        match self {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        }
    }
}
