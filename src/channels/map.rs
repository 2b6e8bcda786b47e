//! Channel → pin table.
//!
//! Built once at startup from the board configuration and never mutated.
//! Construction rejects anything that would make two channels fight over
//! one pin or point at hardware that does not exist.

use super::{PinId, MAX_CHANNELS};
use crate::error::{ConfigError, Result};

/// Fixed-size table of `N` entries, each mapped to a pin or left empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelMap<const N: usize> {
    slots: [Option<PinId>; N],
    pin_count: usize,
}

impl<const N: usize> ChannelMap<N> {
    /// Validate `pins` against a bank of `pin_count` slots.
    ///
    /// Fails on more than 32 channels, a pin `>= pin_count`, or a pin
    /// used by two channels.
    pub fn new(pins: [Option<u8>; N], pin_count: usize) -> Result<Self> {
        if N > MAX_CHANNELS {
            return Err(ConfigError::TooManyChannels {
                requested: N,
                max: MAX_CHANNELS,
            }
            .into());
        }

        let mut slots = [None; N];
        for (channel, pin) in pins.iter().enumerate() {
            let Some(pin) = *pin else { continue };

            if usize::from(pin) >= pin_count {
                return Err(ConfigError::PinOutOfRange {
                    channel,
                    pin,
                    pin_count,
                }
                .into());
            }

            if let Some(first) = pins[..channel].iter().position(|p| *p == Some(pin)) {
                return Err(ConfigError::DuplicatePin {
                    pin,
                    first,
                    second: channel,
                }
                .into());
            }

            slots[channel] = Some(PinId::new(pin));
        }

        Ok(Self { slots, pin_count })
    }

    /// Pin driven by `channel`, or `None` if unmapped or out of range.
    pub fn pin_for(&self, channel: usize) -> Option<PinId> {
        self.slots.get(channel).copied().flatten()
    }

    /// Number of logical channels (`N`).
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Size of the pin bank this map was validated against.
    pub const fn pin_count(&self) -> usize {
        self.pin_count
    }

    /// Number of channels that actually drive a pin.
    pub fn mapped_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// `(channel, pin)` for every mapped channel, ascending.
    pub fn mapped(&self) -> impl Iterator<Item = (usize, PinId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(channel, pin)| pin.map(|p| (channel, p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn identity_map() {
        let map = ChannelMap::<4>::new([Some(0), Some(1), Some(2), Some(3)], 4).unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map.mapped_count(), 4);
        for i in 0..4 {
            assert_eq!(map.pin_for(i), Some(PinId::new(i as u8)));
        }
    }

    #[test]
    fn sparse_map_reports_unmapped() {
        let map = ChannelMap::<4>::new([Some(3), None, Some(0), None], 4).unwrap();
        assert_eq!(map.pin_for(0), Some(PinId::new(3)));
        assert_eq!(map.pin_for(1), None);
        assert_eq!(map.pin_for(2), Some(PinId::new(0)));
        assert_eq!(map.pin_for(3), None);
        assert_eq!(map.mapped_count(), 2);

        let mapped: Vec<_> = map.mapped().collect();
        assert_eq!(mapped, [(0, PinId::new(3)), (2, PinId::new(0))]);
    }

    #[test]
    fn out_of_range_channel_is_unmapped() {
        let map = ChannelMap::<2>::new([Some(0), Some(1)], 2).unwrap();
        assert_eq!(map.pin_for(2), None);
        assert_eq!(map.pin_for(usize::MAX), None);
    }

    #[test]
    fn rejects_pin_out_of_range() {
        let err = ChannelMap::<3>::new([Some(0), Some(8), None], 8).unwrap_err();
        assert_eq!(
            err,
            Error::Configuration(ConfigError::PinOutOfRange {
                channel: 1,
                pin: 8,
                pin_count: 8,
            })
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn rejects_duplicate_pin() {
        let err = ChannelMap::<4>::new([Some(2), None, Some(5), Some(2)], 8).unwrap_err();
        assert_eq!(
            err,
            Error::Configuration(ConfigError::DuplicatePin {
                pin: 2,
                first: 0,
                second: 3,
            })
        );
    }

    #[test]
    fn rejects_too_many_channels() {
        let err = ChannelMap::<33>::new([None; 33], 8).unwrap_err();
        assert_eq!(
            err,
            Error::Configuration(ConfigError::TooManyChannels {
                requested: 33,
                max: 32,
            })
        );
    }

    #[test]
    fn all_unmapped_is_valid() {
        let map = ChannelMap::<16>::new([None; 16], 0).unwrap();
        assert_eq!(map.mapped_count(), 0);
        assert!(map.mapped().next().is_none());
    }

    #[test]
    fn board_map_is_valid() {
        let map = ChannelMap::new(crate::config::CHANNEL_PINS, crate::config::PIN_BANK_SIZE)
            .expect("board channel table must validate");
        assert_eq!(map.len(), crate::config::CHANNEL_COUNT);
        // Channel 1 drives the on-board LED.
        assert_eq!(map.pin_for(0), Some(PinId::new(0)));
    }
}
