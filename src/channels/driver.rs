//! Output driver - turns `(channel, on)` into a pin level.
//!
//! Unmapped channels are silently skipped: variants with fewer physical
//! outputs than logical channels are normal. Redundant writes are not
//! filtered here; that is the synchroniser's job.

use super::{ChannelMap, PinId, Polarity};
use crate::error::{ConfigError, Result};
use embedded_hal::digital::{OutputPin, PinState};

/// A bank of output pins addressed by slot index.
///
/// This is the seam to the HAL. On the target it is an array of GPIO
/// outputs; in tests it is a recorder.
pub trait PinBank {
    type Error;

    /// Number of addressable slots.
    fn pin_count(&self) -> usize;

    /// Drive slot `pin` high (`true`) or low (`false`).
    fn set_level(&mut self, pin: PinId, high: bool) -> core::result::Result<(), Self::Error>;
}

impl<P: OutputPin, const M: usize> PinBank for [P; M] {
    type Error = P::Error;

    fn pin_count(&self) -> usize {
        M
    }

    fn set_level(&mut self, pin: PinId, high: bool) -> core::result::Result<(), P::Error> {
        match self.get_mut(pin.index()) {
            Some(out) => out.set_state(PinState::from(high)),
            // Unreachable for a validated map.
            None => Ok(()),
        }
    }
}

/// Drives the pins behind an `N`-channel map.
pub struct OutputDriver<B, const N: usize> {
    map: ChannelMap<N>,
    bank: B,
    polarity: Polarity,
}

impl<B: PinBank, const N: usize> OutputDriver<B, N> {
    /// Bind `map` to `bank`. Fails if the bank is smaller than the one the
    /// map was validated against.
    pub fn new(map: ChannelMap<N>, bank: B, polarity: Polarity) -> Result<Self> {
        if bank.pin_count() < map.pin_count() {
            return Err(ConfigError::BankTooSmall {
                required: map.pin_count(),
                available: bank.pin_count(),
            }
            .into());
        }
        Ok(Self {
            map,
            bank,
            polarity,
        })
    }

    /// Drive `channel` on or off.
    ///
    /// Returns `Ok(true)` if a pin was written, `Ok(false)` for an
    /// unmapped channel.
    pub fn drive(&mut self, channel: usize, on: bool) -> core::result::Result<bool, B::Error> {
        let Some(pin) = self.map.pin_for(channel) else {
            return Ok(false);
        };
        self.bank.set_level(pin, self.polarity.level(on))?;
        Ok(true)
    }

    pub fn map(&self) -> &ChannelMap<N> {
        &self.map
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::mock::RecordingBank;
    use crate::error::Error;

    fn driver(pins: [Option<u8>; 4], polarity: Polarity) -> OutputDriver<RecordingBank, 4> {
        let map = ChannelMap::new(pins, 4).unwrap();
        OutputDriver::new(map, RecordingBank::new(4), polarity).unwrap()
    }

    #[test]
    fn drives_mapped_pin_active_high() {
        let mut d = driver([Some(2), Some(0), None, None], Polarity::ActiveHigh);
        assert_eq!(d.drive(0, true), Ok(true));
        assert_eq!(d.drive(1, false), Ok(true));
        assert_eq!(d.bank().writes, [(2, true), (0, false)]);
        assert_eq!(d.bank().level(2), Some(true));
        assert_eq!(d.bank().level(0), Some(false));
    }

    #[test]
    fn active_low_inverts_level() {
        let mut d = driver([Some(1), None, None, None], Polarity::ActiveLow);
        d.drive(0, true).unwrap();
        assert_eq!(d.bank().level(1), Some(false));
        d.drive(0, false).unwrap();
        assert_eq!(d.bank().level(1), Some(true));
    }

    #[test]
    fn unmapped_channel_is_noop() {
        let mut d = driver([Some(0), None, None, None], Polarity::ActiveHigh);
        assert_eq!(d.drive(1, true), Ok(false));
        assert_eq!(d.drive(3, false), Ok(false));
        // Past the end of the map.
        assert_eq!(d.drive(17, true), Ok(false));
        assert!(d.bank().writes.is_empty());
    }

    #[test]
    fn repeated_drive_is_safe() {
        let mut d = driver([Some(3), None, None, None], Polarity::ActiveHigh);
        for _ in 0..3 {
            d.drive(0, true).unwrap();
        }
        assert_eq!(d.bank().writes, [(3, true), (3, true), (3, true)]);
        assert_eq!(d.bank().level(3), Some(true));
    }

    #[test]
    fn bank_smaller_than_map_is_rejected() {
        let map = ChannelMap::<2>::new([Some(0), Some(5)], 8).unwrap();
        let err = OutputDriver::new(map, RecordingBank::new(4), Polarity::ActiveHigh)
            .err()
            .unwrap();
        assert_eq!(
            err,
            Error::Configuration(ConfigError::BankTooSmall {
                required: 8,
                available: 4,
            })
        );
    }

    #[test]
    fn write_errors_propagate() {
        let mut d = driver([Some(1), None, None, None], Polarity::ActiveHigh);
        d.bank_mut().fail_on = Some(1);
        assert!(d.drive(0, true).is_err());
    }
}
