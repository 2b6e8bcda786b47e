//! Unified error type for pacdrive.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use crate::hid::descriptors::DescriptorKind;
use heapless::Vec;

/// How many bytes of a rejected frame are kept for diagnostics.
pub const MALFORMED_CAPTURE_LEN: usize = 8;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // HID
    /// Output report length does not match the configured frame size.
    /// Nothing is applied; the device keeps running.
    MalformedReport {
        expected_len: usize,
        actual_len: usize,
        /// Leading bytes of the rejected frame.
        bytes: Vec<u8, MALFORMED_CAPTURE_LEN>,
    },

    // USB
    /// No descriptor of this kind exists at the requested index.
    UnknownDescriptorIndex { kind: DescriptorKind, index: u8 },

    // Startup
    /// Channel table is inconsistent with the hardware. Fatal.
    Configuration(ConfigError),
}

/// Channel configuration problems, detected once at initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// More channels than a `ChannelState` can carry.
    TooManyChannels { requested: usize, max: usize },
    /// A channel points past the end of the pin bank.
    PinOutOfRange { channel: usize, pin: u8, pin_count: usize },
    /// Two channels share one physical pin.
    DuplicatePin { pin: u8, first: usize, second: usize },
    /// The pin bank handed to the driver is smaller than the map expects.
    BankTooSmall { required: usize, available: usize },
    /// The frame layout cannot carry one bit per channel.
    LayoutTooNarrow { channels: usize, capacity: usize },
}

impl Error {
    /// Build a `MalformedReport`, keeping the first few bytes of `frame`.
    pub fn malformed_report(expected_len: usize, frame: &[u8]) -> Self {
        let keep = frame.len().min(MALFORMED_CAPTURE_LEN);
        let mut bytes = Vec::new();
        // Cannot fail: `keep` never exceeds the capacity.
        let _ = bytes.extend_from_slice(&frame[..keep]);
        Error::MalformedReport {
            expected_len,
            actual_len: frame.len(),
            bytes,
        }
    }

    /// `true` for errors that must stop the firmware from starting.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}

// Convenience conversions

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Configuration(e)
    }
}
