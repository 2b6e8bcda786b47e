//! HID output report decoding.
//!
//! Reference PacDrive layout (4 bytes):
//! ```text
//! Byte 0-1: Reserved (button field of the shared report, unused here)
//! Byte 2:   Channel mask, high byte (channels 16..9)
//! Byte 3:   Channel mask, low byte  (channels 8..1)
//! ```
//! The mask is big-endian across its bytes and active-high: bit 0 of the
//! combined value is channel 1.

use crate::channels::ChannelState;
use crate::error::{Error, Result};

/// Where the channel mask sits inside a fixed-length output report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameLayout {
    /// Exact report length in bytes.
    pub frame_len: usize,
    /// Offset of the first (most significant) mask byte.
    pub mask_offset: usize,
    /// Mask width in bytes, 1 to 4.
    pub mask_len: usize,
}

impl FrameLayout {
    /// 16 channels, mask in bytes 2..4.
    pub const PACDRIVE: Self = Self::new(4, 2, 2);

    /// 32 channels, the whole 4-byte report is the mask.
    pub const WIDE: Self = Self::new(4, 0, 4);

    /// Panics (at compile time for `const` layouts) if the mask does not
    /// fit in the frame or is wider than a `ChannelState`.
    pub const fn new(frame_len: usize, mask_offset: usize, mask_len: usize) -> Self {
        assert!(mask_len >= 1 && mask_len <= 4, "mask must be 1 to 4 bytes");
        assert!(mask_offset + mask_len <= frame_len, "mask exceeds frame");
        Self {
            frame_len,
            mask_offset,
            mask_len,
        }
    }

    /// Number of channels the mask can address.
    pub const fn channel_capacity(&self) -> usize {
        self.mask_len * 8
    }
}

/// A decoded output report, borrowing the frame it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputReport<'a> {
    /// Requested channel state.
    pub state: ChannelState,
    /// Bytes ahead of the mask. Carried along, never acted on.
    pub reserved: &'a [u8],
}

/// Stateless decoder for one frame layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportDecoder {
    layout: FrameLayout,
}

impl ReportDecoder {
    pub const fn new(layout: FrameLayout) -> Self {
        Self { layout }
    }

    pub const fn layout(&self) -> FrameLayout {
        self.layout
    }

    /// Decode `frame`.
    ///
    /// Any length other than `frame_len` is `MalformedReport`; the caller
    /// must not apply anything in that case.
    pub fn decode<'a>(&self, frame: &'a [u8]) -> Result<OutputReport<'a>> {
        let layout = &self.layout;
        if frame.len() != layout.frame_len {
            return Err(Error::malformed_report(layout.frame_len, frame));
        }

        let mask = &frame[layout.mask_offset..layout.mask_offset + layout.mask_len];
        let bits = mask
            .iter()
            .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte));

        Ok(OutputReport {
            state: ChannelState::from_bits(bits),
            reserved: &frame[..layout.mask_offset],
        })
    }
}
