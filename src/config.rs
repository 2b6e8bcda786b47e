//! Application-wide constants and compile-time configuration.
//!
//! USB identity, HID transport parameters, the channel-to-pin table and
//! the wire layout all live here so they can be tuned in one place.

use crate::channels::Polarity;
use crate::hid::report::FrameLayout;

// USB identity

/// Ultimarc VID/PID. Host-side PacDrive drivers match on this pair, so
/// changing either one makes the device invisible to them.
pub const USB_VID: u16 = 0xD209;
pub const USB_PID: u16 = 0x1500;

/// bcdUSB (2.0) and bcdDevice.
pub const USB_SPEC_RELEASE: u16 = 0x0200;
pub const USB_DEVICE_RELEASE: u16 = 0x0001;

/// Control endpoint max packet size.
pub const USB_EP0_MAX_PACKET: u8 = 64;

/// Bus power budget (mA).
pub const USB_MAX_POWER_MA: u16 = 500;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "icedragon.io";
pub const USB_PRODUCT: &str = "pacdrive clone";
pub const USB_SERIAL_NUMBER: &str = "1";

/// Supported string language (English, United States).
pub const USB_LANGID: u16 = 0x0409;

/// Longest string descriptor payload, in UTF-16 code units.
pub const USB_MAX_STRING_CHARS: usize = 32;

// HID transport

/// Interrupt IN polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

/// Interrupt endpoint buffer size (bytes).
pub const USB_HID_EP_BUFSIZE: u16 = 16;

/// Input report length: 32 button bits, never populated.
pub const INPUT_REPORT_LEN: usize = 4;

// Channels

/// Number of logical output channels (16 for the PacDrive, 32 for the
/// wide variant together with `FrameLayout::WIDE`).
pub const CHANNEL_COUNT: usize = 16;

/// Wire layout of the output report.
pub const FRAME_LAYOUT: FrameLayout = FrameLayout::PACDRIVE;

/// Electrical convention of the output stage.
pub const POLARITY: Polarity = Polarity::ActiveHigh;

/// Number of GPIO slots in the board's pin bank.
pub const PIN_BANK_SIZE: usize = 16;

// Pin bank (nRF52840-DK layout). Slot numbers are indices into the
// output array built in `main.rs`:
//
//   slot  0 → P0.13 (LED1, on-board)   slot  8 → P0.30
//   slot  1 → P0.14 (LED2)             slot  9 → P0.31
//   slot  2 → P0.15 (LED3)             slot 10 → P1.01
//   slot  3 → P0.16 (LED4)             slot 11 → P1.02
//   slot  4 → P0.03                    slot 12 → P1.03
//   slot  5 → P0.04                    slot 13 → P1.04
//   slot  6 → P0.28                    slot 14 → P1.05
//   slot  7 → P0.29                    slot 15 → P1.06

/// Channel → pin bank slot. `None` leaves a channel unmapped.
///
/// Channel 1 (index 0) lands on the on-board LED.
pub const CHANNEL_PINS: [Option<u8>; CHANNEL_COUNT] = [
    Some(0),
    Some(1),
    Some(2),
    Some(3),
    Some(4),
    Some(5),
    Some(6),
    Some(7),
    Some(8),
    Some(9),
    Some(10),
    Some(11),
    Some(12),
    Some(13),
    Some(14),
    Some(15),
];
