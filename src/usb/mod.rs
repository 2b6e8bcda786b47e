//! USB Device subsystem - presents the PacDrive HID interface to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. The device exposes a single HID interface with one
//! interrupt IN endpoint, exactly as described by
//! [`crate::hid::descriptors`]:
//!
//! - Output reports arrive as `SET_REPORT` control transfers and are
//!   handed to [`crate::device::PacDrive`] synchronously, inside the USB
//!   task.
//! - `GET_REPORT` is stalled; there is no input data.

pub mod hid_device;
