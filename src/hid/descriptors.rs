//! Static USB descriptor set.
//!
//! Everything a host reads during enumeration: device identity, the
//! single-configuration layout (one HID interface, one interrupt IN
//! endpoint), the HID report descriptor that fixes the wire format, and
//! the string table. The byte tables are `&'static` slices, so whatever
//! the stack holds on to stays valid for the whole transfer.

use crate::config;
use crate::error::{Error, Result};

// Descriptor type codes (USB 2.0 table 9-5, HID 1.11 section 7.1).
const DESC_DEVICE: u8 = 0x01;
const DESC_CONFIGURATION: u8 = 0x02;
const DESC_STRING: u8 = 0x03;
const DESC_INTERFACE: u8 = 0x04;
const DESC_ENDPOINT: u8 = 0x05;
const DESC_HID: u8 = 0x21;
const DESC_HID_REPORT: u8 = 0x22;

const CLASS_HID: u8 = 0x03;
const TRANSFER_INTERRUPT: u8 = 0x03;
const HID_VERSION: u16 = 0x0111;

/// IN endpoint 1.
pub const HID_EP_IN: u8 = 0x81;

/// Interface number of the HID function.
pub const HID_INTERFACE: u8 = 0;

/// String table indices.
pub const STRING_LANGID: u8 = 0;
pub const STRING_MANUFACTURER: u8 = 1;
pub const STRING_PRODUCT: u8 = 2;
pub const STRING_SERIAL: u8 = 3;

/// USB HID Report Descriptor.
///
/// One application collection with:
///   - 32 button bits (input, never populated by this device)
///   - 32 LED/indicator bits (output, the channel mask)
#[rustfmt::skip]
pub const HID_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop Ctrls)
    0x09, 0x00, // Usage (Undefined)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Buttons (32 bits, input) -
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (0x01)
    0x29, 0x20, //   Usage Maximum (0x20)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x20, //   Report Count (32)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Channels (32 bits, output) -
    0x05, 0x08, //   Usage Page (LEDs)
    0x09, 0x4B, //   Usage (Generic Indicator)
    0x95, 0x20, //   Report Count (32)
    0x75, 0x01, //   Report Size (1)
    0x91, 0x20, //   Output (Data, Array, Absolute, Non-volatile)
    //
    0xC0,       // End Collection
];

const fn lo(v: u16) -> u8 {
    v.to_le_bytes()[0]
}

const fn hi(v: u16) -> u8 {
    v.to_le_bytes()[1]
}

/// Standard device descriptor.
#[rustfmt::skip]
pub const DEVICE_DESCRIPTOR: &[u8] = &[
    18,                                  // bLength
    DESC_DEVICE,                         // bDescriptorType
    lo(config::USB_SPEC_RELEASE), hi(config::USB_SPEC_RELEASE),
    0x00,                                // bDeviceClass (per interface)
    0x00,                                // bDeviceSubClass
    0x00,                                // bDeviceProtocol
    config::USB_EP0_MAX_PACKET,          // bMaxPacketSize0
    lo(config::USB_VID), hi(config::USB_VID),
    lo(config::USB_PID), hi(config::USB_PID),
    lo(config::USB_DEVICE_RELEASE), hi(config::USB_DEVICE_RELEASE),
    STRING_MANUFACTURER,                 // iManufacturer
    STRING_PRODUCT,                      // iProduct
    STRING_SERIAL,                       // iSerialNumber
    0x01,                                // bNumConfigurations
];

const REPORT_DESC_LEN: u16 = HID_REPORT_DESCRIPTOR.len() as u16;

/// HID class descriptor (also embedded in the configuration descriptor).
#[rustfmt::skip]
pub const HID_DESCRIPTOR: &[u8] = &[
    9,                                   // bLength
    DESC_HID,                            // bDescriptorType
    lo(HID_VERSION), hi(HID_VERSION),    // bcdHID 1.11
    0x00,                                // bCountryCode
    0x01,                                // bNumDescriptors
    DESC_HID_REPORT,                     // bDescriptorType (report)
    lo(REPORT_DESC_LEN), hi(REPORT_DESC_LEN),
];

const CONFIG_TOTAL_LEN: u16 = 9 + 9 + 9 + 7;

/// Configuration descriptor with the interface, HID and endpoint
/// descriptors appended.
#[rustfmt::skip]
pub const CONFIGURATION_DESCRIPTOR: &[u8] = &[
    // Configuration
    9, DESC_CONFIGURATION,
    lo(CONFIG_TOTAL_LEN), hi(CONFIG_TOTAL_LEN),
    0x01,                                // bNumInterfaces
    0x01,                                // bConfigurationValue
    0x00,                                // iConfiguration
    0x80,                                // bmAttributes (bus powered)
    (config::USB_MAX_POWER_MA / 2) as u8, // bMaxPower (2 mA units)
    // Interface
    9, DESC_INTERFACE,
    HID_INTERFACE,                       // bInterfaceNumber
    0x00,                                // bAlternateSetting
    0x01,                                // bNumEndpoints
    CLASS_HID,                           // bInterfaceClass
    0x00,                                // bInterfaceSubClass (no boot)
    0x00,                                // bInterfaceProtocol (none)
    0x00,                                // iInterface
    // HID
    9, DESC_HID,
    lo(HID_VERSION), hi(HID_VERSION),
    0x00, 0x01, DESC_HID_REPORT,
    lo(REPORT_DESC_LEN), hi(REPORT_DESC_LEN),
    // Endpoint
    7, DESC_ENDPOINT,
    HID_EP_IN,                           // bEndpointAddress
    TRANSFER_INTERRUPT,                  // bmAttributes
    lo(config::USB_HID_EP_BUFSIZE), hi(config::USB_HID_EP_BUFSIZE),
    config::USB_HID_POLL_MS,             // bInterval (ms)
];

/// Descriptor families served by the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorKind {
    Device,
    Configuration,
    String,
    Hid,
    HidReport,
}

const STRING_BUF_LEN: usize = 2 + 2 * config::USB_MAX_STRING_CHARS;

/// A string descriptor rendered into its own buffer.
///
/// Byte 0 is the total length, byte 1 the string type, then UTF-16LE
/// code units. Each lookup returns a fresh value, so there is no shared
/// scratch buffer to be overwritten mid-transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StringDescriptor {
    buf: [u8; STRING_BUF_LEN],
    len: usize,
}

impl StringDescriptor {
    pub(crate) fn from_code_units(units: impl Iterator<Item = u16>) -> Self {
        let mut buf = [0u8; STRING_BUF_LEN];
        let mut count = 0;
        for (i, unit) in units.take(config::USB_MAX_STRING_CHARS).enumerate() {
            buf[2 + 2 * i..4 + 2 * i].copy_from_slice(&unit.to_le_bytes());
            count = i + 1;
        }
        let len = 2 + 2 * count;
        buf[0] = len as u8;
        buf[1] = DESC_STRING;
        Self { buf, len }
    }

    /// Wire bytes, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Payload as UTF-16 code units.
    pub fn code_units(&self) -> impl Iterator<Item = u16> + '_ {
        self.buf[2..self.len]
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
    }
}

/// String at `index`: language list, manufacturer, product, serial.
///
/// `None` past the end of the table; the stack answers that with a stall.
/// Longer strings are cut to `USB_MAX_STRING_CHARS` code units.
pub fn string_descriptor(index: u8) -> Option<StringDescriptor> {
    let text = match index {
        STRING_LANGID => {
            return Some(StringDescriptor::from_code_units(
                [config::USB_LANGID].into_iter(),
            ))
        }
        STRING_MANUFACTURER => config::USB_MANUFACTURER,
        STRING_PRODUCT => config::USB_PRODUCT,
        STRING_SERIAL => config::USB_SERIAL_NUMBER,
        _ => return None,
    };
    Some(StringDescriptor::from_code_units(text.encode_utf16()))
}

/// Result of a catalog lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Descriptor {
    Static(&'static [u8]),
    String(StringDescriptor),
}

impl Descriptor {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Descriptor::Static(bytes) => bytes,
            Descriptor::String(s) => s.as_bytes(),
        }
    }
}

/// Look up a descriptor by kind and index.
///
/// `index` is the descriptor index for device/configuration/string and
/// the interface number for the HID class descriptors.
pub fn descriptor(kind: DescriptorKind, index: u8) -> Result<Descriptor> {
    let found = match (kind, index) {
        (DescriptorKind::Device, 0) => Some(Descriptor::Static(DEVICE_DESCRIPTOR)),
        (DescriptorKind::Configuration, 0) => {
            Some(Descriptor::Static(CONFIGURATION_DESCRIPTOR))
        }
        (DescriptorKind::Hid, HID_INTERFACE) => Some(Descriptor::Static(HID_DESCRIPTOR)),
        (DescriptorKind::HidReport, HID_INTERFACE) => {
            Some(Descriptor::Static(HID_REPORT_DESCRIPTOR))
        }
        (DescriptorKind::String, i) => string_descriptor(i).map(Descriptor::String),
        _ => None,
    };
    found.ok_or(Error::UnknownDescriptorIndex { kind, index })
}
