//! USB HID device - the PacDrive interface.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one HID interface with an interrupt IN
//! endpoint. Output reports reach the device logic through the HID
//! request handler.

use crate::channels::PinBank;
use crate::config;
use crate::device::PacDrive;
use crate::hid::descriptors::HID_REPORT_DESCRIPTOR;
use defmt::info;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

/// USB driver type for the nRF52840 with hardware VBUS detection.
pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

static HID_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static USB_BUS_HANDLER: StaticCell<BusEventHandler> = StaticCell::new();

/// Acknowledges bus events. None of them touch the channel state.
struct BusEventHandler;

impl embassy_usb::Handler for BusEventHandler {
    fn enabled(&mut self, enabled: bool) {
        info!("USB: peripheral {}", if enabled { "enabled" } else { "disabled" });
    }

    fn reset(&mut self) {
        info!("USB: bus reset");
    }

    fn addressed(&mut self, addr: u8) {
        info!("USB: address {}", addr);
    }

    fn configured(&mut self, configured: bool) {
        info!("USB: {}", if configured { "mounted" } else { "unmounted" });
    }

    fn suspended(&mut self, suspended: bool) {
        info!("USB: bus {}", if suspended { "suspended" } else { "resumed" });
    }
}

fn report_id(id: ReportId) -> u8 {
    match id {
        ReportId::In(n) | ReportId::Out(n) | ReportId::Feature(n) => n,
    }
}

impl<B: PinBank, const N: usize> RequestHandler for PacDrive<B, N> {
    fn get_report(&mut self, id: ReportId, buf: &mut [u8]) -> Option<usize> {
        self.input_report(report_id(id), buf)
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        // Bad frames are logged inside and otherwise dropped; the host
        // does not get a stall for them.
        let _ = self.handle_output_report(report_id(id), data);
        OutResponse::Accepted
    }
}

/// Initialise the USB stack and register the HID interface.
///
/// Must be called exactly once. All static buffers are consumed here.
/// `handler` receives every HID class request for the lifetime of the
/// device.
pub fn init(
    usbd: peripherals::USBD,
    handler: &'static mut dyn RequestHandler,
) -> UsbDevice<'static, UsbDriver> {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // Device-level identity, mirroring the static device descriptor.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.device_release = config::USB_DEVICE_RELEASE;
    usb_config.device_class = 0x00;
    usb_config.device_sub_class = 0x00;
    usb_config.device_protocol = 0x00;
    usb_config.composite_with_iads = false;
    usb_config.max_power = config::USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = config::USB_EP0_MAX_PACKET;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let bus_handler = USB_BUS_HANDLER.init(BusEventHandler);
    builder.handler(bus_handler);

    let hid_state = HID_STATE.init(State::new());
    let hid_config = HidConfig {
        report_descriptor: HID_REPORT_DESCRIPTOR,
        request_handler: Some(handler),
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: config::USB_HID_EP_BUFSIZE,
    };
    // The IN endpoint is declared but never written: there are no inputs.
    let _input: HidWriter<'static, UsbDriver, { config::INPUT_REPORT_LEN }> =
        HidWriter::new(&mut builder, hid_state, hid_config);

    let device = builder.build();

    info!(
        "USB HID device initialised ({=u16:x}:{=u16:x})",
        config::USB_VID,
        config::USB_PID
    );

    device
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, endpoint servicing and,
/// through the request handler, every output report.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}
