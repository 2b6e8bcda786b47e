//! Firmware entry point - nRF52840 PacDrive clone.
//!
//! Boot order:
//!   1. Start the HF crystal (required by the USB peripheral).
//!   2. Claim the output pins, all at the OFF level.
//!   3. Validate the channel table against the pin bank; halt on error.
//!   4. Hand the device to the USB stack and run it forever.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::pac;
use embassy_usb::UsbDevice;
use pacdrive::usb::hid_device::{self, UsbDriver};
use pacdrive::{config, ChannelMap, OutputDriver, PacDrive};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

/// GPIO outputs, indexed by pin bank slot (see `config.rs`).
type Bank = [Output<'static>; config::PIN_BANK_SIZE];

type BoardDevice = PacDrive<Bank, { config::CHANNEL_COUNT }>;

static DEVICE: StaticCell<BoardDevice> = StaticCell::new();

#[embassy_executor::task]
async fn usb_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

fn build_device(bank: Bank) -> pacdrive::Result<BoardDevice> {
    let map = ChannelMap::new(config::CHANNEL_PINS, config::PIN_BANK_SIZE)?;
    let driver = OutputDriver::new(map, bank, config::POLARITY)?;
    PacDrive::new(config::FRAME_LAYOUT, driver)
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("pacdrive v{} starting", env!("CARGO_PKG_VERSION"));

    let p = embassy_nrf::init(Default::default());

    pac::CLOCK.tasks_hfclkstart().write_value(1);
    while pac::CLOCK.events_hfclkstarted().read() != 1 {}

    let off = if config::POLARITY.level(false) {
        Level::High
    } else {
        Level::Low
    };
    let bank: Bank = [
        Output::new(p.P0_13, off, OutputDrive::Standard),
        Output::new(p.P0_14, off, OutputDrive::Standard),
        Output::new(p.P0_15, off, OutputDrive::Standard),
        Output::new(p.P0_16, off, OutputDrive::Standard),
        Output::new(p.P0_03, off, OutputDrive::Standard),
        Output::new(p.P0_04, off, OutputDrive::Standard),
        Output::new(p.P0_28, off, OutputDrive::Standard),
        Output::new(p.P0_29, off, OutputDrive::Standard),
        Output::new(p.P0_30, off, OutputDrive::Standard),
        Output::new(p.P0_31, off, OutputDrive::Standard),
        Output::new(p.P1_01, off, OutputDrive::Standard),
        Output::new(p.P1_02, off, OutputDrive::Standard),
        Output::new(p.P1_03, off, OutputDrive::Standard),
        Output::new(p.P1_04, off, OutputDrive::Standard),
        Output::new(p.P1_05, off, OutputDrive::Standard),
        Output::new(p.P1_06, off, OutputDrive::Standard),
    ];

    // A bad channel table would misdrive outputs for the whole session.
    let device = match build_device(bank) {
        Ok(device) => device,
        Err(e) => {
            defmt::error!("invalid channel configuration: {}", e);
            defmt::panic!("halting");
        }
    };
    let device = DEVICE.init(device);
    device.power_on();

    let usb = hid_device::init(p.USBD, device);
    spawner.must_spawn(usb_task(usb));

    info!("ready, waiting for host");
}
