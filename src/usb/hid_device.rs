//! USB composite device - CDC-ACM serial + HID joystick.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes the serial port and the joystick endpoint.

use super::{command_rx, joystick_signal, port_state, report_tx, UsbDriver};
use crate::error::Error;
use alt2usb::config;
use alt2usb::hid::{JOYSTICK_REPORT_DESCRIPTOR, JOYSTICK_REPORT_SIZE};
use defmt::{debug, info, warn};
use embassy_futures::select::{select, Either};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_usb::class::cdc_acm::{self, CdcAcmClass, Receiver, Sender};
use embassy_usb::class::hid::{self, Config as HidConfig, HidWriter};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

static JOYSTICK_HID_STATE: StaticCell<hid::State> = StaticCell::new();
static SERIAL_STATE: StaticCell<cdc_acm::State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Build result containing the USB device runner and the two class handles.
pub struct UsbParts {
    pub device: UsbDevice<'static, UsbDriver>,
    pub joystick_writer: HidWriter<'static, UsbDriver, 8>,
    pub serial: CdcAcmClass<'static, UsbDriver>,
}

/// Initialise the USB stack and create the composite device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbParts {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // CDC-ACM spans two interfaces, so the device needs IADs.
    usb_config.device_class = 0xEF;
    usb_config.device_sub_class = 0x02;
    usb_config.device_protocol = 0x01;
    usb_config.composite_with_iads = true;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    // Build the USB device.
    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let serial_state = SERIAL_STATE.init(cdc_acm::State::new());
    let serial = CdcAcmClass::new(&mut builder, serial_state, config::USB_CDC_PACKET_SIZE);

    let joystick_state = JOYSTICK_HID_STATE.init(hid::State::new());
    let joystick_config = HidConfig {
        report_descriptor: JOYSTICK_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let joystick_writer = HidWriter::new(&mut builder, joystick_state, joystick_config);

    let device = builder.build();

    info!("USB composite device initialised (serial + joystick)");

    UsbParts {
        device,
        joystick_writer,
        serial,
    }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and endpoint servicing.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Joystick forwarding task - writes the latest report whenever the
/// control loop publishes a new one.
pub async fn hid_writer_task(mut joystick: HidWriter<'static, UsbDriver, 8>) -> ! {
    info!("HID writer task started - waiting for reports");

    let mut buf = [0u8; JOYSTICK_REPORT_SIZE];

    loop {
        let report = joystick_signal().wait().await;
        let n = report.serialize(&mut buf);
        if let Err(e) = joystick.write(&buf[..n]).await {
            warn!("USB joystick write failed: {}", Error::from(e));
        }
    }
}

/// Serial task - while a host has the port open, feeds received bytes to
/// the control loop and writes queued report lines back.
///
/// The port is marked open only for the lifetime of a connection, and the
/// report queue is emptied on both edges of it.
pub async fn serial_task(serial: CdcAcmClass<'static, UsbDriver>) -> ! {
    let (mut tx, mut rx) = serial.split();

    loop {
        rx.wait_connection().await;
        info!("Serial: host connected");
        // Nothing queued before the port opened reaches the host.
        report_tx().clear();
        port_state().opened();

        let result = match select(read_commands(&mut rx), write_reports(&mut tx)).await {
            Either::First(r) | Either::Second(r) => r,
        };
        port_state().closed();
        report_tx().clear();
        if let Err(e) = result {
            info!("Serial: host disconnected ({})", e);
        }
    }
}

async fn read_commands(rx: &mut Receiver<'static, UsbDriver>) -> Result<(), Error> {
    let mut buf = [0u8; config::USB_CDC_PACKET_SIZE as usize];
    loop {
        let n = rx.read_packet(&mut buf).await?;
        for &byte in &buf[..n] {
            if command_rx().try_send(byte).is_err() {
                debug!("Serial: command queue full - byte dropped");
            }
        }
    }
}

async fn write_reports(tx: &mut Sender<'static, UsbDriver>) -> Result<(), Error> {
    loop {
        let line = report_tx().receive().await;
        tx.write_packet(line.as_bytes()).await?;
    }
}
