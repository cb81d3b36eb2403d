//! USB Device subsystem - presents a composite device to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  We create a **composite device** with:
//!
//! - Interfaces 0+1: CDC-ACM serial (command bytes in, report lines out)
//! - Interface 2:    HID joystick (5 buttons)
//!
//! The control loop never awaits USB. It talks to the USB tasks through
//! the bounded channels and the latest-value signal defined here.

pub mod hid_device;

use alt2usb::command::ReportLine;
use alt2usb::config::{SERIAL_RX_QUEUE_DEPTH, SERIAL_TX_QUEUE_DEPTH};
use alt2usb::hid::{JoystickReport, VirtualButton};
use alt2usb::link::PortState;
use alt2usb::ports::{Joystick, SerialLink};
use defmt::{debug, warn};
use embassy_nrf::peripherals;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

/// Concrete USB driver for the nRF52840.
pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// Command bytes received from the host, oldest first.
static COMMAND_RX: Channel<CriticalSectionRawMutex, u8, SERIAL_RX_QUEUE_DEPTH> = Channel::new();

/// Report lines waiting to go to the host.
static REPORT_TX: Channel<CriticalSectionRawMutex, ReportLine, SERIAL_TX_QUEUE_DEPTH> =
    Channel::new();

/// Set while a host has the CDC port open; reports are dropped otherwise.
static PORT_STATE: PortState = PortState::new();

/// Latest joystick state; the HID task only ever needs the newest one.
static JOYSTICK_STATE: Signal<CriticalSectionRawMutex, JoystickReport> = Signal::new();

pub fn command_rx() -> &'static Channel<CriticalSectionRawMutex, u8, SERIAL_RX_QUEUE_DEPTH> {
    &COMMAND_RX
}

pub fn report_tx() -> &'static Channel<CriticalSectionRawMutex, ReportLine, SERIAL_TX_QUEUE_DEPTH> {
    &REPORT_TX
}

pub fn port_state() -> &'static PortState {
    &PORT_STATE
}

pub fn joystick_signal() -> &'static Signal<CriticalSectionRawMutex, JoystickReport> {
    &JOYSTICK_STATE
}

/// Control-loop side of the CDC-ACM link.
pub struct SerialPort;

impl SerialLink for SerialPort {
    fn read_byte(&mut self) -> Option<u8> {
        COMMAND_RX.try_receive().ok()
    }

    fn write_line(&mut self, line: &str) {
        let mut out = ReportLine::new();
        if out.push_str(line).is_err() {
            warn!("Serial: report line too long ({} bytes)", line.len());
            return;
        }
        if REPORT_TX.try_send(out).is_err() {
            debug!("Serial: tx queue full - report dropped");
        }
    }
}

/// Control-loop side of the HID joystick.
///
/// Button calls only touch the local report; [`UsbJoystick::flush`] hands
/// the result to the HID task once per cycle, and only when it changed.
pub struct UsbJoystick {
    report: JoystickReport,
    sent: JoystickReport,
}

impl UsbJoystick {
    pub const fn new() -> Self {
        Self {
            report: JoystickReport::empty(),
            sent: JoystickReport::empty(),
        }
    }

    pub fn flush(&mut self) {
        if self.report != self.sent {
            JOYSTICK_STATE.signal(self.report);
            self.sent = self.report;
        }
    }
}

impl Joystick for UsbJoystick {
    fn press_button(&mut self, button: VirtualButton) {
        self.report.press(button);
    }

    fn release_button(&mut self, button: VirtualButton) {
        self.report.release(button);
    }
}
