//! alt2usb - altitude selector firmware for the nRF52840.
//!
//! Two rotary rings and a reset button set an altitude. The value is
//! shown on a MAX7219 seven-segment readout, mirrored as joystick button
//! clicks over USB HID, and can be set or queried over USB CDC serial.
//!
//! ## Task layout
//!
//! | Task            | Role                                            |
//! |-----------------|-------------------------------------------------|
//! | `control_task`  | 1 ms polling loop driving the controller        |
//! | `usb_task`      | USB device stack (enumeration, endpoints)       |
//! | `hid_task`      | Forwards the latest joystick report to the host |
//! | `serial_task`   | Moves command bytes in and report lines out     |

#![no_std]
#![no_main]

mod error;
mod ui;
mod usb;

use alt2usb::config;
use alt2usb::link::WhileOpen;
use alt2usb::max7219::Max7219;
use alt2usb::{AltitudeController, Board};
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive, Pin};
use embassy_nrf::pac;
use embassy_time::{Duration, Instant, Ticker};
use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::class::hid::HidWriter;
use embassy_usb::UsbDevice;
use ui::buttons::{ResetPin, RingPins};
use ui::display::{CycleDelay, SevenSegment};
use usb::{SerialPort, UsbDriver, UsbJoystick};
use {defmt_rtt as _, panic_probe as _};

type Readout = SevenSegment<Output<'static>, Output<'static>, Output<'static>, CycleDelay>;

type FrontPanel = Board<
    RingPins<'static>,
    ResetPin<'static>,
    WhileOpen<'static, SerialPort>,
    Readout,
    UsbJoystick,
>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("alt2usb starting");

    let p = embassy_nrf::init(Default::default());

    // USB needs the external high-frequency crystal.
    pac::CLOCK.tasks_hfclkstart().write_value(1);
    while pac::CLOCK.events_hfclkstarted().read() != 1 {}

    let chain = Max7219::new(
        Output::new(p.P0_03, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_04, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_28, Level::High, OutputDrive::Standard),
        CycleDelay::new(config::CORE_CLOCK_HZ),
        config::DISPLAY_CHAIN_LENGTH,
    );
    let display = SevenSegment::init(chain, config::DISPLAY_DEVICE, config::DISPLAY_INTENSITY);

    let board = Board {
        inner: RingPins::new(p.P0_29.degrade(), p.P0_30.degrade()),
        outer: RingPins::new(p.P0_31.degrade(), p.P1_01.degrade()),
        reset: ResetPin::new(p.P0_11.degrade()),
        serial: WhileOpen::new(usb::port_state(), SerialPort),
        display,
        joystick: UsbJoystick::new(),
    };

    let parts = usb::hid_device::init(p.USBD);

    unwrap!(spawner.spawn(usb_task(parts.device)));
    unwrap!(spawner.spawn(hid_task(parts.joystick_writer)));
    unwrap!(spawner.spawn(serial_task(parts.serial)));
    unwrap!(spawner.spawn(control_task(board)));

    info!("All tasks spawned");
}

#[embassy_executor::task]
async fn control_task(mut board: FrontPanel) -> ! {
    let mut controller = AltitudeController::default();
    controller.start(&mut board.display);
    info!("Control loop running (policy {})", controller.policy());

    let mut ticker = Ticker::every(Duration::from_millis(config::CONTROL_LOOP_PERIOD_MS));
    loop {
        controller.step(Instant::now().as_millis(), &mut board);
        board.joystick.flush();
        ticker.next().await;
    }
}

#[embassy_executor::task]
async fn usb_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    usb::hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn hid_task(writer: HidWriter<'static, UsbDriver, 8>) -> ! {
    usb::hid_device::hid_writer_task(writer).await
}

#[embassy_executor::task]
async fn serial_task(serial: CdcAcmClass<'static, UsbDriver>) -> ! {
    usb::hid_device::serial_task(serial).await
}
