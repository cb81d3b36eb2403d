//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

use crate::controller::RangePolicy;
use crate::hid::VirtualButton;

// Altitude

/// Altitude change per detent of the inner ring (feet).
pub const INNER_RING_STEP: i32 = 100;

/// Altitude change per detent of the outer ring (feet).
pub const OUTER_RING_STEP: i32 = 1000;

/// Largest magnitude the five-digit readout can show.
pub const DISPLAY_MAX_MAGNITUDE: i32 = 99_999;

/// What to do with altitudes the readout cannot show.
///
/// `Clamp` keeps the value and the LEDs in sync; `Passthrough` lets the
/// value run past ±99999 while the readout freezes on its last frame.
pub const ALTITUDE_RANGE_POLICY: RangePolicy = RangePolicy::Clamp;

// Joystick mapping (host-side button indices 0..=4)

pub const INNER_RING_LEFT_TURN_BTN: VirtualButton = VirtualButton::InnerLeft;
pub const INNER_RING_RIGHT_TURN_BTN: VirtualButton = VirtualButton::InnerRight;
pub const OUTER_RING_LEFT_TURN_BTN: VirtualButton = VirtualButton::OuterLeft;
pub const OUTER_RING_RIGHT_TURN_BTN: VirtualButton = VirtualButton::OuterRight;
pub const RESET_ALTITUDE_BTN: VirtualButton = VirtualButton::ResetAltitude;

/// Ring buttons are released once the ring has been still for longer than
/// this (ms), turning continuous rotation into discrete clicks on the host.
pub const VIRTUAL_BUTTON_RELEASE_MS: u64 = 100;

// Control loop

/// Period of the polling loop (ms).
pub const CONTROL_LOOP_PERIOD_MS: u64 = 1;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "alt2usb";
pub const USB_PRODUCT: &str = "Altitude Selector";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

/// CDC-ACM bulk endpoint packet size.
pub const USB_CDC_PACKET_SIZE: u16 = 64;

/// Received command bytes buffered between the USB task and the loop.
pub const SERIAL_RX_QUEUE_DEPTH: usize = 32;

/// Report lines buffered between the loop and the USB task.
pub const SERIAL_TX_QUEUE_DEPTH: usize = 8;

// Seven-segment display (MAX7219 chain)

/// Number of MAX7219 devices daisy-chained on DIN/CLK/CS.
pub const DISPLAY_CHAIN_LENGTH: usize = 2;

/// Chain index of the device carrying the altitude readout.
pub const DISPLAY_DEVICE: usize = 0;

/// LED brightness (0..=15).
pub const DISPLAY_INTENSITY: u8 = 8;

/// nRF52840 core clock, used to time the bit-banged display bus.
pub const CORE_CLOCK_HZ: u32 = 64_000_000;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Display DIN        → P0.03
//   Display CLK        → P0.04
//   Display CS/LOAD    → P0.28
//   Reset button       → P0.11 (active-low, internal pull-up)
//   Inner ring A / B   → P0.29 / P0.30
//   Outer ring A / B   → P0.31 / P1.01
