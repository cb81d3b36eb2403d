//! Seams between the controller logic and the hardware.
//!
//! Every call is expected to return immediately: the control loop never
//! blocks inside a cycle. The firmware implements these over Embassy GPIO
//! and channels; tests implement them with recording fakes.

use crate::hid::VirtualButton;

/// Absolute position counter of one encoder ring.
pub trait RotaryEncoder {
    fn position(&mut self) -> i32;
}

/// The reset-altitude push button.
pub trait ResetSwitch {
    /// `true` while the button is held (the pin is active-low).
    fn is_asserted(&mut self) -> bool;
}

/// Byte-oriented serial link to the host.
pub trait SerialLink {
    /// Next received byte, if any is pending.
    fn read_byte(&mut self) -> Option<u8>;

    /// Queue one complete report line (terminator included).
    fn write_line(&mut self, line: &str);
}

/// Seven-segment readout: one sign slot and five digit slots.
pub trait SegmentDisplay {
    /// Show '-' when `negative`, blank otherwise.
    fn set_sign(&mut self, negative: bool);

    /// Show `value` (0..=9) at `position` (0 = ones .. 4 = ten-thousands).
    fn set_digit(&mut self, position: u8, value: u8);
}

/// USB joystick button state.
pub trait Joystick {
    fn press_button(&mut self, button: VirtualButton);
    fn release_button(&mut self, button: VirtualButton);
}

/// Everything the controller touches during one cycle.
///
/// Owned by the caller and lent to [`AltitudeController::step`] each cycle;
/// the controller keeps no references between cycles.
///
/// [`AltitudeController::step`]: crate::controller::AltitudeController::step
pub struct Board<E, R, S, D, J> {
    pub inner: E,
    pub outer: E,
    pub reset: R,
    pub serial: S,
    pub display: D,
    pub joystick: J,
}
