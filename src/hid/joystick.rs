//! USB HID joystick report - five buttons, no axes.
//!
//! Layout (1 byte):
//! ```text
//! Bit 0: Inner ring, right turn
//! Bit 1: Inner ring, left turn
//! Bit 2: Outer ring, right turn
//! Bit 3: Outer ring, left turn
//! Bit 4: Reset altitude
//! Bit 5-7: Padding (always 0)
//! ```

use super::VirtualButton;
use crate::ports::Joystick;

/// Joystick report size in bytes.
pub const JOYSTICK_REPORT_SIZE: usize = 1;

/// Bits that map to real buttons.
const BUTTON_BITS: u8 = 0b0001_1111;

/// Button state as sent to the host.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickReport {
    /// Button bitfield (bit n = joystick button n).
    pub buttons: u8,
}

impl JoystickReport {
    /// All buttons released.
    pub const fn empty() -> Self {
        Self { buttons: 0 }
    }

    /// Mark `button` as held. Returns `true` if the report changed.
    pub fn press(&mut self, button: VirtualButton) -> bool {
        let before = self.buttons;
        self.buttons |= button.mask();
        self.buttons != before
    }

    /// Mark `button` as released. Returns `true` if the report changed.
    pub fn release(&mut self, button: VirtualButton) -> bool {
        let before = self.buttons;
        self.buttons &= !button.mask();
        self.buttons != before
    }

    pub fn is_pressed(&self, button: VirtualButton) -> bool {
        self.buttons & button.mask() != 0
    }

    /// Returns `true` when no button is held.
    pub fn is_idle(&self) -> bool {
        self.buttons & BUTTON_BITS == 0
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (always 1, or 0 if `buf` is empty).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < JOYSTICK_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.buttons & BUTTON_BITS;
        JOYSTICK_REPORT_SIZE
    }
}

impl Joystick for JoystickReport {
    fn press_button(&mut self, button: VirtualButton) {
        self.press(button);
    }

    fn release_button(&mut self, button: VirtualButton) {
        self.release(button);
    }
}

// USB HID report descriptor for a five-button joystick

/// USB HID Report Descriptor: Generic Desktop / Joystick, 5 buttons + 3 bits padding.
pub const JOYSTICK_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x04, // Usage (Joystick)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Buttons (5 bits) -
    0x05, 0x09, //   Usage Page (Buttons)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x05, //   Usage Maximum (Button 5)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x05, //   Report Count (5)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Padding (3 bits) -
    0x95, 0x01, //   Report Count (1)
    0x75, 0x03, //   Report Size (3)
    0x81, 0x01, //   Input (Constant)
    //
    0xC0, // End Collection (Application)
];
