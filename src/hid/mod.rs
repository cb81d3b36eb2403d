//! Joystick-side view of the controller: logical button ids and the HID
//! report the host sees.

pub mod joystick;

pub use joystick::{JoystickReport, JOYSTICK_REPORT_DESCRIPTOR, JOYSTICK_REPORT_SIZE};

/// Logical buttons exposed to the host, by joystick button index.
///
/// The ring pairs are pulsed while a ring turns; the reset button mirrors
/// the physical reset switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum VirtualButton {
    InnerRight = 0,
    InnerLeft = 1,
    OuterRight = 2,
    OuterLeft = 3,
    ResetAltitude = 4,
}

impl VirtualButton {
    /// Every button, in host index order.
    pub const ALL: [VirtualButton; 5] = [
        VirtualButton::InnerRight,
        VirtualButton::InnerLeft,
        VirtualButton::OuterRight,
        VirtualButton::OuterLeft,
        VirtualButton::ResetAltitude,
    ];

    /// Zero-based joystick button index on the host.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Bit of this button inside the report byte.
    pub const fn mask(self) -> u8 {
        1 << self.index()
    }
}
