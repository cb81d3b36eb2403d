//! GPIO adapters for the rotary rings and the reset switch.
//!
//! All inputs are active-low with internal pull-ups and are polled from
//! the control loop; nothing here waits on an edge.

use alt2usb::ports::{ResetSwitch, RotaryEncoder};
use alt2usb::quadrature::Quadrature;
use embassy_nrf::gpio::{AnyPin, Input, Pull};

/// One rotary ring: two quadrature lines plus the decoder that counts them.
pub struct RingPins<'d> {
    a: Input<'d>,
    b: Input<'d>,
    decoder: Quadrature,
}

impl<'d> RingPins<'d> {
    pub fn new(a: AnyPin, b: AnyPin) -> Self {
        let a = Input::new(a, Pull::Up);
        let b = Input::new(b, Pull::Up);
        let decoder = Quadrature::new(a.is_high(), b.is_high());
        Self { a, b, decoder }
    }
}

impl RotaryEncoder for RingPins<'_> {
    /// Samples both lines, advances the decoder, then reports the count.
    fn position(&mut self) -> i32 {
        self.decoder.tick(self.a.is_high(), self.b.is_high());
        self.decoder.position()
    }
}

/// The reset push-button. Pressed pulls the line low.
pub struct ResetPin<'d> {
    pin: Input<'d>,
}

impl<'d> ResetPin<'d> {
    pub fn new(pin: AnyPin) -> Self {
        Self {
            pin: Input::new(pin, Pull::Up),
        }
    }
}

impl ResetSwitch for ResetPin<'_> {
    fn is_asserted(&mut self) -> bool {
        self.pin.is_low()
    }
}
