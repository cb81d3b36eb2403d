//! Edge detection for the reset-altitude button.
//!
//! The joystick reset button must follow the physical switch, but the HID
//! press/release calls are only issued on transitions, never per poll.

/// A level transition of the switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

/// Compare the current sample with the previous one.
pub fn detect_edge(currently_asserted: bool, prior_asserted: bool) -> Option<Edge> {
    match (prior_asserted, currently_asserted) {
        (false, true) => Some(Edge::Pressed),
        (true, false) => Some(Edge::Released),
        _ => None,
    }
}

/// Remembers whether the switch was held on the previous poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetButton {
    pressed: bool,
}

impl ResetButton {
    pub const fn new() -> Self {
        Self { pressed: false }
    }

    /// Feed one pin sample; returns the edge it completes, if any.
    pub fn sample(&mut self, asserted: bool) -> Option<Edge> {
        let edge = detect_edge(asserted, self.pressed);
        self.pressed = asserted;
        edge
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}
