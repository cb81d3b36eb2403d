//! Encoder ring tracking - turns an absolute position counter into altitude
//! steps and joystick button pulses.
//!
//! The encoder reports a counter, not discrete pulses, so direction comes
//! from the sign of the counter change. While a ring turns, one button of
//! its pair is held; once the ring has been still for longer than
//! [`VIRTUAL_BUTTON_RELEASE_MS`] both are released, so host software that
//! binds buttons sees a series of clicks.
//!
//! Turning the counter down raises the altitude.

use crate::config::{
    INNER_RING_LEFT_TURN_BTN, INNER_RING_RIGHT_TURN_BTN, INNER_RING_STEP,
    OUTER_RING_LEFT_TURN_BTN, OUTER_RING_RIGHT_TURN_BTN, OUTER_RING_STEP,
    VIRTUAL_BUTTON_RELEASE_MS,
};
use crate::hid::VirtualButton;
use crate::ports::Joystick;

/// Fixed per-ring settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingConfig {
    /// Altitude change per detent.
    pub step: i32,
    /// Held while the counter decreases.
    pub left_button: VirtualButton,
    /// Held while the counter increases.
    pub right_button: VirtualButton,
}

impl RingConfig {
    pub const INNER: RingConfig = RingConfig {
        step: INNER_RING_STEP,
        left_button: INNER_RING_LEFT_TURN_BTN,
        right_button: INNER_RING_RIGHT_TURN_BTN,
    };

    pub const OUTER: RingConfig = RingConfig {
        step: OUTER_RING_STEP,
        left_button: OUTER_RING_LEFT_TURN_BTN,
        right_button: OUTER_RING_RIGHT_TURN_BTN,
    };
}

/// Tracking state of one ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderRing {
    config: RingConfig,
    last_position: i32,
    /// Time of the last counter change (ms); `None` until the ring moves.
    /// Kept per ring rather than shared: a still ring releases its pair
    /// even while the other ring keeps turning.
    last_change_ms: Option<u64>,
}

impl EncoderRing {
    /// Start tracking from counter value 0.
    pub const fn new(config: RingConfig) -> Self {
        Self {
            config,
            last_position: 0,
            last_change_ms: None,
        }
    }

    pub fn last_position(&self) -> i32 {
        self.last_position
    }

    pub fn last_change_ms(&self) -> Option<u64> {
        self.last_change_ms
    }

    /// Process one counter reading taken at `now_ms`.
    ///
    /// Returns the proposed altitude change: `+step` when the counter went
    /// down, `-step` when it went up, `0` when unchanged.
    pub fn poll<J: Joystick>(&mut self, position: i32, now_ms: u64, joystick: &mut J) -> i32 {
        let RingConfig {
            step,
            left_button,
            right_button,
        } = self.config;

        if position == self.last_position {
            if self.is_settled(now_ms) {
                joystick.release_button(left_button);
                joystick.release_button(right_button);
            }
            return 0;
        }

        let delta = if position < self.last_position {
            joystick.press_button(left_button);
            joystick.release_button(right_button);
            step
        } else {
            joystick.press_button(right_button);
            joystick.release_button(left_button);
            -step
        };

        self.last_position = position;
        self.last_change_ms = Some(now_ms);
        delta
    }

    /// `true` once the ring has been still for longer than the release delay.
    pub fn is_settled(&self, now_ms: u64) -> bool {
        match self.last_change_ms {
            None => true,
            Some(at) => now_ms.saturating_sub(at) > VIRTUAL_BUTTON_RELEASE_MS,
        }
    }
}
