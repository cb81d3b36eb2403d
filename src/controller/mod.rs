//! Altitude controller - owns the altitude and reconciles every input.
//!
//! One call to [`AltitudeController::step`] is one pass of the polling loop:
//!
//! 1. **Encoders**: inner then outer ring are read; their deltas are summed
//!    onto the current altitude to form a tentative target.
//! 2. **Reset button**: the pin is sampled; while it is held the target is
//!    forced to 0 and the joystick reset button follows its edges.
//! 3. **Command**: if a serial byte is pending it is interpreted and its
//!    effect replaces the target for this pass. Encoder motion read in the
//!    same pass is dropped, even when the byte is not a command.
//! 4. **Commit**: otherwise, if the target differs from the current
//!    altitude, it is reported on the serial link, rendered and adopted.
//!
//! Nothing is rendered or reported when a pass changes nothing.


use crate::button::{Edge, ResetButton};
use crate::command::{format_report, interpret, Command};
use crate::config::{ALTITUDE_RANGE_POLICY, DISPLAY_MAX_MAGNITUDE, RESET_ALTITUDE_BTN};
use crate::display::{render, RenderResult};
use crate::encoder::{EncoderRing, RingConfig};
use crate::ports::{Board, Joystick, ResetSwitch, RotaryEncoder, SegmentDisplay, SerialLink};

/// Handling of altitudes outside the readout's ±99999.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangePolicy {
    /// Saturate every adopted altitude to ±99999.
    Clamp,
    /// Keep the value; the readout stops updating until it is back in range.
    Passthrough,
}

impl RangePolicy {
    pub fn apply(self, altitude: i32) -> i32 {
        match self {
            RangePolicy::Clamp => altitude.clamp(-DISPLAY_MAX_MAGNITUDE, DISPLAY_MAX_MAGNITUDE),
            RangePolicy::Passthrough => altitude,
        }
    }
}

/// What a pass ended with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Target equal to the current altitude: no render, no report.
    Idle,
    /// Encoder or reset-button change adopted.
    Committed(i32),
    /// A serial byte was handled; `altitude` is the value after it.
    Command { command: Command, altitude: i32 },
}

/// Summary of one pass, mainly for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    /// Sum of both ring deltas.
    pub encoder_delta: i32,
    /// Edge completed by this pass's reset-pin sample.
    pub reset_edge: Option<Edge>,
    /// Target after encoders and reset button, before any command.
    pub target: i32,
    pub outcome: Outcome,
}

/// Single owner of the altitude and all input-reconciliation state.
#[derive(Clone, Debug)]
pub struct AltitudeController {
    altitude: i32,
    inner: EncoderRing,
    outer: EncoderRing,
    reset: ResetButton,
    policy: RangePolicy,
}

impl Default for AltitudeController {
    fn default() -> Self {
        Self::new(ALTITUDE_RANGE_POLICY)
    }
}

impl AltitudeController {
    /// Altitude 0, rings at counter 0, reset button released.
    pub const fn new(policy: RangePolicy) -> Self {
        Self {
            altitude: 0,
            inner: EncoderRing::new(RingConfig::INNER),
            outer: EncoderRing::new(RingConfig::OUTER),
            reset: ResetButton::new(),
            policy,
        }
    }

    pub fn altitude(&self) -> i32 {
        self.altitude
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Draw the boot altitude once, before the first pass.
    pub fn start<D: SegmentDisplay>(&mut self, display: &mut D) -> RenderResult {
        render(display, self.altitude)
    }

    /// Run one pass of the polling loop at `now_ms`.
    pub fn step<E, R, S, D, J>(&mut self, now_ms: u64, board: &mut Board<E, R, S, D, J>) -> Cycle
    where
        E: RotaryEncoder,
        R: ResetSwitch,
        S: SerialLink,
        D: SegmentDisplay,
        J: Joystick,
    {
        let encoder_delta = self.track_rings(now_ms, board);
        let mut target = self.altitude.saturating_add(encoder_delta);

        let reset_held = board.reset.is_asserted();
        let reset_edge = self.track_reset(reset_held, &mut board.joystick);
        if reset_held {
            target = 0;
        }

        let outcome = match board.serial.read_byte() {
            Some(byte) => self.dispatch(interpret(byte), &mut board.display, &mut board.serial),
            None => self.commit(target, &mut board.display, &mut board.serial),
        };

        Cycle {
            encoder_delta,
            reset_edge,
            target,
            outcome,
        }
    }

    fn track_rings<E, R, S, D, J>(&mut self, now_ms: u64, board: &mut Board<E, R, S, D, J>) -> i32
    where
        E: RotaryEncoder,
        J: Joystick,
    {
        let inner = self
            .inner
            .poll(board.inner.position(), now_ms, &mut board.joystick);
        let outer = self
            .outer
            .poll(board.outer.position(), now_ms, &mut board.joystick);
        inner.saturating_add(outer)
    }

    fn track_reset<J: Joystick>(&mut self, held: bool, joystick: &mut J) -> Option<Edge> {
        let edge = self.reset.sample(held);
        match edge {
            Some(Edge::Pressed) => joystick.press_button(RESET_ALTITUDE_BTN),
            Some(Edge::Released) => joystick.release_button(RESET_ALTITUDE_BTN),
            None => {}
        }
        edge
    }

    fn dispatch<D, S>(&mut self, command: Command, display: &mut D, serial: &mut S) -> Outcome
    where
        D: SegmentDisplay,
        S: SerialLink,
    {
        if command == Command::Reset {
            self.altitude = 0;
        } else if let Some(delta) = command.delta() {
            self.altitude = self.policy.apply(self.altitude.saturating_add(delta));
        }

        // Display first, so a report never runs ahead of the LEDs.
        if command.renders() {
            render(display, self.altitude);
        }
        if command.reports() {
            serial.write_line(&format_report(self.altitude));
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("command {} -> altitude {}", command, self.altitude);

        Outcome::Command {
            command,
            altitude: self.altitude,
        }
    }

    fn commit<D, S>(&mut self, target: i32, display: &mut D, serial: &mut S) -> Outcome
    where
        D: SegmentDisplay,
        S: SerialLink,
    {
        let target = self.policy.apply(target);
        if target == self.altitude {
            return Outcome::Idle;
        }

        serial.write_line(&format_report(target));
        render(display, target);

        #[cfg(feature = "defmt")]
        defmt::debug!("altitude {} -> {}", self.altitude, target);

        self.altitude = target;
        Outcome::Committed(target)
    }
}
