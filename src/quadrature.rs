//! Quadrature decoding for the encoder rings.
//!
//! Produces the absolute position counter the ring trackers consume. Each
//! pin transition moves an internal quarter-step count through a lookup
//! table; the visible position is that count halved and only latched when
//! the pins rest in state 0 (both low) or 3 (both high), which are the two
//! detent positions of the rings' encoders.

/// Quarter-step direction, indexed by `new_state | (old_state << 2)`.
const KNOB_DIR: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

const LATCH_LOW: u8 = 0;
const LATCH_HIGH: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quadrature {
    state: u8,
    steps: i32,
    position: i32,
}

const fn pin_state(a: bool, b: bool) -> u8 {
    (a as u8) | ((b as u8) << 1)
}

impl Quadrature {
    /// Start at position 0 from the current pin levels.
    pub const fn new(a: bool, b: bool) -> Self {
        Self {
            state: pin_state(a, b),
            steps: 0,
            position: 0,
        }
    }

    /// Feed one sample of both pins. Must be called often enough to see
    /// every transition.
    pub fn tick(&mut self, a: bool, b: bool) {
        let state = pin_state(a, b);
        if state == self.state {
            return;
        }

        let index = (state | (self.state << 2)) as usize;
        self.steps = self.steps.wrapping_add(KNOB_DIR[index] as i32);
        self.state = state;

        if state == LATCH_LOW || state == LATCH_HIGH {
            self.position = self.steps >> 1;
        }
    }

    /// Latched detent position.
    pub fn position(&self) -> i32 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pin levels for one full detent when A leads (counter goes down).
    const A_LEADS: [(bool, bool); 2] = [(false, true), (false, false)];
    /// Pin levels for one full detent when B leads (counter goes up).
    const B_LEADS: [(bool, bool); 2] = [(true, false), (false, false)];

    fn feed(enc: &mut Quadrature, levels: &[(bool, bool)]) {
        for &(a, b) in levels {
            enc.tick(a, b);
        }
    }

    #[test]
    fn starts_at_zero() {
        let enc = Quadrature::new(true, true);
        assert_eq!(enc.position(), 0);
    }

    #[test]
    fn a_leading_counts_down() {
        let mut enc = Quadrature::new(true, true);
        feed(&mut enc, &A_LEADS);
        assert_eq!(enc.position(), -1);
    }

    #[test]
    fn b_leading_counts_up() {
        let mut enc = Quadrature::new(true, true);
        feed(&mut enc, &B_LEADS);
        assert_eq!(enc.position(), 1);
    }

    #[test]
    fn position_latches_only_at_rest_states() {
        let mut enc = Quadrature::new(true, true);
        enc.tick(true, false);
        assert_eq!(enc.position(), 0, "half-way between detents");
        enc.tick(false, false);
        assert_eq!(enc.position(), 1);
    }

    #[test]
    fn full_cycle_is_two_detents() {
        let mut enc = Quadrature::new(true, true);
        feed(
            &mut enc,
            &[(true, false), (false, false), (false, true), (true, true)],
        );
        assert_eq!(enc.position(), 2);
    }

    #[test]
    fn bounce_returns_to_start() {
        let mut enc = Quadrature::new(true, true);
        feed(&mut enc, &[(true, false), (true, true), (true, false), (true, true)]);
        assert_eq!(enc.position(), 0);
    }

    #[test]
    fn repeated_samples_are_ignored() {
        let mut enc = Quadrature::new(true, true);
        feed(&mut enc, &[(true, false), (true, false), (false, false), (false, false)]);
        assert_eq!(enc.position(), 1);
    }
}
