//! Five-digit signed readout for the seven-segment display.
//!
//! Slot layout on the readout device:
//! ```text
//! position:  5     4     3     2     1     0
//!           sign  10k   1k   100    10     1
//! ```

use crate::config::DISPLAY_MAX_MAGNITUDE;
use crate::ports::SegmentDisplay;

/// Number of digit slots (the sign slot is extra).
pub const DIGIT_COUNT: usize = 5;

/// Slot holding the sign glyph.
pub const SIGN_POSITION: u8 = 5;

/// Sign and digits of a displayable value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readout {
    pub negative: bool,
    /// Zero-padded digits, most significant first (`digits[0]` is 10k).
    pub digits: [u8; DIGIT_COUNT],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderResult {
    /// The readout was written to the display.
    Rendered(Readout),
    /// Magnitude above 99999; the display was left untouched.
    OutOfRange,
}

/// Split `value` into sign and five digits, or `None` if it does not fit.
pub fn decompose(value: i32) -> Option<Readout> {
    if !(-DISPLAY_MAX_MAGNITUDE..=DISPLAY_MAX_MAGNITUDE).contains(&value) {
        return None;
    }

    let mut rest = value.unsigned_abs();
    let mut digits = [0u8; DIGIT_COUNT];
    // Least significant first, filling from the right.
    for slot in digits.iter_mut().rev() {
        *slot = (rest % 10) as u8;
        rest /= 10;
    }

    Some(Readout {
        negative: value < 0,
        digits,
    })
}

/// Draw `value` on `display`: one sign write, then digits 10k down to 1.
///
/// Out-of-range values are skipped silently.
pub fn render<D: SegmentDisplay>(display: &mut D, value: i32) -> RenderResult {
    let Some(readout) = decompose(value) else {
        return RenderResult::OutOfRange;
    };

    display.set_sign(readout.negative);
    for (i, &digit) in readout.digits.iter().enumerate() {
        let position = (DIGIT_COUNT - 1 - i) as u8;
        display.set_digit(position, digit);
    }

    RenderResult::Rendered(readout)
}
