//! Altitude readout on the MAX7219 chain.
//!
//! The chain driver lives in [`alt2usb::max7219`]; this module pins it to
//! the readout layout and supplies a core-cycle delay for the bus.

use crate::error::Error;
use alt2usb::display::SIGN_POSITION;
use alt2usb::max7219::{Max7219, DIGIT_SEGMENTS, SEGMENTS_BLANK, SEGMENTS_MINUS};
use alt2usb::ports::SegmentDisplay;
use defmt::warn;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// The altitude readout: sign and five digits on one device of the chain.
pub struct SevenSegment<DIN, CLK, CS, D> {
    chain: Max7219<DIN, CLK, CS, D>,
    device: usize,
}

impl<DIN, CLK, CS, D> SevenSegment<DIN, CLK, CS, D>
where
    DIN: OutputPin,
    CLK: OutputPin,
    CS: OutputPin,
    D: DelayNs,
{
    /// Initialise the whole chain, wake every device at `intensity`, and
    /// draw on `device`.
    ///
    /// A failed init is logged; the readout is still returned so the rest
    /// of the firmware keeps running without a display.
    pub fn init(mut chain: Max7219<DIN, CLK, CS, D>, device: usize, intensity: u8) -> Self {
        if let Err(e) = chain.init().and_then(|()| chain.wake_all(intensity)) {
            warn!("Display init failed: {}", Error::from(e));
        }
        Self { chain, device }
    }

    fn put(&mut self, position: u8, segments: u8) {
        if let Err(e) = self.chain.set_segments(self.device, position, segments) {
            warn!("Display write failed: {}", Error::from(e));
        }
    }
}

impl<DIN, CLK, CS, D> SegmentDisplay for SevenSegment<DIN, CLK, CS, D>
where
    DIN: OutputPin,
    CLK: OutputPin,
    CS: OutputPin,
    D: DelayNs,
{
    fn set_sign(&mut self, negative: bool) {
        let segments = if negative {
            SEGMENTS_MINUS
        } else {
            SEGMENTS_BLANK
        };
        self.put(SIGN_POSITION, segments);
    }

    fn set_digit(&mut self, position: u8, value: u8) {
        let segments = DIGIT_SEGMENTS
            .get(usize::from(value))
            .copied()
            .unwrap_or(SEGMENTS_BLANK);
        self.put(position, segments);
    }
}

/// Busy-wait delay counted in core cycles.
pub struct CycleDelay {
    cycles_per_us: u32,
}

impl CycleDelay {
    pub const fn new(core_clock_hz: u32) -> Self {
        Self {
            cycles_per_us: core_clock_hz / 1_000_000,
        }
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (ns / 1_000 + 1).saturating_mul(self.cycles_per_us);
        cortex_m::asm::delay(cycles);
    }
}
