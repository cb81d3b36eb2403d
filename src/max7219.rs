//! MAX7219 seven-segment driver, bit-banged over three output pins.
//!
//! Several MAX7219s can be daisy-chained on one DIN/CLK/CS bus. Every
//! write shifts one 16-bit frame per device through the chain; devices
//! we are not addressing receive a NO-OP frame.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

// Register addresses
pub const REG_NOOP: u8 = 0x00;
pub const REG_DIGIT0: u8 = 0x01;
pub const REG_DECODE_MODE: u8 = 0x09;
pub const REG_INTENSITY: u8 = 0x0A;
pub const REG_SCAN_LIMIT: u8 = 0x0B;
pub const REG_SHUTDOWN: u8 = 0x0C;
pub const REG_DISPLAY_TEST: u8 = 0x0F;

/// Digit positions per device.
const DIGITS_PER_DEVICE: u8 = 8;

/// Segment patterns for 0-9, bit order `DP A B C D E F G`.
pub const DIGIT_SEGMENTS: [u8; 10] = [
    0b0111_1110, // 0
    0b0011_0000, // 1
    0b0110_1101, // 2
    0b0111_1001, // 3
    0b0011_0011, // 4
    0b0101_1011, // 5
    0b0101_1111, // 6
    0b0111_0000, // 7
    0b0111_1111, // 8
    0b0111_1011, // 9
];
pub const SEGMENTS_MINUS: u8 = 0b0000_0001;
pub const SEGMENTS_BLANK: u8 = 0b0000_0000;

/// Shortest CLK half-period we drive (MAX7219 needs 50 ns).
const CLOCK_HALF_PERIOD_NS: u32 = 100;

/// A DIN, CLK or CS line refused a level change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusError;

/// A chain of MAX7219 devices sharing DIN, CLK and CS.
pub struct Max7219<DIN, CLK, CS, D> {
    din: DIN,
    clk: CLK,
    cs: CS,
    delay: D,
    devices: usize,
}

impl<DIN, CLK, CS, D> Max7219<DIN, CLK, CS, D>
where
    DIN: OutputPin,
    CLK: OutputPin,
    CS: OutputPin,
    D: DelayNs,
{
    pub fn new(din: DIN, clk: CLK, cs: CS, delay: D, devices: usize) -> Self {
        Self {
            din,
            clk,
            cs,
            delay,
            devices,
        }
    }

    /// Put every device in raw-segment mode, blanked and shut down.
    pub fn init(&mut self) -> Result<(), BusError> {
        self.cs.set_high().map_err(|_| BusError)?;
        for device in 0..self.devices {
            self.write(device, REG_DISPLAY_TEST, 0)?;
            self.write(device, REG_SCAN_LIMIT, DIGITS_PER_DEVICE - 1)?;
            self.write(device, REG_DECODE_MODE, 0)?;
            self.clear(device)?;
            self.write(device, REG_SHUTDOWN, 0)?;
        }
        Ok(())
    }

    /// Leave shutdown and set brightness (0..=15).
    pub fn wake(&mut self, device: usize, intensity: u8) -> Result<(), BusError> {
        self.write(device, REG_SHUTDOWN, 1)?;
        self.write(device, REG_INTENSITY, intensity & 0x0F)
    }

    /// [`wake`](Self::wake) every device in the chain.
    pub fn wake_all(&mut self, intensity: u8) -> Result<(), BusError> {
        for device in 0..self.devices {
            self.wake(device, intensity)?;
        }
        Ok(())
    }

    pub fn clear(&mut self, device: usize) -> Result<(), BusError> {
        for position in 0..DIGITS_PER_DEVICE {
            self.set_segments(device, position, SEGMENTS_BLANK)?;
        }
        Ok(())
    }

    /// Light `segments` at digit `position` (0 = rightmost) of `device`.
    pub fn set_segments(&mut self, device: usize, position: u8, segments: u8) -> Result<(), BusError> {
        self.write(device, REG_DIGIT0 + position, segments)
    }

    fn write(&mut self, device: usize, register: u8, data: u8) -> Result<(), BusError> {
        self.cs.set_low().map_err(|_| BusError)?;
        // The first frame shifted out ends up in the last device.
        for target in (0..self.devices).rev() {
            let (op, value) = if target == device {
                (register, data)
            } else {
                (REG_NOOP, 0)
            };
            self.shift_out(op)?;
            self.shift_out(value)?;
        }
        // Rising CS latches the frames.
        self.cs.set_high().map_err(|_| BusError)
    }

    fn shift_out(&mut self, byte: u8) -> Result<(), BusError> {
        for bit in (0..8).rev() {
            let level = PinState::from(byte & (1 << bit) != 0);
            self.din.set_state(level).map_err(|_| BusError)?;
            self.clk.set_high().map_err(|_| BusError)?;
            self.delay.delay_ns(CLOCK_HALF_PERIOD_NS);
            self.clk.set_low().map_err(|_| BusError)?;
            self.delay.delay_ns(CLOCK_HALF_PERIOD_NS);
        }
        Ok(())
    }
}
