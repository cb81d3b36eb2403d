//! Shared host-side board for integration tests.
//!
//! Keeps the last frame of the readout, every serial line and the joystick
//! report, all behind one `Rc<RefCell<_>>` so a test can poke inputs while
//! the controller holds the board.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use alt2usb::hid::{JoystickReport, VirtualButton};
use alt2usb::ports::{Joystick, ResetSwitch, RotaryEncoder, SegmentDisplay, SerialLink};
use alt2usb::{AltitudeController, Board, Cycle, RangePolicy};

#[derive(Default)]
pub struct Panel {
    pub inner: i32,
    pub outer: i32,
    pub reset: bool,
    pub rx: VecDeque<u8>,
    pub lines: Vec<String>,
    pub sign: Option<bool>,
    pub digits: [Option<u8>; 5],
    pub frames: usize,
    pub joystick: JoystickReport,
}

impl Panel {
    /// Readout as text, sign slot first: `" 00100"` or `"-00900"`.
    pub fn readout(&self) -> String {
        let mut text = String::new();
        text.push(match self.sign {
            Some(true) => '-',
            Some(false) => ' ',
            None => '?',
        });
        for d in self.digits.iter().rev() {
            text.push(d.map_or('?', |v| char::from(b'0' + v)));
        }
        text
    }
}

pub type Shared = Rc<RefCell<Panel>>;

pub struct Ring(pub Shared, pub bool);
pub struct Port(pub Shared);

impl RotaryEncoder for Ring {
    fn position(&mut self) -> i32 {
        let panel = self.0.borrow();
        if self.1 {
            panel.outer
        } else {
            panel.inner
        }
    }
}

impl ResetSwitch for Port {
    fn is_asserted(&mut self) -> bool {
        self.0.borrow().reset
    }
}

impl SerialLink for Port {
    fn read_byte(&mut self) -> Option<u8> {
        self.0.borrow_mut().rx.pop_front()
    }

    fn write_line(&mut self, line: &str) {
        self.0.borrow_mut().lines.push(line.to_owned());
    }
}

impl SegmentDisplay for Port {
    fn set_sign(&mut self, negative: bool) {
        let mut panel = self.0.borrow_mut();
        panel.sign = Some(negative);
        panel.frames += 1;
    }

    fn set_digit(&mut self, position: u8, value: u8) {
        self.0.borrow_mut().digits[position as usize] = Some(value);
    }
}

impl Joystick for Port {
    fn press_button(&mut self, button: VirtualButton) {
        self.0.borrow_mut().joystick.press(button);
    }

    fn release_button(&mut self, button: VirtualButton) {
        self.0.borrow_mut().joystick.release(button);
    }
}

pub struct Harness {
    pub panel: Shared,
    pub board: Board<Ring, Port, Port, Port, Port>,
    pub controller: AltitudeController,
    pub now_ms: u64,
}

impl Harness {
    /// Controller with the default policy, already started.
    pub fn started() -> Self {
        Self::with_policy(RangePolicy::Clamp)
    }

    pub fn with_policy(policy: RangePolicy) -> Self {
        let panel: Shared = Rc::default();
        let mut board = Board {
            inner: Ring(panel.clone(), false),
            outer: Ring(panel.clone(), true),
            reset: Port(panel.clone()),
            serial: Port(panel.clone()),
            display: Port(panel.clone()),
            joystick: Port(panel.clone()),
        };
        let mut controller = AltitudeController::new(policy);
        controller.start(&mut board.display);
        Self {
            panel,
            board,
            controller,
            now_ms: 0,
        }
    }

    pub fn step(&mut self) -> Cycle {
        self.now_ms += 1;
        self.controller.step(self.now_ms, &mut self.board)
    }

    /// Advance the clock without polling.
    pub fn wait(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    pub fn send(&mut self, bytes: &[u8]) {
        self.panel.borrow_mut().rx.extend(bytes.iter().copied());
    }

    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.panel.borrow_mut().lines)
    }

    pub fn readout(&self) -> String {
        self.panel.borrow().readout()
    }
}
