//! Integration tests for alt2usb host-testable logic.

mod common;

use alt2usb::command::Command;
use alt2usb::hid::VirtualButton;
use alt2usb::{Outcome, RangePolicy};
use common::Harness;

#[test]
fn boot_shows_zero() {
    let h = Harness::started();
    assert_eq!(h.readout(), " 00000");
    assert_eq!(h.controller.altitude(), 0);
    assert!(h.panel.borrow().lines.is_empty());
}

#[test]
fn rings_reset_and_serial_end_to_end() {
    let mut h = Harness::started();

    // Inner ring, one detent with the counter going down.
    h.panel.borrow_mut().inner -= 1;
    h.step();
    assert_eq!(h.controller.altitude(), 100);
    assert_eq!(h.readout(), " 00100");
    assert_eq!(h.take_lines(), ["100\r\n"]);

    // Outer ring, one detent with the counter going up.
    h.panel.borrow_mut().outer += 1;
    h.step();
    assert_eq!(h.controller.altitude(), -900);
    assert_eq!(h.readout(), "-00900");
    assert_eq!(h.take_lines(), ["-900\r\n"]);

    h.send(b"r");
    h.step();
    assert_eq!(h.controller.altitude(), 0);
    assert_eq!(h.readout(), " 00000");
    assert!(h.take_lines().is_empty());

    h.send(b"s");
    h.step();
    assert_eq!(h.take_lines(), ["0\r\n"]);
}

#[test]
fn spinning_a_ring_produces_clicks() {
    let mut h = Harness::started();

    for _ in 0..5 {
        h.panel.borrow_mut().outer -= 1;
        h.step();
        assert!(h.panel.borrow().joystick.is_pressed(VirtualButton::OuterLeft));
        h.wait(20);
    }
    assert_eq!(h.controller.altitude(), 5000);
    assert_eq!(h.take_lines().len(), 5);

    h.wait(200);
    h.step();
    assert!(h.panel.borrow().joystick.is_idle());
}

#[test]
fn stream_of_commands_is_handled_one_per_pass() {
    let mut h = Harness::started();
    h.send(b"IIdxs");

    let outcomes: Vec<Outcome> = (0..6).map(|_| h.step().outcome).collect();
    assert_eq!(
        outcomes,
        [
            Outcome::Command {
                command: Command::IncreaseLarge,
                altitude: 1000
            },
            Outcome::Command {
                command: Command::IncreaseLarge,
                altitude: 2000
            },
            Outcome::Command {
                command: Command::DecreaseSmall,
                altitude: 1900
            },
            Outcome::Command {
                command: Command::Unrecognized,
                altitude: 1900
            },
            Outcome::Command {
                command: Command::Query,
                altitude: 1900
            },
            Outcome::Idle,
        ]
    );
    assert_eq!(
        h.take_lines(),
        ["1000\r\n", "2000\r\n", "1900\r\n", "1900\r\n"]
    );
    assert_eq!(h.readout(), " 01900");
}

#[test]
fn reset_button_round_trip() {
    let mut h = Harness::started();
    h.send(b"DD");
    h.step();
    h.step();
    h.take_lines();

    h.panel.borrow_mut().reset = true;
    for _ in 0..10 {
        h.step();
    }
    assert_eq!(h.controller.altitude(), 0);
    assert_eq!(h.take_lines(), ["0\r\n"]);
    assert!(h
        .panel
        .borrow()
        .joystick
        .is_pressed(VirtualButton::ResetAltitude));

    h.panel.borrow_mut().reset = false;
    h.step();
    assert!(h.panel.borrow().joystick.is_idle());
}

#[test]
fn passthrough_readout_freezes_out_of_range() {
    let mut h = Harness::with_policy(RangePolicy::Passthrough);
    h.send(&[b'I'; 100]);
    for _ in 0..100 {
        h.step();
    }
    assert_eq!(h.controller.altitude(), 100_000);
    // Last frame the readout could show.
    assert_eq!(h.readout(), " 99000");
}
