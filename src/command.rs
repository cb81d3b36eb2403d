//! Single-byte serial command protocol.
//!
//! | byte | command          | effect                         |
//! |------|------------------|--------------------------------|
//! | `r`  | `Reset`          | altitude = 0, render           |
//! | `s`  | `Query`          | report                         |
//! | `i`  | `IncreaseSmall`  | +100, render, report           |
//! | `I`  | `IncreaseLarge`  | +1000, render, report          |
//! | `d`  | `DecreaseSmall`  | -100, render, report           |
//! | `D`  | `DecreaseLarge`  | -1000, render, report          |
//!
//! Anything else is ignored. No terminator, case-sensitive.

use core::fmt::Write;

use crate::config::{INNER_RING_STEP, OUTER_RING_STEP};

/// Longest report line: sign, ten digits, CR LF.
pub const REPORT_LINE_CAPACITY: usize = 16;

/// One formatted report line.
pub type ReportLine = heapless::String<REPORT_LINE_CAPACITY>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Reset,
    Query,
    IncreaseSmall,
    IncreaseLarge,
    DecreaseSmall,
    DecreaseLarge,
    Unrecognized,
}

/// Decode one received byte.
pub fn interpret(byte: u8) -> Command {
    match byte {
        b'r' => Command::Reset,
        b's' => Command::Query,
        b'i' => Command::IncreaseSmall,
        b'I' => Command::IncreaseLarge,
        b'd' => Command::DecreaseSmall,
        b'D' => Command::DecreaseLarge,
        _ => Command::Unrecognized,
    }
}

impl Command {
    /// Relative altitude change, for the adjusting commands.
    pub fn delta(self) -> Option<i32> {
        match self {
            Command::IncreaseSmall => Some(INNER_RING_STEP),
            Command::IncreaseLarge => Some(OUTER_RING_STEP),
            Command::DecreaseSmall => Some(-INNER_RING_STEP),
            Command::DecreaseLarge => Some(-OUTER_RING_STEP),
            _ => None,
        }
    }

    /// Whether the command redraws the display.
    pub fn renders(self) -> bool {
        self.mutates()
    }

    /// Whether the command sends a report line.
    pub fn reports(self) -> bool {
        self == Command::Query || self.delta().is_some()
    }

    /// Whether the command changes the altitude.
    pub fn mutates(self) -> bool {
        self == Command::Reset || self.delta().is_some()
    }
}

/// Format `altitude` as a decimal line terminated by CR LF.
pub fn format_report(altitude: i32) -> ReportLine {
    let mut line = ReportLine::new();
    // Capacity covers i32::MIN plus the terminator.
    let _ = write!(line, "{}\r\n", altitude);
    line
}
