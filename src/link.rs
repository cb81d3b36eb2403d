//! Host presence on the serial link.
//!
//! Report lines only make sense to a host that has the port open. Lines
//! produced while nobody is listening are discarded at the source, so a
//! host that opens the port later only ever reads current values.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::ports::SerialLink;

/// Whether a host currently has the serial port open.
///
/// Shared between the task that watches the USB line state and the
/// control loop that produces reports.
#[derive(Debug, Default)]
pub struct PortState {
    open: AtomicBool,
}

impl PortState {
    /// Starts closed.
    pub const fn new() -> Self {
        Self {
            open: AtomicBool::new(false),
        }
    }

    pub fn opened(&self) {
        self.open.store(true, Ordering::Release);
    }

    pub fn closed(&self) {
        self.open.store(false, Ordering::Release);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}

/// A [`SerialLink`] that drops report lines while the port is closed.
///
/// Received bytes pass through unchanged.
pub struct WhileOpen<'a, S> {
    port: &'a PortState,
    link: S,
}

impl<'a, S> WhileOpen<'a, S> {
    pub const fn new(port: &'a PortState, link: S) -> Self {
        Self { port, link }
    }
}

impl<S: SerialLink> SerialLink for WhileOpen<'_, S> {
    fn read_byte(&mut self) -> Option<u8> {
        self.link.read_byte()
    }

    fn write_line(&mut self, line: &str) {
        if self.port.is_open() {
            self.link.write_line(line);
        }
    }
}
