//! Unified error type for the alt2usb firmware.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! None of these stop the control loop: callers log and carry on.

use alt2usb::max7219::BusError;
use defmt::Format;
use embassy_usb::driver::EndpointError;

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Error {
    // USB
    /// A USB endpoint transfer failed.
    Usb(UsbError),

    // Display
    /// Driving a MAX7219 DIN/CLK/CS line failed.
    Display,
}

/// Subset of USB endpoint errors we propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum UsbError {
    /// Packet larger than the endpoint buffer.
    BufferOverflow,
    /// The host disabled the endpoint (cable pulled, port closed).
    Disabled,
}

// Convenience conversions

impl From<UsbError> for Error {
    fn from(e: UsbError) -> Self {
        Error::Usb(e)
    }
}

impl From<BusError> for Error {
    fn from(_: BusError) -> Self {
        Error::Display
    }
}

impl From<EndpointError> for Error {
    fn from(e: EndpointError) -> Self {
        match e {
            EndpointError::BufferOverflow => UsbError::BufferOverflow.into(),
            EndpointError::Disabled => UsbError::Disabled.into(),
        }
    }
}
