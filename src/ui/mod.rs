//! Front panel subsystem - seven-segment readout + encoder rings + reset.
//!
//! ## Components
//!
//! - **Display**: MAX7219 driving an 8-digit seven-segment module (bit-banged)
//! - **Buttons**: two quadrature rings and one active-low reset switch,
//!   sampled by the control loop every pass

pub mod buttons;
pub mod display;
