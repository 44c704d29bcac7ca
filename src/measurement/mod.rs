//! Cycle counter access and frequency calibration.

pub mod calibration;
pub mod timer;

pub use calibration::Calibration;
pub use timer::read_cycles;
