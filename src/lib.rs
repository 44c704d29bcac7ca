//! # cycleprof
//!
//! Phase-timing instrumentation on top of the hardware cycle counter, plus
//! the haversine benchmark host that exercises it.
//!
//! The core measures how long each stage of a program takes and reports each
//! stage's share of total wall time:
//!
//! - [`measurement::read_cycles`] reads the raw counter.
//! - [`Calibration`] relates counter ticks to real time by sampling the
//!   counter against a wall clock for a short window.
//! - [`ZoneRegistry`] tracks named start/stop regions, their nesting, and
//!   accumulated inclusive/exclusive ticks.
//! - [`Report`] converts ticks into milliseconds and percentages;
//!   [`output::terminal`] and [`output::json`] render it.
//!
//! ## Usage
//!
//! ```no_run
//! use cycleprof::{Calibration, Report, ZoneRegistry};
//!
//! fn main() -> Result<(), cycleprof::TimingError> {
//!     let calibration = Calibration::estimate(Calibration::DEFAULT_WAIT_MILLIS)?;
//!     let mut zones = ZoneRegistry::new();
//!
//!     zones.start("parse");
//!     // ... the work being measured ...
//!     zones.stop("parse")?;
//!
//!     let report = Report::build(&zones, &calibration)?;
//!     print!("{}", cycleprof::output::terminal::format_report(&report));
//!     Ok(())
//! }
//! ```
//!
//! The registry is thread-confined: one instance, owned by the instrumented
//! call path, opened and closed in program order.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod haversine;
pub mod measurement;
pub mod output;
pub mod registry;
pub mod report;

pub use error::TimingError;
pub use measurement::{read_cycles, Calibration};
pub use registry::{Zone, ZoneRegistry};
pub use report::{Report, ReportRow};
