//! Error types for the timing core.
//!
//! All variants are contract violations by the instrumented code or a broken
//! clock, never transient conditions, so none of them are retried.

/// Errors reported by calibration, the zone registry, and report derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimingError {
    /// The reference wall clock did not advance through the calibration
    /// window within the bounded maximum wait, or the counter recorded no
    /// ticks across it. Fatal for instrumentation.
    CalibrationTimeout {
        /// The calibration window that was measured, in milliseconds.
        wait_millis: u64,
    },

    /// `stop` was called for a zone with no matching open `start`.
    UnmatchedStop {
        /// Name of the zone the stop was issued for.
        zone: String,
    },

    /// A report was requested while a zone was still open.
    ZoneNotClosed {
        /// Name of the first zone found still open.
        zone: String,
    },
}

impl std::fmt::Display for TimingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingError::CalibrationTimeout { wait_millis } => write!(
                f,
                "calibration failed: reference clock did not advance through a {wait_millis}ms window"
            ),
            TimingError::UnmatchedStop { zone } => {
                write!(f, "stop called for zone '{zone}' with no matching start")
            }
            TimingError::ZoneNotClosed { zone } => {
                write!(f, "report requested while zone '{zone}' is still open")
            }
        }
    }
}

impl std::error::Error for TimingError {}
