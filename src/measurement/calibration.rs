//! Frequency calibration: relating cycle-counter ticks to wall-clock time.
//!
//! The counter increments at a fixed but initially unknown rate. Calibration
//! samples it alongside `std::time::Instant` over a short window and derives
//! integer ticks-per-second. A longer window trades startup time for a less
//! jittery estimate; the caller picks.

use std::time::{Duration, Instant};

use crate::error::TimingError;
use crate::measurement::timer::read_cycles;

/// Smallest window substituted when a zero-length calibration is requested.
const MIN_WAIT_MILLIS: u64 = 1;

/// Polling iterations allowed per millisecond of window before the wall
/// clock is declared stuck. Each poll costs at least a few nanoseconds, so
/// this caps the spin at roughly two orders of magnitude past the window.
const MAX_POLLS_PER_MILLI: u64 = 10_000_000;

/// A calibrated counter frequency, immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    ticks_per_second: u64,
    requested_wait_millis: u64,
    effective_wait_millis: u64,
}

impl Calibration {
    /// Default calibration window in milliseconds.
    pub const DEFAULT_WAIT_MILLIS: u64 = 100;

    /// Estimate the counter frequency over a `wait_millis` wall-clock window.
    ///
    /// Records a (wall clock, cycle counter) pair, busy-waits until at least
    /// `wait_millis` have elapsed on the wall clock, records a second pair,
    /// and divides. A `wait_millis` of 0 is substituted with a 1 ms window;
    /// the substitution is visible through [`requested_wait_millis`] and
    /// [`effective_wait_millis`] rather than silently producing an unbounded
    /// rate.
    ///
    /// [`requested_wait_millis`]: Calibration::requested_wait_millis
    /// [`effective_wait_millis`]: Calibration::effective_wait_millis
    ///
    /// # Errors
    ///
    /// Returns [`TimingError::CalibrationTimeout`] if the wall clock fails to
    /// advance through the window within a bounded number of polls, or if the
    /// cycle counter itself records no ticks across the window.
    pub fn estimate(wait_millis: u64) -> Result<Self, TimingError> {
        let effective = wait_millis.max(MIN_WAIT_MILLIS);
        let window = Duration::from_millis(effective);
        let max_polls = effective.saturating_mul(MAX_POLLS_PER_MILLI);

        let wall_start = Instant::now();
        let cycles_start = read_cycles();

        let mut polls: u64 = 0;
        while wall_start.elapsed() < window {
            polls += 1;
            if polls >= max_polls {
                return Err(TimingError::CalibrationTimeout {
                    wait_millis: effective,
                });
            }
            std::hint::spin_loop();
        }

        let cycles_end = read_cycles();
        let wall_elapsed = wall_start.elapsed();

        let cycle_delta = cycles_end.saturating_sub(cycles_start);
        if cycle_delta == 0 {
            return Err(TimingError::CalibrationTimeout {
                wait_millis: effective,
            });
        }

        let ticks_per_second = (cycle_delta as f64 / wall_elapsed.as_secs_f64()).round() as u64;
        // A sub-1Hz ratio rounds to zero; the frequency must stay positive.
        if ticks_per_second == 0 {
            return Err(TimingError::CalibrationTimeout {
                wait_millis: effective,
            });
        }

        Ok(Self {
            ticks_per_second,
            requested_wait_millis: wait_millis,
            effective_wait_millis: effective,
        })
    }

    /// Build a calibration from a known frequency, skipping measurement.
    ///
    /// Intended for tests and for hosts that already know the counter rate.
    ///
    /// # Panics
    ///
    /// Panics if `ticks_per_second` is zero; a zero frequency makes every
    /// conversion undefined.
    pub fn with_frequency(ticks_per_second: u64) -> Self {
        assert!(ticks_per_second > 0, "frequency must be positive");
        Self {
            ticks_per_second,
            requested_wait_millis: 0,
            effective_wait_millis: 0,
        }
    }

    /// The calibrated counter frequency in ticks per second. Always positive.
    pub fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }

    /// The calibration window the caller asked for, in milliseconds.
    pub fn requested_wait_millis(&self) -> u64 {
        self.requested_wait_millis
    }

    /// The window actually measured. Differs from the requested window only
    /// when a zero-length window was substituted with the minimum epsilon.
    pub fn effective_wait_millis(&self) -> u64 {
        self.effective_wait_millis
    }

    /// Convert a tick count to milliseconds using the calibrated frequency.
    pub fn ticks_to_ms(&self, ticks: u64) -> f64 {
        ticks as f64 * 1000.0 / self.ticks_per_second as f64
    }

    /// Convert milliseconds back to ticks using the calibrated frequency.
    pub fn ms_to_ticks(&self, millis: f64) -> u64 {
        (millis * self.ticks_per_second as f64 / 1000.0).round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_produces_positive_frequency() {
        let cal = Calibration::estimate(5).unwrap();
        assert!(cal.ticks_per_second() > 0);
        assert_eq!(cal.requested_wait_millis(), 5);
        assert_eq!(cal.effective_wait_millis(), 5);
    }

    #[test]
    fn zero_window_substitutes_epsilon() {
        let cal = Calibration::estimate(0).unwrap();
        assert!(cal.ticks_per_second() > 0);
        assert_eq!(cal.requested_wait_millis(), 0);
        assert_eq!(cal.effective_wait_millis(), MIN_WAIT_MILLIS);
    }

    #[test]
    fn repeated_estimates_agree_roughly() {
        let a = Calibration::estimate(20).unwrap().ticks_per_second() as f64;
        let b = Calibration::estimate(20).unwrap().ticks_per_second() as f64;
        let ratio = a.max(b) / a.min(b);
        assert!(ratio < 2.0, "estimates disagree wildly: {a} vs {b}");
    }

    #[test]
    fn estimate_never_yields_zero_frequency() {
        // The smallest windows quantize the ratio hardest; a successful
        // estimate must still carry a positive frequency, and the only
        // alternative is the timeout error.
        for wait in [0, 1, 2] {
            match Calibration::estimate(wait) {
                Ok(cal) => assert!(cal.ticks_per_second() > 0),
                Err(err) => assert!(matches!(err, TimingError::CalibrationTimeout { .. })),
            }
        }
    }

    #[test]
    fn conversion_round_trip_is_tight() {
        let cal = Calibration::with_frequency(3_000_000_000);
        let ticks = 1_234_567_u64;
        let ms = cal.ticks_to_ms(ticks);
        let back = cal.ms_to_ticks(ms);
        assert!(back.abs_diff(ticks) <= 1, "round trip drifted: {ticks} -> {back}");
    }

    #[test]
    fn ticks_to_ms_matches_frequency() {
        let cal = Calibration::with_frequency(1_000_000_000);
        let ms = cal.ticks_to_ms(1_000_000_000);
        assert!((ms - 1000.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "frequency must be positive")]
    fn zero_frequency_rejected() {
        let _ = Calibration::with_frequency(0);
    }
}
