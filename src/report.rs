//! Report derivation: converting accumulated ticks into milliseconds and
//! percentage shares.
//!
//! A [`Report`] is computed at render time from a closed [`ZoneRegistry`] and
//! a [`Calibration`]; nothing here is accumulated during measurement.

use serde::{Deserialize, Serialize};

use crate::error::TimingError;
use crate::measurement::Calibration;
use crate::registry::ZoneRegistry;

/// A complete phase-timing breakdown for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Wall time between the first start and the last stop, in milliseconds.
    pub total_ms: f64,

    /// The same interval in raw counter ticks.
    pub total_ticks: u64,

    /// The calibrated counter frequency the conversion used.
    pub ticks_per_second: u64,

    /// Per-zone rows in the order the zones were first opened.
    pub rows: Vec<ReportRow>,
}

/// One zone's share of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    /// Zone label.
    pub name: String,

    /// Exclusive ticks the row was derived from.
    pub exclusive_ticks: u64,

    /// Exclusive duration in milliseconds.
    pub duration_ms: f64,

    /// Exclusive ticks as a percentage of the total interval. Zero for a
    /// degenerate run with no recorded work.
    pub percent: f64,

    /// Completed start/stop pairs for the zone.
    pub hit_count: u64,
}

impl Report {
    /// Derive a report from a registry and a calibrated frequency.
    ///
    /// Rows follow registry insertion order so the report reads in execution
    /// order. A registry with no completed work yields an empty or all-zero
    /// report rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`TimingError::ZoneNotClosed`] if any zone is still open;
    /// the registry is never auto-closed on read.
    pub fn build(registry: &ZoneRegistry, calibration: &Calibration) -> Result<Self, TimingError> {
        registry.ensure_closed()?;

        let total_ticks = registry.total_elapsed();
        let rows = registry
            .zones()
            .iter()
            .map(|zone| {
                let exclusive = zone.exclusive_ticks();
                let percent = if total_ticks == 0 {
                    0.0
                } else {
                    100.0 * exclusive as f64 / total_ticks as f64
                };
                ReportRow {
                    name: zone.name().to_string(),
                    exclusive_ticks: exclusive,
                    duration_ms: calibration.ticks_to_ms(exclusive),
                    percent,
                    hit_count: zone.hit_count(),
                }
            })
            .collect();

        Ok(Self {
            total_ms: calibration.ticks_to_ms(total_ticks),
            total_ticks,
            ticks_per_second: calibration.ticks_per_second(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn spin(millis: u64) {
        let deadline = Instant::now() + Duration::from_millis(millis);
        while Instant::now() < deadline {
            std::hint::black_box(0u64);
        }
    }

    #[test]
    fn rows_follow_execution_order() {
        let mut registry = ZoneRegistry::new();
        for name in ["startup", "read", "parse"] {
            registry.start(name);
            spin(1);
            registry.stop(name).unwrap();
        }

        let cal = Calibration::with_frequency(1_000_000_000);
        let report = Report::build(&registry, &cal).unwrap();

        let names: Vec<&str> = report.rows.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, ["startup", "read", "parse"]);
        assert!(report.total_ms > 0.0);
        let percent_sum: f64 = report.rows.iter().map(|row| row.percent).sum();
        assert!(percent_sum <= 100.0 + 1e-9);
    }

    #[test]
    fn open_zone_blocks_the_report() {
        let mut registry = ZoneRegistry::new();
        registry.start("sum");

        let cal = Calibration::with_frequency(1_000_000_000);
        let err = Report::build(&registry, &cal).unwrap_err();
        assert!(matches!(err, TimingError::ZoneNotClosed { .. }));
    }

    #[test]
    fn degenerate_run_reports_zero_without_failing() {
        let registry = ZoneRegistry::new();
        let cal = Calibration::with_frequency(1_000_000_000);
        let report = Report::build(&registry, &cal).unwrap();

        assert_eq!(report.total_ticks, 0);
        assert_eq!(report.total_ms, 0.0);
        assert!(report.rows.is_empty());
    }

    #[test]
    fn serializes_to_json() {
        let report = Report {
            total_ms: 12.5,
            total_ticks: 12_500_000,
            ticks_per_second: 1_000_000_000,
            rows: vec![ReportRow {
                name: "parse".to_string(),
                exclusive_ticks: 10_000_000,
                duration_ms: 10.0,
                percent: 80.0,
                hit_count: 1,
            }],
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"ticks_per_second\":1000000000"));
        assert!(json.contains("\"parse\""));
    }
}
