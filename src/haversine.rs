//! Reference haversine distance and the coordinate-pair data model.
//!
//! Host-program glue for the benchmark: the timing core itself knows nothing
//! about coordinates.

use serde::{Deserialize, Serialize};

/// Sphere radius used by the benchmark, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6372.8;

/// One coordinate pair: (x0, y0) to (x1, y1), longitudes and latitudes in
/// degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pair {
    /// Longitude of the first point.
    pub x0: f64,
    /// Latitude of the first point.
    pub y0: f64,
    /// Longitude of the second point.
    pub x1: f64,
    /// Latitude of the second point.
    pub y1: f64,
}

/// The coordinate file's top-level shape: `{"pairs": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pairs {
    /// All coordinate pairs in file order.
    pub pairs: Vec<Pair>,
}

/// Reference haversine distance between two points on a sphere of the given
/// radius. Inputs in degrees, output in the radius's unit.
pub fn reference_haversine(x0: f64, y0: f64, x1: f64, y1: f64, radius: f64) -> f64 {
    let d_lat = (y1 - y0).to_radians();
    let d_lon = (x1 - x0).to_radians();
    let lat1 = y0.to_radians();
    let lat2 = y1.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    radius * c
}

/// Average haversine distance over a non-empty slice of pairs.
///
/// Returns 0.0 for an empty slice; callers that consider that an error check
/// before calling.
pub fn average_distance(pairs: &[Pair]) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }

    let sum: f64 = pairs
        .iter()
        .map(|pair| reference_haversine(pair.x0, pair.y0, pair.x1, pair.y1, EARTH_RADIUS_KM))
        .sum();

    sum / pairs.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        let d = reference_haversine(12.5, 45.0, 12.5, 45.0, EARTH_RADIUS_KM);
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn quarter_circumference_pole_to_equator() {
        // Equator to the north pole along a meridian is a quarter of the
        // circumference: pi * r / 2.
        let d = reference_haversine(0.0, 0.0, 0.0, 90.0, EARTH_RADIUS_KM);
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM / 2.0;
        assert!((d - expected).abs() < 1e-6, "got {d}, expected {expected}");
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = reference_haversine(2.35, 48.85, -0.13, 51.51, EARTH_RADIUS_KM);
        let ba = reference_haversine(-0.13, 51.51, 2.35, 48.85, EARTH_RADIUS_KM);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn average_of_empty_slice_is_zero() {
        assert_eq!(average_distance(&[]), 0.0);
    }

    #[test]
    fn average_matches_single_pair() {
        let pair = Pair {
            x0: 0.0,
            y0: 0.0,
            x1: 0.0,
            y1: 90.0,
        };
        let avg = average_distance(&[pair]);
        let single = reference_haversine(0.0, 0.0, 0.0, 90.0, EARTH_RADIUS_KM);
        assert!((avg - single).abs() < 1e-9);
    }

    #[test]
    fn pairs_parse_from_json() {
        let raw = r#"{"pairs": [{"x0": 1.0, "y0": 2.0, "x1": 3.0, "y1": 4.0}]}"#;
        let pairs: Pairs = serde_json::from_str(raw).unwrap();
        assert_eq!(pairs.pairs.len(), 1);
        assert_eq!(pairs.pairs[0].x1, 3.0);
    }
}
