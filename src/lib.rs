pub mod error;
pub mod gpxxml;
pub mod model;
pub mod output;
pub mod stats;

use log::warn;
use time::OffsetDateTime;

/// Mean Earth radius in meters used for all great-circle distances.
pub const EARTH_RADIUS: f64 = 6371000.0;

/// A decoded GPX track point, before any statistics are derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    pub elevation: f64,
    pub time: OffsetDateTime,
}

/// Great-circle distance in meters between two coordinates given in degrees.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS`]. Any
/// finite input is accepted, including identical and antipodal points.
///
/// References:
/// - R.W. Sinnott, "Virtues of the Haversine", Sky and Telescope, vol. 68, no. 2, 1984, p. 159
/// - https://en.wikipedia.org/wiki/Haversine_formula
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    // a = sin²(Δφ/2) + cos φ1 ⋅ cos φ2 ⋅ sin²(Δλ/2)
    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    // c = 2 ⋅ atan2(√a, √(1−a))
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS * c
}

/// Average speed in km/h for a distance in meters covered in whole seconds.
///
/// Returns 0 when no time has elapsed.
pub fn speed_kmh(distance: f64, duration: u64) -> f64 {
    if duration > 0 {
        (distance / 1000.0) / (duration as f64 / 60.0 / 60.0)
    } else {
        0.0
    }
}

/// Whole seconds from `from` to `to`, truncated toward zero.
///
/// A backwards step in time is clamped to zero.
pub fn elapsed_seconds(from: OffsetDateTime, to: OffsetDateTime) -> u64 {
    let seconds = (to - from).whole_seconds();
    if seconds < 0 {
        warn!("timestamp {to} precedes previous point at {from}, using zero duration");
        0
    } else {
        seconds as u64
    }
}
