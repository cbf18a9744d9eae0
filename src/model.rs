//! Raw and enriched GPX hierarchies.
//!
//! The raw types are what the decoder produces. The enriched types carry the
//! derived distance, duration and speed at every level and are what gets
//! serialized.

use serde::Serialize;
use time::OffsetDateTime;

use crate::TrackPoint;

/// A decoded GPX document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGpx {
    pub version: String,
    pub tracks: Vec<RawTrack>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrack {
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSegment {
    pub points: Vec<TrackPoint>,
}

/// Top-level enriched document. Carries no speed of its own since its tracks
/// may be unrelated activities.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<OffsetDateTime>,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<OffsetDateTime>,
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: u64,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Track {
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<OffsetDateTime>,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<OffsetDateTime>,
    pub distance: f64,
    pub duration: u64,
    /// km/h over the whole track.
    pub speed: f64,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Segment {
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<OffsetDateTime>,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<OffsetDateTime>,
    pub distance: f64,
    pub duration: u64,
    pub speed: f64,
    pub points: Vec<Point>,
}

/// A track point with statistics relative to its predecessor in the segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
    pub elevation: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub distance: f64,
    pub duration: u64,
    pub speed: f64,
    pub cumulative_distance: f64,
    pub cumulative_duration: u64,
}
