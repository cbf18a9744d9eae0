//! Bottom-up statistics over a decoded GPX hierarchy.
//!
//! Points are enriched first, then each segment, track and finally the
//! document is rolled up from its already enriched children. Every function
//! here is pure and total: empty collections produce zero totals and no
//! start/end.

use log::debug;

use crate::model::{Document, Point, RawGpx, RawSegment, RawTrack, Segment, Track};
use crate::{TrackPoint, elapsed_seconds, haversine_distance, speed_kmh};

impl Point {
    /// The first point of a segment: every derived field is zero.
    fn first(point: &TrackPoint) -> Self {
        Self {
            lat: point.lat,
            lon: point.lon,
            elevation: point.elevation,
            time: point.time,
            distance: 0.0,
            duration: 0,
            speed: 0.0,
            cumulative_distance: 0.0,
            cumulative_duration: 0,
        }
    }

    fn following(prev: &Point, point: &TrackPoint) -> Self {
        let distance = haversine_distance(point.lat, point.lon, prev.lat, prev.lon);
        let duration = elapsed_seconds(prev.time, point.time);

        Self {
            lat: point.lat,
            lon: point.lon,
            elevation: point.elevation,
            time: point.time,
            distance,
            duration,
            speed: speed_kmh(distance, duration),
            cumulative_distance: prev.cumulative_distance + distance,
            cumulative_duration: prev.cumulative_duration + duration,
        }
    }
}

/// Derives per-point and cumulative statistics for one segment's points.
pub fn enrich_points(points: &[TrackPoint]) -> Vec<Point> {
    let mut enriched: Vec<Point> = Vec::with_capacity(points.len());

    for point in points {
        let next = match enriched.last() {
            Some(prev) => Point::following(prev, point),
            None => Point::first(point),
        };
        enriched.push(next);
    }

    enriched
}

pub fn enrich_segment(segment: &RawSegment) -> Segment {
    let points = enrich_points(&segment.points);

    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Segment::default();
    };

    Segment {
        start: Some(first.time),
        end: Some(last.time),
        distance: last.cumulative_distance,
        duration: last.cumulative_duration,
        speed: speed_kmh(last.cumulative_distance, last.cumulative_duration),
        points,
    }
}

/// Rolls segments up into a track. Speed comes from the track totals rather
/// than from averaging segment speeds.
pub fn enrich_track(track: &RawTrack) -> Track {
    let segments: Vec<Segment> = track.segments.iter().map(enrich_segment).collect();

    let distance = segments.iter().fold(0.0, |acc, s| acc + s.distance);
    let duration: u64 = segments.iter().map(|s| s.duration).sum();

    Track {
        start: segments.first().and_then(|s| s.start),
        end: segments.last().and_then(|s| s.end),
        distance,
        duration,
        speed: speed_kmh(distance, duration),
        segments,
    }
}

pub fn enrich_document(gpx: &RawGpx) -> Document {
    let tracks: Vec<Track> = gpx.tracks.iter().map(enrich_track).collect();

    let distance = tracks.iter().fold(0.0, |acc, t| acc + t.distance);
    let duration: u64 = tracks.iter().map(|t| t.duration).sum();

    debug!(
        "enriched {} tracks: {:.1}m over {}s",
        tracks.len(),
        distance,
        duration
    );

    Document {
        version: gpx.version.clone(),
        start: tracks.first().and_then(|t| t.start),
        end: tracks.last().and_then(|t| t.end),
        distance,
        duration,
        tracks,
    }
}
