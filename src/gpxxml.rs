//! Streaming GPX decoder.
//!
//! Reads `<trk>`, `<trkseg>` and `<trkpt>` elements into a [`RawGpx`] and
//! ignores everything else (routes, waypoints, metadata, extensions).

use log::debug;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

use crate::TrackPoint;
use crate::error::DecodeError;
use crate::model::{RawGpx, RawSegment, RawTrack};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Elevation,
    Time,
}

/// A `<trkpt>` whose children have not all been read yet.
struct PendingPoint {
    lat: f64,
    lon: f64,
    elevation: Option<f64>,
    time: Option<OffsetDateTime>,
    /// Element depth of the `<trkpt>` itself.
    depth: usize,
}

impl PendingPoint {
    fn finish(self, location: PointLocation) -> Result<TrackPoint, DecodeError> {
        let time = self.time.ok_or(DecodeError::MissingTime {
            track: location.track,
            segment: location.segment,
            point: location.point,
            lat: self.lat,
            lon: self.lon,
        })?;

        Ok(TrackPoint {
            lat: self.lat,
            lon: self.lon,
            elevation: self.elevation.unwrap_or_default(),
            time,
        })
    }

    /// `ele` and `time` only count as unprefixed direct children.
    fn child_field(&self, e: &BytesStart<'_>, depth: usize) -> Option<Field> {
        if depth != self.depth + 1 || e.name().prefix().is_some() {
            return None;
        }
        match e.local_name().as_ref() {
            b"ele" => Some(Field::Elevation),
            b"time" => Some(Field::Time),
            _ => None,
        }
    }
}

/// 1-based position of a track point in the document.
#[derive(Debug, Clone, Copy)]
struct PointLocation {
    track: usize,
    segment: usize,
    point: usize,
}

impl PointLocation {
    fn next(gpx: Option<&RawGpx>, track: Option<&RawTrack>, segment: &RawSegment) -> Self {
        Self {
            track: gpx.map_or(0, |g| g.tracks.len()) + 1,
            segment: track.map_or(0, |t| t.segments.len()) + 1,
            point: segment.points.len() + 1,
        }
    }
}

pub fn decode(input: &[u8]) -> Result<RawGpx, DecodeError> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();

    let mut gpx: Option<RawGpx> = None;
    let mut closed = false;
    let mut track: Option<RawTrack> = None;
    let mut segment: Option<RawSegment> = None;
    let mut point: Option<PendingPoint> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Err(e) => {
                return Err(DecodeError::Xml {
                    position: reader.buffer_position(),
                    source: e,
                });
            }
            Ok(Event::Eof) => break,
            Ok(event) => event.into_owned(),
        };

        match event {
            Event::Start(ref e) => {
                depth += 1;
                if let Some(p) = point.as_ref() {
                    field = p.child_field(e, depth);
                    text.clear();
                } else {
                    match e.local_name().as_ref() {
                        b"gpx" => gpx = Some(start_document(e)),
                        b"trk" => track = Some(RawTrack::default()),
                        b"trkseg" if track.is_some() => segment = Some(RawSegment::default()),
                        b"trkpt" if segment.is_some() => {
                            let (lat, lon) = parse_lat_lon(e)?;
                            point = Some(PendingPoint {
                                lat,
                                lon,
                                elevation: None,
                                time: None,
                                depth,
                            });
                        }
                        _ => {}
                    }
                }
            }

            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"gpx" => {
                    gpx = Some(start_document(e));
                    closed = true;
                }
                b"trk" => {
                    if let Some(doc) = gpx.as_mut() {
                        doc.tracks.push(RawTrack::default());
                    }
                }
                b"trkseg" => {
                    if let Some(t) = track.as_mut() {
                        t.segments.push(RawSegment::default());
                    }
                }
                b"trkpt" if point.is_none() => {
                    if let Some(s) = segment.as_ref() {
                        let location = PointLocation::next(gpx.as_ref(), track.as_ref(), s);
                        let (lat, lon) = parse_lat_lon(e)?;
                        return Err(DecodeError::MissingTime {
                            track: location.track,
                            segment: location.segment,
                            point: location.point,
                            lat,
                            lon,
                        });
                    }
                }
                _ => {}
            },

            Event::End(ref e) => {
                let name = e.local_name();
                match (name.as_ref(), field) {
                    (b"ele", Some(Field::Elevation)) => {
                        let value = text.trim();
                        let elevation = value
                            .parse::<f64>()
                            .map_err(|_| DecodeError::InvalidElevation(value.to_string()))?;
                        if let Some(p) = point.as_mut() {
                            p.elevation = Some(elevation);
                        }
                        field = None;
                    }
                    (b"time", Some(Field::Time)) => {
                        let value = text.trim();
                        let time = OffsetDateTime::parse(value, &Iso8601::DEFAULT)
                            .map_err(|_| DecodeError::InvalidTime(value.to_string()))?;
                        if let Some(p) = point.as_mut() {
                            p.time = Some(time);
                        }
                        field = None;
                    }
                    (b"trkpt", _) if point.as_ref().is_some_and(|p| p.depth == depth) => {
                        if let (Some(p), Some(s)) = (point.take(), segment.as_mut()) {
                            let location = PointLocation::next(gpx.as_ref(), track.as_ref(), s);
                            s.points.push(p.finish(location)?);
                        }
                    }
                    _ if point.is_some() => {}
                    (b"trkseg", _) => {
                        if let (Some(s), Some(t)) = (segment.take(), track.as_mut()) {
                            t.segments.push(s);
                        }
                    }
                    (b"trk", _) => {
                        if let (Some(t), Some(doc)) = (track.take(), gpx.as_mut()) {
                            doc.tracks.push(t);
                        }
                    }
                    (b"gpx", _) => closed = true,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }

            Event::Text(ref e) => {
                if field.is_some()
                    && let Ok(s) = std::str::from_utf8(e)
                {
                    text.push_str(s);
                }
            }

            Event::CData(ref e) => {
                if field.is_some()
                    && let Ok(s) = std::str::from_utf8(e)
                {
                    text.push_str(s);
                }
            }

            _ => {}
        }

        buf.clear();
    }

    let gpx = gpx.ok_or(DecodeError::NotGpx)?;
    if !closed || track.is_some() || segment.is_some() || point.is_some() {
        return Err(DecodeError::UnexpectedEof {
            position: reader.buffer_position(),
        });
    }

    debug!(
        "decoded GPX {} with {} tracks",
        if gpx.version.is_empty() {
            "(no version)"
        } else {
            gpx.version.as_str()
        },
        gpx.tracks.len()
    );

    Ok(gpx)
}

fn start_document(e: &BytesStart<'_>) -> RawGpx {
    let version = e
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"version")
        .and_then(|attr| std::str::from_utf8(&attr.value).ok().map(str::to_string))
        .unwrap_or_default();

    RawGpx {
        version,
        tracks: Vec::new(),
    }
}

fn parse_lat_lon(e: &BytesStart<'_>) -> Result<(f64, f64), DecodeError> {
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for attr in e.attributes().flatten() {
        let (name, slot) = match attr.key.as_ref() {
            b"lat" => ("lat", &mut lat),
            b"lon" => ("lon", &mut lon),
            _ => continue,
        };

        let value = std::str::from_utf8(&attr.value).unwrap_or_default().trim();
        let parsed = value
            .parse::<f64>()
            .map_err(|_| DecodeError::InvalidAttribute {
                attribute: name,
                value: value.to_string(),
            })?;
        *slot = Some(parsed);
    }

    let lat = lat.ok_or(DecodeError::MissingAttribute("lat"))?;
    let lon = lon.ok_or(DecodeError::MissingAttribute("lon"))?;

    Ok((lat, lon))
}
