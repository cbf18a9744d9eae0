//! JSON output for enriched documents.

use std::io::Write;

use log::debug;

use crate::error::OutputError;
use crate::model::Document;

/// Serializes `doc` as a single JSON object followed by a newline.
pub fn write_json<W: Write>(
    doc: &Document,
    mut writer: W,
    pretty: bool,
) -> Result<(), OutputError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, doc)?;
    } else {
        serde_json::to_writer(&mut writer, doc)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;

    debug!("wrote JSON for {} tracks", doc.tracks.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Point, Segment, Track};
    use serde_json::Value;
    use time::macros::datetime;

    fn sample_document() -> Document {
        let point = Point {
            lat: 1.5,
            lon: 2.5,
            elevation: 10.0,
            time: datetime!(2023-01-01 10:00:00 UTC),
            distance: 0.0,
            duration: 0,
            speed: 0.0,
            cumulative_distance: 0.0,
            cumulative_duration: 0,
        };
        let segment = Segment {
            start: Some(point.time),
            end: Some(point.time),
            points: vec![point],
            ..Segment::default()
        };
        let track = Track {
            start: segment.start,
            end: segment.end,
            segments: vec![segment, Segment::default()],
            ..Track::default()
        };

        Document {
            version: "1.1".to_string(),
            start: track.start,
            end: track.end,
            distance: 0.0,
            duration: 0,
            tracks: vec![track],
        }
    }

    fn to_value(doc: &Document, pretty: bool) -> Value {
        let mut output = Vec::new();
        write_json(doc, &mut output, pretty).unwrap();
        assert_eq!(output.last(), Some(&b'\n'));
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_write_json_field_names() {
        let json = to_value(&sample_document(), false);

        assert_eq!(json["version"], "1.1");
        assert_eq!(json["start"], "2023-01-01T10:00:00Z");
        assert_eq!(json["end"], "2023-01-01T10:00:00Z");
        assert_eq!(json["distance"], 0.0);
        assert_eq!(json["duration"], 0);
        assert!(json.get("speed").is_none(), "Document has no speed");

        let track = &json["tracks"][0];
        assert_eq!(track["speed"], 0.0);

        let point = &track["segments"][0]["points"][0];
        for key in [
            "lat",
            "lon",
            "elevation",
            "time",
            "distance",
            "duration",
            "speed",
            "cumulative_distance",
            "cumulative_duration",
        ] {
            assert!(point.get(key).is_some(), "Point is missing {key}");
        }
        assert_eq!(point["lat"], 1.5);
        assert_eq!(point["time"], "2023-01-01T10:00:00Z");
    }

    #[test]
    fn test_write_json_omits_absent_fields() {
        let json = to_value(&sample_document(), true);
        let empty_segment = &json["tracks"][0]["segments"][1];
        assert!(empty_segment.get("start").is_none());
        assert!(empty_segment.get("end").is_none());
        assert_eq!(empty_segment["points"], Value::Array(vec![]));

        let json = to_value(&Document::default(), false);
        assert!(json.get("version").is_none());
        assert!(json.get("start").is_none());
        assert_eq!(json["distance"], 0.0);
        assert_eq!(json["tracks"], Value::Array(vec![]));
    }
}
