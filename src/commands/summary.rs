use crate::commands::read_input;
use gpxtojson::model::Document;
use gpxtojson::{gpxxml::decode, stats::enrich_document};
use std::error::Error;
use std::io::{self, Write};
use std::path::Path;

pub fn summary_command(path: &Path) -> Result<(), Box<dyn Error>> {
    let input = read_input(path)?;

    let gpx = decode(&input)?;
    let doc = enrich_document(&gpx);

    write_summary(&doc, io::stdout().lock())?;
    Ok(())
}

fn write_summary<W: Write>(doc: &Document, mut out: W) -> io::Result<()> {
    if !doc.version.is_empty() {
        writeln!(out, "version: {}", doc.version)?;
    }

    for (i, track) in doc.tracks.iter().enumerate() {
        writeln!(
            out,
            "track {}: {:.2} km in {} ({:.1} km/h), {} segments",
            i + 1,
            track.distance / 1000.0,
            format_duration(track.duration),
            track.speed,
            track.segments.len()
        )?;
    }

    // No overall speed: tracks may be unrelated activities
    writeln!(
        out,
        "total: {:.2} km in {}",
        doc.distance / 1000.0,
        format_duration(doc.duration)
    )?;

    out.flush()
}

fn format_duration(seconds: u64) -> String {
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpxtojson::model::Track;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00:00");
        assert_eq!(format_duration(59), "0:00:59");
        assert_eq!(format_duration(3661), "1:01:01");
        assert_eq!(format_duration(90000), "25:00:00");
    }

    #[test]
    fn test_write_summary() {
        let doc = Document {
            version: "1.1".to_string(),
            distance: 1500.0,
            duration: 600,
            tracks: vec![Track {
                distance: 1500.0,
                duration: 600,
                speed: 9.0,
                ..Track::default()
            }],
            ..Document::default()
        };

        let mut output = Vec::new();
        write_summary(&doc, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("version: 1.1"));
        assert!(text.contains("track 1: 1.50 km in 0:10:00 (9.0 km/h), 0 segments"));
        assert!(text.ends_with("total: 1.50 km in 0:10:00\n"));
    }

    #[test]
    fn test_write_summary_empty_document() {
        let mut output = Vec::new();
        write_summary(&Document::default(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(text, "total: 0.00 km in 0:00:00\n");
    }
}
