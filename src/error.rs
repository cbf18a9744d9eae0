use thiserror::Error;

/// Errors raised while decoding a GPX document.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Error at position {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Missing attribute '{0}' on <trkpt>")]
    MissingAttribute(&'static str),

    #[error("Invalid value '{value}' for attribute '{attribute}' on <trkpt>")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },

    #[error("Invalid elevation '{0}'")]
    InvalidElevation(String),

    #[error("Invalid time '{0}'")]
    InvalidTime(String),

    #[error("Track point {point} of segment {segment} in track {track} at {lat},{lon} has no time")]
    MissingTime {
        track: usize,
        segment: usize,
        point: usize,
        lat: f64,
        lon: f64,
    },

    #[error("Unexpected end of input at position {position}: document is truncated")]
    UnexpectedEof { position: u64 },

    #[error("Not a GPX document: no <gpx> element found")]
    NotGpx,
}

/// Errors raised while writing the enriched document.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to serialize JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}
