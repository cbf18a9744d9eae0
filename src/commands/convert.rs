use crate::commands::read_input;
use gpxtojson::{gpxxml::decode, output::write_json, stats::enrich_document};
use std::error::Error;
use std::io;
use std::path::Path;

pub fn convert_command(path: &Path, pretty: bool) -> Result<(), Box<dyn Error>> {
    let input = read_input(path)?;

    let gpx = decode(&input)?;
    let doc = enrich_document(&gpx);

    write_json(&doc, io::stdout().lock(), pretty)?;
    Ok(())
}
