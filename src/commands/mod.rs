pub mod convert;
pub mod summary;

use log::info;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Reads the whole input, treating `-` as stdin.
pub fn read_input(path: &Path) -> Result<Vec<u8>, Box<dyn Error>> {
    let input = if path.as_os_str() == "-" {
        let mut input = Vec::new();
        io::stdin().lock().read_to_end(&mut input)?;
        input
    } else {
        fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?
    };

    info!("read {} bytes from {}", input.len(), path.display());
    Ok(input)
}
