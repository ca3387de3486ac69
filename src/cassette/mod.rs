//! Cassette format for recording and replaying random draws.
//!
//! A cassette pins down every value the generator pulled from its random
//! source, so a bulk generation can be reproduced exactly.

pub mod format;
pub mod recorder;
pub mod replayer;

use std::path::Path;

use format::Cassette;

/// Load a cassette file from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<Cassette, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
    serde_yaml::from_str(&content)
        .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
}
