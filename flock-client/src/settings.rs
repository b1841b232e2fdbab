use anyhow::{Context, Result};
use flock_shared::FlockSettings;
use std::path::Path;

/// Reads settings from a JSON file. Both a bare `FlockSettings` object and a
/// `{"settings": ...}` update are accepted.
pub fn load_settings(path: &Path) -> Result<FlockSettings> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;

    FlockSettings::from_document(&json)
        .with_context(|| format!("Invalid settings in {}", path.display()))
}
