// Settings service
// Loads and persists client settings as a TOML file

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::Settings;

/// Default location of the settings file under the platform config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "appointment-calendar")
        .map(|dirs| dirs.config_dir().join("settings.toml"))
}

/// Load settings from a TOML file. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<Settings> {
    if !path.exists() {
        log::info!("No settings file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read settings from {}", path.display()))?;
    let settings: Settings =
        toml::from_str(&content).map_err(|e| anyhow!("Failed to parse settings: {}", e))?;
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;

    Ok(settings)
}

/// Persist settings, creating parent directories as needed.
pub fn save(settings: &Settings, path: &Path) -> Result<()> {
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;

    let serialized =
        toml::to_string_pretty(settings).context("Failed to serialize settings")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, serialized)
        .context(format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}
