//! Data store operations and directory layout.

use anyhow::Result;

use crate::config::{HostmanPaths, Settings};

/// Ensure the data directory and the profile directory exist.
pub fn ensure_dirs(paths: &HostmanPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.config_dir)?;
    std::fs::create_dir_all(&paths.profiles_dir)?;
    Ok(())
}

pub fn load_settings(paths: &HostmanPaths) -> Result<Settings> {
    Settings::load(paths)
}

pub fn save_settings(paths: &HostmanPaths, settings: &Settings) -> Result<()> {
    settings.save(paths)
}

/// Record `profile` as the last applied profile; `None` clears it.
pub fn remember_profile(paths: &HostmanPaths, profile: Option<&str>) -> Result<Settings> {
    let mut settings = load_settings(paths)?;
    settings.last_profile = profile.map(str::to_string);
    save_settings(paths, &settings)?;
    Ok(settings)
}
