//! Hosts file profiles: named snapshots kept in the profile directory.

use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::HostmanPaths;

/// File extension of stored profiles (without the dot).
pub const PROFILE_EXTENSION: &str = "hostsprofile";

/// A stored profile file.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub path: PathBuf,
    /// Last modification time, if the filesystem reports one.
    pub modified: Option<DateTime<Local>>,
}

impl Profile {
    /// Profile for an existing `<name>.hostsprofile` file; `None` for anything else.
    pub fn from_path(path: &Path) -> Option<Profile> {
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(PROFILE_EXTENSION) {
            return None;
        }
        let name = path.file_stem()?.to_str()?.to_string();
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from);
        Some(Profile {
            name,
            path: path.to_path_buf(),
            modified,
        })
    }
}

/// Reject names that are empty or would escape the profile directory.
pub fn validate_profile_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        anyhow::bail!("empty profile name");
    }
    if trimmed != name {
        anyhow::bail!("invalid profile name {name:?}: leading or trailing whitespace");
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        anyhow::bail!("invalid profile name {name:?}: must not contain path separators");
    }
    Ok(())
}

/// Path of the profile named `name`.
pub fn profile_path(paths: &HostmanPaths, name: &str) -> Result<PathBuf> {
    validate_profile_name(name)?;
    Ok(paths
        .profiles_dir
        .join(format!("{name}.{PROFILE_EXTENSION}")))
}

/// All stored profiles, sorted by name.
pub fn list_profiles(paths: &HostmanPaths) -> Result<Vec<Profile>> {
    let mut profiles = Vec::new();
    if paths.profiles_dir.is_dir() {
        for e in fs::read_dir(&paths.profiles_dir)? {
            let e = e?;
            if let Some(profile) = Profile::from_path(&e.path()) {
                profiles.push(profile);
            }
        }
    }
    profiles.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(profiles)
}

/// Check if a profile exists.
pub fn profile_exists(paths: &HostmanPaths, name: &str) -> bool {
    profile_path(paths, name).is_ok_and(|p| p.is_file())
}
