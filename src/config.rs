//! Settings loading and path resolution.
//!
//! Supports HOSTMAN_HOME env var override for testing.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Env override for the data directory.
pub const HOME_ENV: &str = "HOSTMAN_HOME";

/// Paths for the hostman data store.
#[derive(Debug, Clone)]
pub struct HostmanPaths {
    pub config_dir: PathBuf,
    pub settings_file: PathBuf,
    pub profiles_dir: PathBuf,
}

impl HostmanPaths {
    /// Build paths from base directory (e.g. ProjectDirs data dir or HOSTMAN_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        let settings_file = base.join("settings.toml");
        let profiles_dir = base.join("profiles");
        Self {
            config_dir: base,
            settings_file,
            profiles_dir,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default hostman paths (respects HOSTMAN_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var(HOME_ENV) {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("com", "hostman", "hostman") {
            dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".hostman")
        };
        Self::from_base(base)
    }
}

/// settings.toml structure.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// Hosts file to edit instead of the platform default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts_file: Option<PathBuf>,
    /// Profile most recently applied with `profile load`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_profile: Option<String>,
}

impl Settings {
    /// Load settings from paths (with shared lock when file exists).
    pub fn load(paths: &HostmanPaths) -> Result<Settings> {
        if paths.settings_file.is_file() {
            let mut file = fs::OpenOptions::new().read(true).open(&paths.settings_file)?;
            fs2::FileExt::lock_shared(&file)?;
            use std::io::Read;
            let mut s = String::new();
            file.read_to_string(&mut s)?;
            let settings: Settings = toml::from_str(&s)
                .with_context(|| format!("parse {}", paths.settings_file.display()))?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to paths (with exclusive lock). Creates parent dirs if needed.
    pub fn save(&self, paths: &HostmanPaths) -> Result<()> {
        if let Some(p) = paths.settings_file.parent() {
            fs::create_dir_all(p)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&paths.settings_file)?;
        fs2::FileExt::lock_exclusive(&file)?;
        let s = toml::to_string_pretty(self)?;
        use std::io::Write;
        file.write_all(s.as_bytes())?;
        Ok(())
    }
}

/// Hosts file to operate on: explicit flag, then HOSTMAN_HOSTS_FILE, then
/// settings, then the platform default.
pub fn resolve_hosts_path(flag: Option<&Path>, settings: &Settings) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Some(path) = std::env::var_os(crate::platform::HOSTS_FILE_ENV) {
        return PathBuf::from(path);
    }
    if let Some(path) = &settings.hosts_file {
        return path.clone();
    }
    crate::platform::default_hosts_path()
}
