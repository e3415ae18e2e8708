//! Hosts file and profile persistence around the in-memory tree.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::HostmanPaths;
use crate::hostfile::HostFile;
use crate::platform::TextSource;
use crate::profile::{self, Profile};
use crate::store;

/// Text written by [`HostsManager::restore_default`].
pub const DEFAULT_HOSTS_TEXT: &str = "\
# Static table lookup for host names.
# Each line maps an IP address to one or more host names.

127.0.0.1\tlocalhost
::1\tlocalhost
";

/// Owns the tree currently being edited and every read/write around it.
///
/// Exactly one [`HostFile`] is current at a time. [`reload`](Self::reload)
/// swaps in a freshly parsed tree instead of editing the old one.
pub struct HostsManager {
    paths: HostmanPaths,
    hosts_path: PathBuf,
    source: Box<dyn TextSource>,
    current: HostFile,
}

impl HostsManager {
    pub fn new(paths: HostmanPaths, hosts_path: impl Into<PathBuf>, source: Box<dyn TextSource>) -> Self {
        let hosts_path = hosts_path.into();
        Self {
            paths,
            current: HostFile::new(Some(hosts_path.clone())),
            hosts_path,
            source,
        }
    }

    /// Manager with the hosts file already loaded.
    pub fn open(paths: HostmanPaths, hosts_path: impl Into<PathBuf>, source: Box<dyn TextSource>) -> Result<Self> {
        let mut manager = Self::new(paths, hosts_path, source);
        manager.reload()?;
        Ok(manager)
    }

    pub fn paths(&self) -> &HostmanPaths {
        &self.paths
    }

    pub fn hosts_path(&self) -> &Path {
        &self.hosts_path
    }

    pub fn current(&self) -> &HostFile {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut HostFile {
        &mut self.current
    }

    /// Parse the hosts file into a new tree.
    pub fn load(&self) -> Result<HostFile> {
        self.load_from(&self.hosts_path)
    }

    /// Parse any hosts-format file into a new tree.
    pub fn load_from(&self, path: &Path) -> Result<HostFile> {
        let lines = self
            .source
            .read_lines(path)
            .with_context(|| format!("load hosts file {}", path.display()))?;
        let file = HostFile::from_lines(Some(path.to_path_buf()), lines);
        tracing::info!(path = %path.display(), entries = file.len(), "loaded hosts file");
        Ok(file)
    }

    /// Replace the current tree with a fresh parse of the hosts file.
    pub fn reload(&mut self) -> Result<()> {
        let mut fresh = self.load()?;
        fresh.adopt_observers(&mut self.current);
        self.current = fresh;
        Ok(())
    }

    /// Write the current tree to the hosts file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.current, &self.hosts_path)
    }

    /// Write `file` to `path`.
    pub fn save_to(&self, file: &HostFile, path: &Path) -> Result<()> {
        self.source
            .write_all_text(path, file.text())
            .with_context(|| format!("save hosts file {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved hosts file");
        Ok(())
    }

    /// Overwrite the hosts file with [`DEFAULT_HOSTS_TEXT`] and reload.
    pub fn restore_default(&mut self) -> Result<()> {
        self.source
            .write_all_text(&self.hosts_path, DEFAULT_HOSTS_TEXT)
            .with_context(|| format!("restore default hosts file {}", self.hosts_path.display()))?;
        tracing::info!(path = %self.hosts_path.display(), "restored default hosts file");
        self.reload()
    }

    pub fn list_profiles(&self) -> Result<Vec<Profile>> {
        profile::list_profiles(&self.paths)
    }

    /// Store the current tree as profile `name`, replacing any existing one.
    pub fn save_profile(&self, name: &str) -> Result<PathBuf> {
        let path = profile::profile_path(&self.paths, name)?;
        store::ensure_dirs(&self.paths)?;
        self.save_to(&self.current, &path)?;
        tracing::info!(profile = name, "saved profile");
        Ok(path)
    }

    /// Parse profile `name` without touching the hosts file.
    pub fn load_profile(&self, name: &str) -> Result<HostFile> {
        let path = self.existing_profile(name)?;
        self.load_from(&path)
    }

    /// Copy profile `name` over the hosts file and reload.
    pub fn use_profile(&mut self, name: &str) -> Result<()> {
        let path = self.existing_profile(name)?;
        let lines = self
            .source
            .read_lines(&path)
            .with_context(|| format!("read profile {}", path.display()))?;
        let mut text = lines.join("\n");
        text.push('\n');
        self.source
            .write_all_text(&self.hosts_path, &text)
            .with_context(|| format!("write hosts file {}", self.hosts_path.display()))?;
        tracing::info!(profile = name, path = %self.hosts_path.display(), "applied profile");
        self.reload()
    }

    /// Delete profile `name`; `false` if it did not exist.
    pub fn delete_profile(&self, name: &str) -> Result<bool> {
        let path = profile::profile_path(&self.paths, name)?;
        if !path.is_file() {
            return Ok(false);
        }
        std::fs::remove_file(&path).with_context(|| format!("delete profile {}", path.display()))?;
        tracing::info!(profile = name, "deleted profile");
        Ok(true)
    }

    fn existing_profile(&self, name: &str) -> Result<PathBuf> {
        let path = profile::profile_path(&self.paths, name)?;
        if !path.is_file() {
            anyhow::bail!("profile '{name}' does not exist");
        }
        Ok(path)
    }
}
