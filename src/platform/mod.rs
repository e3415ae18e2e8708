//! Platform abstraction for hosts file access.

use std::path::PathBuf;

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

use anyhow::{Context, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// Env override for the hosts file location (e.g. in tests).
pub const HOSTS_FILE_ENV: &str = "HOSTMAN_HOSTS_FILE";

/// Trait for reading and writing hosts-format text files.
pub trait TextSource: Send + Sync {
    /// Read the file at `path` as ordered lines.
    fn read_lines(&self, path: &Path) -> Result<Vec<String>>;
    /// Replace the file at `path` with `content`.
    fn write_all_text(&self, path: &Path, content: &str) -> Result<()>;
}

/// Path of the system hosts file. If HOSTMAN_HOSTS_FILE is set, uses that path.
pub fn default_hosts_path() -> PathBuf {
    if let Ok(path) = std::env::var(HOSTS_FILE_ENV) {
        return PathBuf::from(path);
    }
    #[cfg(unix)]
    return unix::system_hosts_path();

    #[cfg(windows)]
    return windows::system_hosts_path();
}

/// Get platform TextSource implementation.
/// If HOSTMAN_HOSTS_FILE is set, plain file access is enough.
pub fn default_text_source() -> Box<dyn TextSource> {
    if std::env::var_os(HOSTS_FILE_ENV).is_some() {
        return Box::new(FileTextSource);
    }
    #[cfg(unix)]
    return Box::new(unix::PrivilegedTextSource::default());

    #[cfg(windows)]
    return Box::new(FileTextSource);
}

/// TextSource that reads/writes the file directly, under fs2 locks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextSource;

impl TextSource for FileTextSource {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let mut file = fs::OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("open {}", path.display()))?;
        fs2::FileExt::lock_shared(&file)?;
        let mut s = String::new();
        file.read_to_string(&mut s)
            .with_context(|| format!("read {}", path.display()))?;
        Ok(s.lines().map(String::from).collect())
    }

    fn write_all_text(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(p) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(p)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("open {} for writing", path.display()))?;
        fs2::FileExt::lock_exclusive(&file)?;
        file.set_len(0)
            .with_context(|| format!("truncate {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}
