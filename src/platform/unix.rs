//! Unix (macOS, Linux) platform implementations.

use anyhow::{Context, Result};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

use super::{FileTextSource, TextSource};

pub fn system_hosts_path() -> PathBuf {
    PathBuf::from("/etc/hosts")
}

/// File access that escalates writes the current user may not perform.
///
/// Reads go straight to the file. A write refused with `PermissionDenied` is
/// staged in a temp file and copied into place with `pkexec cp`.
#[derive(Debug, Clone, Default)]
pub struct PrivilegedTextSource {
    inner: FileTextSource,
}

impl TextSource for PrivilegedTextSource {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        self.inner.read_lines(path)
    }

    fn write_all_text(&self, path: &Path, content: &str) -> Result<()> {
        match self.inner.write_all_text(path, content) {
            Ok(()) => Ok(()),
            Err(e) if is_permission_denied(&e) => {
                tracing::warn!(path = %path.display(), "permission denied, retrying with pkexec");
                privileged_copy(path, content)
            }
            Err(e) => Err(e),
        }
    }
}

fn is_permission_denied(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|cause| cause.downcast_ref::<std::io::Error>())
        .any(|io| io.kind() == ErrorKind::PermissionDenied)
}

fn privileged_copy(path: &Path, content: &str) -> Result<()> {
    let temp = staging_file(content)?;
    let status = Command::new("pkexec")
        .arg("cp")
        .arg(temp.path())
        .arg(path)
        .status()
        .context("pkexec cp hosts")?;
    if !status.success() {
        anyhow::bail!("Failed to write {} with elevated privileges", path.display());
    }
    Ok(())
}

/// Fresh, exclusively created temp file holding `content`; removed on drop.
pub fn staging_file(content: &str) -> Result<NamedTempFile> {
    let mut temp = tempfile::Builder::new()
        .prefix("hostman-")
        .tempfile()
        .context("create staging file")?;
    temp.write_all(content.as_bytes())
        .and_then(|()| temp.flush())
        .with_context(|| format!("write {}", temp.path().display()))?;
    Ok(temp)
}
