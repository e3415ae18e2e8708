//! Windows platform implementations.

use std::path::PathBuf;

/// `%SystemRoot%\System32\drivers\etc\hosts`, falling back to `C:\Windows`.
pub fn system_hosts_path() -> PathBuf {
    let root = std::env::var_os("SystemRoot")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\Windows"));
    root.join("System32").join("drivers").join("etc").join("hosts")
}
