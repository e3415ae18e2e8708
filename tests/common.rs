//! Shared test helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Hosts file with a comment block, ungrouped hosts and two groups.
pub const SAMPLE_HOSTS: &str = "\
# Hosts file for tests
# managed by hostman

127.0.0.1\tlocalhost
::1\tlocalhost

# Development servers
# Start-HostsGroup:Dev
10.0.0.1\tdev.local api.dev.local
# 10.0.0.2\tdb.dev.local
# End-HostsGroup:Dev

# Start-HostsGroup:Staging
# 10.1.0.1\tstaging.local
# End-HostsGroup:Staging
";

/// Create a temp directory for use as HOSTMAN_HOME.
/// Uses current dir (workspace) so sandbox allows full access.
pub fn temp_hostman_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("hostman_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| Path::new(".").into()))
        .expect("temp dir")
}

/// Write `content` to `<dir>/hosts` and return its path.
pub fn write_hosts(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("hosts");
    std::fs::write(&path, content).expect("write hosts");
    path
}

/// `hostman` binary with HOSTMAN_HOME and HOSTMAN_HOSTS_FILE pointing into `dir`.
pub fn hostman(dir: &Path, hosts: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("hostman").expect("hostman binary");
    cmd.env("HOSTMAN_HOME", dir.join("home"))
        .env("HOSTMAN_HOSTS_FILE", hosts)
        .env_remove("RUST_LOG");
    cmd
}
