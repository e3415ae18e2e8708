//! Privileged writes are staged in fresh, exclusively created temp files.
#![cfg(unix)]

use hostman::platform::unix::staging_file;

#[test]
fn staging_files_are_unique_and_hold_content() {
    let a = staging_file("127.0.0.1\tlocalhost\n").unwrap();
    let b = staging_file("::1\tlocalhost\n").unwrap();

    assert_ne!(a.path(), b.path());
    assert_eq!(std::fs::read_to_string(a.path()).unwrap(), "127.0.0.1\tlocalhost\n");
    assert_eq!(std::fs::read_to_string(b.path()).unwrap(), "::1\tlocalhost\n");

    let path = a.path().to_path_buf();
    drop(a);
    assert!(!path.exists());
}

#[test]
fn symlink_at_pid_path_is_not_followed() {
    let dir = tempfile::tempdir().unwrap();
    let victim = dir.path().join("victim");
    std::fs::write(&victim, "untouched\n").unwrap();

    let pid_path = std::env::temp_dir().join(format!("hostman-{}", std::process::id()));
    let _ = std::fs::remove_file(&pid_path);
    std::os::unix::fs::symlink(&victim, &pid_path).unwrap();

    let staged = staging_file("10.0.0.1\tdev.local\n").unwrap();
    assert_ne!(staged.path(), pid_path.as_path());
    assert_eq!(std::fs::read_to_string(&victim).unwrap(), "untouched\n");

    std::fs::remove_file(&pid_path).unwrap();
}
