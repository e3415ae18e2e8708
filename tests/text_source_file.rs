//! FileTextSource reads lines and writes text; missing files are errors.

mod common;

use hostman::platform::{FileTextSource, TextSource};

#[test]
fn write_then_read_lines() {
    let dir = common::temp_hostman_home();
    let path = dir.path().join("nested").join("hosts");

    FileTextSource
        .write_all_text(&path, "127.0.0.1\tlocalhost\r\n# note\n")
        .unwrap();
    let lines = FileTextSource.read_lines(&path).unwrap();
    assert_eq!(lines, ["127.0.0.1\tlocalhost", "# note"]);

    FileTextSource.write_all_text(&path, "::1 localhost\n").unwrap();
    assert_eq!(FileTextSource.read_lines(&path).unwrap(), ["::1 localhost"]);
}

#[test]
fn missing_file_is_an_error() {
    let dir = common::temp_hostman_home();
    let err = FileTextSource
        .read_lines(&dir.path().join("absent"))
        .unwrap_err();
    assert!(err.to_string().contains("absent"));
}

#[test]
fn shorter_write_leaves_no_trailing_bytes() {
    let dir = common::temp_hostman_home();
    let path = dir.path().join("hosts");

    FileTextSource
        .write_all_text(&path, "10.0.0.1\tlong-name.example.com\n10.0.0.2\tother.local\n")
        .unwrap();
    FileTextSource.write_all_text(&path, "::1\tlocalhost\n").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "::1\tlocalhost\n");
}

#[test]
fn writer_waits_for_shared_lock_before_truncating() {
    use fs2::FileExt;
    use std::time::Duration;

    let dir = common::temp_hostman_home();
    let path = dir.path().join("hosts");
    std::fs::write(&path, "127.0.0.1\tlocalhost\n").unwrap();

    let reader = std::fs::File::open(&path).unwrap();
    reader.lock_shared().unwrap();

    let target = path.clone();
    let writer = std::thread::spawn(move || {
        FileTextSource.write_all_text(&target, "10.9.9.9\tnew.local\n")
    });
    std::thread::sleep(Duration::from_millis(200));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "127.0.0.1\tlocalhost\n"
    );

    reader.unlock().unwrap();
    writer.join().unwrap().unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "10.9.9.9\tnew.local\n");
}
