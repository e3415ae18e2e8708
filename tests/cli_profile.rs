//! hostman profile save/list/load/delete, config and restore-default.

mod common;

use predicates::prelude::*;
use std::fs;

#[test]
fn profile_lifecycle() {
    let dir = common::temp_hostman_home();
    let hosts = common::write_hosts(dir.path(), common::SAMPLE_HOSTS);

    common::hostman(dir.path(), &hosts)
        .args(["profile", "save", "full"])
        .assert()
        .success();
    assert!(dir.path().join("home/profiles/full.hostsprofile").is_file());

    fs::write(&hosts, "127.0.0.1\tlocalhost\n").unwrap();
    common::hostman(dir.path(), &hosts)
        .args(["profile", "load", "full"])
        .assert()
        .success();
    assert!(fs::read_to_string(&hosts).unwrap().contains("# Start-HostsGroup:Dev"));

    common::hostman(dir.path(), &hosts)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("full"))
        .stdout(predicate::str::contains("(last used)"));

    common::hostman(dir.path(), &hosts)
        .args(["profile", "show", "full"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Staging (0%)"));

    common::hostman(dir.path(), &hosts)
        .args(["profile", "delete", "full"])
        .assert()
        .success();
    common::hostman(dir.path(), &hosts)
        .args(["profile", "delete", "full"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn profile_load_missing_fails() {
    let dir = common::temp_hostman_home();
    let hosts = common::write_hosts(dir.path(), common::SAMPLE_HOSTS);
    common::hostman(dir.path(), &hosts)
        .args(["profile", "load", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("profile 'ghost' does not exist"));
    assert_eq!(fs::read_to_string(&hosts).unwrap(), common::SAMPLE_HOSTS);
}

#[test]
fn restore_default_overwrites() {
    let dir = common::temp_hostman_home();
    let hosts = common::write_hosts(dir.path(), common::SAMPLE_HOSTS);
    common::hostman(dir.path(), &hosts)
        .arg("restore-default")
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(&hosts).unwrap(),
        hostman::hosts::DEFAULT_HOSTS_TEXT
    );
}

#[test]
fn config_show_reports_resolved_hosts_file() {
    let dir = common::temp_hostman_home();
    let hosts = common::write_hosts(dir.path(), common::SAMPLE_HOSTS);
    common::hostman(dir.path(), &hosts)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(hosts.display().to_string()));
}

#[test]
fn hosts_file_flag_overrides_env() {
    let dir = common::temp_hostman_home();
    let hosts = common::write_hosts(dir.path(), common::SAMPLE_HOSTS);
    let other = dir.path().join("other-hosts");
    fs::write(&other, "10.9.9.9\tother.local\n").unwrap();
    common::hostman(dir.path(), &hosts)
        .arg("--hosts-file")
        .arg(&other)
        .arg("text")
        .assert()
        .success()
        .stdout(predicate::str::contains("other.local"))
        .stdout(predicate::str::contains("Dev").not());
}
