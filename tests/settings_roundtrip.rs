//! Settings save/load roundtrip and hosts path resolution.

mod common;

use hostman::config::{resolve_hosts_path, HostmanPaths, Settings};
use hostman::store;
use std::path::{Path, PathBuf};

#[test]
fn settings_roundtrip() {
    let dir = common::temp_hostman_home();
    let paths = HostmanPaths::for_test(dir.path());

    assert_eq!(store::load_settings(&paths).unwrap(), Settings::default());

    let settings = Settings {
        hosts_file: Some(PathBuf::from("/srv/hosts")),
        last_profile: Some("work".to_string()),
    };
    store::save_settings(&paths, &settings).unwrap();
    assert!(paths.settings_file.is_file());

    let loaded = Settings::load(&paths).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn remember_profile_updates_only_last_profile() {
    let dir = common::temp_hostman_home();
    let paths = HostmanPaths::for_test(dir.path());
    let settings = Settings {
        hosts_file: Some(PathBuf::from("/srv/hosts")),
        last_profile: None,
    };
    settings.save(&paths).unwrap();

    store::remember_profile(&paths, Some("dev")).unwrap();
    let loaded = store::load_settings(&paths).unwrap();
    assert_eq!(loaded.last_profile.as_deref(), Some("dev"));
    assert_eq!(loaded.hosts_file, settings.hosts_file);

    store::remember_profile(&paths, None).unwrap();
    let text = std::fs::read_to_string(&paths.settings_file).unwrap();
    assert!(!text.contains("last_profile"));
}

#[test]
fn test_paths_layout() {
    let dir = common::temp_hostman_home();
    let paths = HostmanPaths::for_test(dir.path());
    assert_eq!(paths.config_dir, dir.path());
    assert_eq!(paths.settings_file, dir.path().join("settings.toml"));
    assert_eq!(paths.profiles_dir, dir.path().join("profiles"));
}

#[test]
fn flag_wins_over_settings() {
    let settings = Settings {
        hosts_file: Some(PathBuf::from("/from/settings")),
        last_profile: None,
    };
    let resolved = resolve_hosts_path(Some(Path::new("/from/flag")), &settings);
    assert_eq!(resolved, PathBuf::from("/from/flag"));
}
