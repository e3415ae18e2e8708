//! Group state is derived from its hosts; setting it pushes down.

mod common;

use hostman::{EntryKind, HostFile, HostsEntry};

fn dev(file: &HostFile) -> hostman::EntryId {
    file.find(EntryKind::HostGroup, "Dev").unwrap()
}

#[test]
fn active_rate_counts_active_hosts() {
    let file = HostFile::parse(common::SAMPLE_HOSTS);
    let dev = dev(&file);
    assert_eq!(file.active_rate(dev), Some(0.5));
    assert_eq!(file.is_active(dev), Some(false));
}

#[test]
fn setting_group_state_propagates_to_hosts() {
    let mut file = HostFile::parse(common::SAMPLE_HOSTS);
    let dev = dev(&file);

    assert!(file.set_active(dev, true));
    assert_eq!(file.is_active(dev), Some(true));
    assert_eq!(file.active_rate(dev), Some(1.0));
    for host in file.children(Some(dev)).unwrap() {
        assert_eq!(file.is_active(*host), Some(true));
    }

    assert!(file.set_active(dev, false));
    assert_eq!(file.active_rate(dev), Some(0.0));
    assert!(file.text().contains("# 10.0.0.1\tdev.local api.dev.local"));
}

#[test]
fn host_change_rolls_up_to_group() {
    let mut file = HostFile::parse(common::SAMPLE_HOSTS);
    let dev = dev(&file);
    let inactive = file.find(EntryKind::Host, "10.0.0.2").unwrap();

    assert!(file.flip_active(inactive));
    assert_eq!(file.is_active(inactive), Some(true));
    assert_eq!(file.is_active(dev), Some(true));
}

#[test]
fn leaf_entries_store_their_own_flag() {
    let mut file = HostFile::new(None);
    let host = file
        .add_child(None, HostsEntry::host("127.0.0.1", false).unwrap())
        .unwrap();
    assert_eq!(file.active_rate(host), Some(0.0));
    file.set_active(host, true);
    assert_eq!(file.active_rate(host), Some(1.0));

    let empty_group = file
        .add_child(None, HostsEntry::host_group("Empty").unwrap())
        .unwrap();
    assert_eq!(file.is_active(empty_group), Some(false));
    file.set_active(empty_group, true);
    assert_eq!(file.is_active(empty_group), Some(true));
}

#[test]
fn comments_and_domains_are_not_activatable() {
    let mut file = HostFile::parse(common::SAMPLE_HOSTS);
    let comment = file.top_level()[0];
    let domain = file.find(EntryKind::Domain, "dev.local").unwrap();
    assert_eq!(file.is_active(comment), None);
    assert_eq!(file.active_rate(domain), None);
    assert!(!file.set_active(comment, true));
    assert!(!file.toggle_active_state(domain));
}

#[test]
fn set_all_groups_active() {
    let mut file = HostFile::parse(common::SAMPLE_HOSTS);
    assert_eq!(file.set_all_groups_active(true), 2);
    for group in file.groups() {
        assert_eq!(file.is_active(group), Some(true));
    }
    let localhost = file.find(EntryKind::Host, "127.0.0.1").unwrap();
    assert_eq!(file.is_active(localhost), Some(true));
}
