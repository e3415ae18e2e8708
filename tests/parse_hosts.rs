//! Tree builder: hosts, groups, domains, toggle directives.

mod common;

use hostman::{EntryKind, HostFile};

#[test]
fn host_line_becomes_host_with_domains() {
    let file = HostFile::parse("127.0.0.1\tlocalhost test.local");
    assert_eq!(file.top_level().len(), 1);
    let host = file.get(file.top_level()[0]).unwrap();
    assert_eq!(host.kind(), EntryKind::Host);
    assert_eq!(host.name(), "127.0.0.1");
    assert_eq!(file.is_active(host.id()), Some(true));
    assert_eq!(file.domains(host.id()), ["localhost", "test.local"]);

    let file = HostFile::parse("# 127.0.0.1\tlocalhost");
    assert_eq!(file.is_active(file.top_level()[0]), Some(false));
}

#[test]
fn group_boundaries() {
    let file = HostFile::parse(
        "# Start-HostsGroup:Dev\n10.0.0.1 dev.local\n# End-HostsGroup:Dev\n10.0.0.9 after.local",
    );
    assert_eq!(file.top_level().len(), 2);

    let dev = file.find(EntryKind::HostGroup, "Dev").unwrap();
    let members = file.children(Some(dev)).unwrap();
    assert_eq!(members.len(), 1);
    let member = file.get(members[0]).unwrap();
    assert_eq!(member.name(), "10.0.0.1");
    assert_eq!(member.parent(), Some(dev));
    assert_eq!(file.domains(member.id()), ["dev.local"]);

    let after = file.find(EntryKind::Host, "10.0.0.9").unwrap();
    assert!(!file.get(after).unwrap().has_parent());
    assert_eq!(file.top_level()[1], after);
}

#[test]
fn sample_file_structure() {
    let file = HostFile::parse(common::SAMPLE_HOSTS);
    let kinds: Vec<EntryKind> = file
        .top_level()
        .iter()
        .map(|id| file.get(*id).unwrap().kind())
        .collect();
    assert_eq!(
        kinds,
        [
            EntryKind::Comment,
            EntryKind::Host,
            EntryKind::Host,
            EntryKind::HostGroup,
            EntryKind::HostGroup,
        ]
    );

    let comment = file.get(file.top_level()[0]).unwrap();
    assert_eq!(comment.name(), "Hosts file for tests\nmanaged by hostman");

    let dev = file.get(file.top_level()[3]).unwrap();
    assert_eq!(dev.name(), "Dev");
    assert_eq!(dev.description(), Some("Development servers"));
    assert_eq!(dev.children().len(), 2);
    assert_eq!(file.active_rate(dev.id()), Some(0.5));
    assert_eq!(file.is_active(dev.id()), Some(false));

    let staging = file.find(EntryKind::HostGroup, "staging").unwrap();
    assert_eq!(file.is_active(staging), Some(false));
    assert_eq!(file.find_host_by_domain("staging.local"), file.get(staging).unwrap().children().first().copied());
    assert!(!file.exclusive_group_toggle_mode());
    assert!(!file.exclusive_host_toggle_mode());
}

#[test]
fn host_description_is_attached() {
    let file = HostFile::parse("# the api box\n10.0.0.3 api.local\n");
    assert_eq!(file.top_level().len(), 1);
    let host = file.get(file.top_level()[0]).unwrap();
    assert_eq!(host.description(), Some("the api box"));
}

#[test]
fn toggle_directives_set_flags_without_entries() {
    let file = HostFile::parse("# ExclusiveToggleMode:Group\n# ExclusiveToggleMode:host\n\n127.0.0.1 localhost\n");
    assert!(file.exclusive_group_toggle_mode());
    assert!(file.exclusive_host_toggle_mode());
    assert_eq!(file.top_level().len(), 1);

    let file = HostFile::parse("# ExclusiveToggleMode:Sometimes\n");
    assert!(!file.exclusive_group_toggle_mode());
    assert!(!file.exclusive_host_toggle_mode());
    assert!(file.is_empty());
}

#[test]
fn duplicate_adjacent_comment_blocks_collapse() {
    let file = HostFile::parse("# a\n# b\n\n# a\n# b\n\n# c\n# d\n");
    let texts: Vec<&str> = file
        .top_level()
        .iter()
        .map(|id| file.get(*id).unwrap().name())
        .collect();
    assert_eq!(texts, ["a\nb", "c\nd"]);
}

#[test]
fn unrecognized_lines_are_dropped() {
    let file = HostFile::parse("not a hosts line\n127.0.0.1 localhost\n");
    assert_eq!(file.top_level().len(), 1);
    assert_eq!(file.len(), 2);
}

#[test]
fn crlf_line_endings() {
    let file = HostFile::parse("# Start-HostsGroup:Dev\r\n10.0.0.1 dev.local\r\n# End-HostsGroup:Dev\r\n");
    let dev = file.find(EntryKind::HostGroup, "Dev").unwrap();
    assert_eq!(file.children(Some(dev)).unwrap().len(), 1);
}

#[test]
fn from_lines_keeps_path() {
    let file = HostFile::from_lines(Some("/tmp/hosts".into()), ["127.0.0.1 localhost"]);
    assert_eq!(file.path(), Some(std::path::Path::new("/tmp/hosts")));
    assert_eq!(file.len(), 2);
}
