//! Comment runs directly above a host: the last line describes the host.

use hostman::{EntryKind, HostFile};

#[test]
fn two_line_run_above_host_splits_into_comment_and_description() {
    let file = HostFile::parse("# line1\n# line2\n127.0.0.1 x");
    assert_eq!(file.top_level().len(), 2);

    let comment = file.get(file.top_level()[0]).unwrap();
    assert_eq!(comment.kind(), EntryKind::Comment);
    assert_eq!(comment.name(), "line1");

    let host = file.get(file.top_level()[1]).unwrap();
    assert_eq!(host.kind(), EntryKind::Host);
    assert_eq!(host.description(), Some("line2"));
    assert_eq!(file.domains(host.id()), ["x"]);
}

#[test]
fn longer_run_keeps_all_but_last_line_as_one_comment() {
    let file = HostFile::parse("# a\n# b\n# c\n127.0.0.1 x\n");
    assert_eq!(file.top_level().len(), 2);
    assert_eq!(file.get(file.top_level()[0]).unwrap().name(), "a\nb");
    assert_eq!(file.get(file.top_level()[1]).unwrap().description(), Some("c"));
}

#[test]
fn blank_line_separates_run_from_host() {
    let file = HostFile::parse("# line1\n# line2\n\n127.0.0.1 x");
    let comment = file.get(file.top_level()[0]).unwrap();
    assert_eq!(comment.name(), "line1\nline2");
    let host = file.get(file.top_level()[1]).unwrap();
    assert_eq!(host.description(), None);
}
