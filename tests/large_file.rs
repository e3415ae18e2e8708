//! Large hosts files (ad-block lists, long comment runs) parse in linear time.

use std::time::{Duration, Instant};

use hostman::{EntryKind, HostFile};

const LIMIT: Duration = Duration::from_secs(30);

#[test]
fn fifty_thousand_host_lines() {
    let text: String = (0..50_000)
        .map(|n| format!("0.0.0.0 ad{n}.example.com\n"))
        .collect();

    let started = Instant::now();
    let file = HostFile::parse(&text);
    let elapsed = started.elapsed();

    assert_eq!(file.top_level().len(), 50_000);
    assert!(elapsed < LIMIT, "parse took {elapsed:?}");
}

#[test]
fn long_group_keeps_every_member() {
    let mut text = String::from("# Start-HostsGroup:Ads\n");
    for n in 0..50_000 {
        text.push_str(&format!("0.0.0.0 ad{n}.example.com\n"));
    }
    text.push_str("# End-HostsGroup:Ads\n127.0.0.1\tlocalhost\n");

    let started = Instant::now();
    let file = HostFile::parse(&text);
    let elapsed = started.elapsed();

    let ads = file.find(EntryKind::HostGroup, "Ads").unwrap();
    assert_eq!(file.children(Some(ads)).unwrap().len(), 50_000);
    assert_eq!(file.top_level().len(), 2);
    assert!(elapsed < LIMIT, "parse took {elapsed:?}");
}

#[test]
fn twenty_thousand_line_comment_run() {
    let mut text: String = (0..20_000).map(|n| format!("# note {n}\n")).collect();
    text.push_str("\n127.0.0.1\tlocalhost\n");

    let started = Instant::now();
    let file = HostFile::parse(&text);
    let elapsed = started.elapsed();

    assert_eq!(file.top_level().len(), 2);
    let comment = file.get(file.top_level()[0]).unwrap();
    assert_eq!(comment.kind(), EntryKind::Comment);
    assert_eq!(comment.name().lines().count(), 20_000);
    assert!(elapsed < LIMIT, "parse took {elapsed:?}");
}
