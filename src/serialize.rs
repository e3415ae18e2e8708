//! Hosts tree to text.
//!
//! The output is the canonical form of the annotated format: every comment
//! block is followed by a blank line, and every group is closed by its end
//! marker and a blank line. Parsing that output yields the same tree.

use crate::entry::{EntryKind, HostsEntry};
use crate::hostfile::HostFile;
use crate::syntax::{self, ToggleMode, COMMENT_CHAR, GROUP_END_MARKER, GROUP_START_MARKER};

/// Text of the whole file: toggle-mode directives, then each top-level entry.
pub fn file_text(file: &HostFile) -> String {
    let mut text = String::new();

    if file.exclusive_group_toggle_mode() || file.exclusive_host_toggle_mode() {
        if file.exclusive_group_toggle_mode() {
            text.push_str(&ToggleMode::Group.directive());
            text.push('\n');
        }
        if file.exclusive_host_toggle_mode() {
            text.push_str(&ToggleMode::Host.directive());
            text.push('\n');
        }
        text.push('\n');
    }

    for entry in file.top_level().iter().filter_map(|id| file.get(*id)) {
        text.push_str(&entry_text(file, entry));
        text.push('\n');
    }
    text
}

/// Text of a single entry. Domains render as their bare name.
pub fn entry_text(file: &HostFile, entry: &HostsEntry) -> String {
    match entry.kind() {
        EntryKind::Comment => comment_text(entry),
        EntryKind::HostGroup => group_text(file, entry),
        EntryKind::Host => host_text(file, entry),
        EntryKind::Domain => entry.name().to_string(),
    }
}

fn comment_text(entry: &HostsEntry) -> String {
    let mut text = comment_lines(entry.name()).join("\n");
    text.push('\n');
    text
}

fn comment_lines(text: &str) -> Vec<String> {
    text.replace('\r', " ")
        .split('\n')
        .map(|line| comment_line(line.trim()))
        .collect()
}

/// Whether comment `text` is read back as a comment once written out.
///
/// Text such as `10.0.0.1 x` or `Start-HostsGroup:G` turns into a host or a
/// group marker behind the comment character.
pub fn is_plain_comment(text: &str) -> bool {
    comment_lines(text).iter().all(|line| {
        !syntax::host_line().is_match(line)
            && !syntax::group_start_line().is_match(line)
            && !syntax::group_end_line().is_match(line)
            && !syntax::toggle_mode_line().is_match(line)
    })
}

fn group_text(file: &HostFile, entry: &HostsEntry) -> String {
    let mut text = String::new();
    if let Some(description) = entry.description() {
        text.push_str(&comment_line(description));
        text.push('\n');
    }
    text.push_str(&comment_line(&format!("{GROUP_START_MARKER}{}", entry.name())));
    text.push('\n');
    for host in entry
        .children()
        .iter()
        .filter_map(|id| file.get(*id))
        .filter(|e| e.kind() == EntryKind::Host)
    {
        text.push_str(&host_text(file, host));
        text.push('\n');
    }
    text.push_str(&comment_line(&format!("{GROUP_END_MARKER}{}", entry.name())));
    text.push('\n');
    text
}

fn host_text(file: &HostFile, entry: &HostsEntry) -> String {
    let mut text = String::new();
    if let Some(description) = entry.description() {
        text.push_str(&comment_line(description));
        text.push('\n');
    }
    if !file.is_active(entry.id()).unwrap_or(false) {
        text.push_str(COMMENT_CHAR);
        text.push(' ');
    }
    text.push_str(entry.name());
    text.push('\t');
    text.push_str(&file.domains(entry.id()).join(" "));
    text
}

fn comment_line(text: &str) -> String {
    if text.is_empty() {
        COMMENT_CHAR.to_string()
    } else {
        format!("{COMMENT_CHAR} {text}")
    }
}
