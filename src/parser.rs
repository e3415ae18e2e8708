//! Builds a [`HostFile`] from classified lines.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::entry::{EntryId, HostsEntry};
use crate::hostfile::HostFile;
use crate::line::{HostsLine, LineNavigator};
use crate::syntax::ToggleMode;

impl HostFile {
    /// Parse hosts file text that has no backing path.
    pub fn parse(text: &str) -> HostFile {
        build(&LineNavigator::from_text(text), None)
    }

    /// Parse already-split lines read from `path`.
    pub fn from_lines<I, S>(path: Option<PathBuf>, lines: I) -> HostFile
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        build(&LineNavigator::new(lines), path)
    }
}

/// Single forward pass over the navigator's lines.
///
/// Group-end markers, description lines and blank lines produce no entries of
/// their own. Lines that match nothing are dropped.
pub fn build(navigator: &LineNavigator, path: Option<PathBuf>) -> HostFile {
    let mut file = HostFile::new(path);
    let mut groups_by_line: HashMap<usize, EntryId> = HashMap::new();
    let mut skipped = 0usize;

    for line in navigator.iter() {
        if line.is_multi_line_comment() {
            if line.starts_multi_line_comment() {
                let text = line.multi_line_comment_text().unwrap_or_default();
                push_comment(&mut file, HostsEntry::comment(text));
            }
        } else if line.is_toggle_mode_option() {
            apply_toggle_mode(&mut file, &line);
        } else if line.is_global_comment() {
            let text = line.values().first().map(String::as_str).unwrap_or_default();
            file.add_child(None, HostsEntry::comment(text));
        } else if line.is_group_start() {
            if let Some(id) = add_group(&mut file, &line) {
                groups_by_line.insert(line.line_number(), id);
            }
        } else if line.is_host() {
            let parent = line
                .parent_host_group()
                .and_then(|group| groups_by_line.get(&group.line_number()).copied());
            add_host(&mut file, &line, parent);
        } else if !line.is_empty() && !line.is_group_end() && !line.is_description() {
            skipped += 1;
            tracing::debug!(line = line.line_number(), text = line.text(), "skipping unrecognized line");
        }
    }

    tracing::debug!(
        lines = navigator.len(),
        entries = file.len(),
        skipped,
        "parsed hosts file"
    );
    file
}

/// Append a top-level comment unless it repeats the previous top-level entry.
fn push_comment(file: &mut HostFile, comment: HostsEntry) {
    let signature = comment.signature();
    let duplicate = file
        .top_level()
        .last()
        .and_then(|id| file.signature(*id))
        .is_some_and(|last| last == signature);
    if duplicate {
        tracing::debug!(%signature, "skipping duplicate comment block");
        return;
    }
    file.add_child(None, comment);
}

fn apply_toggle_mode(file: &mut HostFile, line: &HostsLine<'_>) {
    let value = line.values().first().map(String::as_str).unwrap_or_default();
    match ToggleMode::parse(value) {
        Some(ToggleMode::Group) => file.set_exclusive_group_toggle_mode(true),
        Some(ToggleMode::Host) => file.set_exclusive_host_toggle_mode(true),
        None => tracing::warn!(line = line.line_number(), value, "unknown toggle mode"),
    }
}

fn add_group(file: &mut HostFile, line: &HostsLine<'_>) -> Option<EntryId> {
    let name = line.group_name().unwrap_or_default();
    match HostsEntry::host_group(name) {
        Ok(group) => file.add_child(None, group.with_description(line.description_text())),
        Err(e) => {
            tracing::warn!(line = line.line_number(), "{e}");
            None
        }
    }
}

fn add_host(file: &mut HostFile, line: &HostsLine<'_>, parent: Option<EntryId>) {
    let values = line.values();
    let ip = values.first().map(String::as_str).unwrap_or_default();
    let host = match HostsEntry::host(ip, line.is_active()) {
        Ok(host) => host.with_description(line.description_text()),
        Err(e) => {
            tracing::warn!(line = line.line_number(), "{e}");
            return;
        }
    };
    let Some(host_id) = file.add_child(parent, host) else {
        return;
    };
    let names = values.get(1).map(String::as_str).unwrap_or_default();
    for name in names.split_whitespace() {
        if let Ok(domain) = HostsEntry::domain(name) {
            file.add_child(Some(host_id), domain);
        }
    }
}
