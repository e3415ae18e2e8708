//! Hosts file syntax: control markers and line patterns.
//!
//! All patterns are case-insensitive. Captured values are trimmed by the
//! line classifier, not here.

use regex::Regex;
use std::sync::OnceLock;

pub const COMMENT_CHAR: &str = "#";
pub const GROUP_START_MARKER: &str = "Start-HostsGroup:";
pub const GROUP_END_MARKER: &str = "End-HostsGroup:";
pub const TOGGLE_MODE_MARKER: &str = "ExclusiveToggleMode:";
pub const TOGGLE_MODE_GROUP: &str = "Group";
pub const TOGGLE_MODE_HOST: &str = "Host";

/// Exclusive toggle mode named by a `# ExclusiveToggleMode:<mode>` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleMode {
    Group,
    Host,
}

impl ToggleMode {
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case(TOGGLE_MODE_GROUP) {
            Some(ToggleMode::Group)
        } else if value.eq_ignore_ascii_case(TOGGLE_MODE_HOST) {
            Some(ToggleMode::Host)
        } else {
            None
        }
    }

    pub fn directive(self) -> String {
        let mode = match self {
            ToggleMode::Group => TOGGLE_MODE_GROUP,
            ToggleMode::Host => TOGGLE_MODE_HOST,
        };
        format!("{COMMENT_CHAR} {TOGGLE_MODE_MARKER}{mode}")
    }
}

/// `<ws>#<text>`; captures the text after the comment character.
pub fn comment_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*#(?P<text>.*)$").expect("valid comment regex"))
}

/// Optionally commented-out `<ip> <names>`; captures the address and the name list.
///
/// Addresses are matched by shape only: dotted quads, or colon-separated hex
/// groups with at least two colons (`::1`, `fe80::1`).
pub fn host_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*(?:#\s*)?(?P<ip>[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+|[0-9a-f]*:[0-9a-f]*:[0-9a-f:.]*[0-9a-f])\s+(?P<names>[a-z0-9._\-][a-z0-9._\-\s]*)",
        )
        .expect("valid host regex")
    })
}

pub fn group_start_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*#\s*Start-HostsGroup:(?P<name>[^#]+)").expect("valid group start regex")
    })
}

pub fn group_end_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*#\s*End-HostsGroup:(?P<name>[^#]+)").expect("valid group end regex")
    })
}

pub fn toggle_mode_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*#\s*ExclusiveToggleMode:(?P<mode>.+)").expect("valid toggle mode regex")
    })
}

/// Trimmed capture groups of the first match, in group order.
pub fn captured_values(regex: &Regex, text: &str) -> Vec<String> {
    regex
        .captures(text)
        .map(|caps| {
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().trim().to_string()).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}
