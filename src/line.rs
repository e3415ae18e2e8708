//! Line-by-line classification of raw hosts file text.
//!
//! A [`LineNavigator`] owns the raw lines and one memo table per line. A
//! [`HostsLine`] is a cheap view onto one of those lines; every predicate is
//! computed on first use from the line's own text and its neighbours and then
//! cached for the navigator's lifetime. The navigator is immutable once built,
//! so cached classifications never go stale.

use std::cell::OnceCell;
use std::fmt;

use crate::error::HostsError;
use crate::syntax;

#[derive(Default)]
struct LineMemo {
    is_empty: OnceCell<bool>,
    is_host: OnceCell<bool>,
    is_group_start: OnceCell<bool>,
    is_group_end: OnceCell<bool>,
    is_toggle_mode_option: OnceCell<bool>,
    is_control_element: OnceCell<bool>,
    is_comment: OnceCell<bool>,
    is_description: OnceCell<bool>,
    is_global_comment: OnceCell<bool>,
    is_multi_line_comment: OnceCell<bool>,
    is_active: OnceCell<bool>,
    parent_host_group: OnceCell<Option<usize>>,
    values: OnceCell<Vec<String>>,
    description_text: OnceCell<Option<String>>,
    comment_run: OnceCell<Option<(usize, usize)>>,
    multi_line_comment_text: OnceCell<Option<String>>,
}

struct LineRecord {
    text: String,
    memo: LineMemo,
}

/// Ordered, 1-based store of raw hosts file lines.
pub struct LineNavigator {
    lines: Vec<LineRecord>,
}

impl LineNavigator {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines
            .into_iter()
            .map(|text| LineRecord {
                text: text.into(),
                memo: LineMemo::default(),
            })
            .collect();
        Self { lines }
    }

    /// Split `text` on line endings (`\n` or `\r\n`).
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at the 1-based `line_number`.
    pub fn get(&self, line_number: usize) -> Result<HostsLine<'_>, HostsError> {
        if line_number < 1 || line_number > self.lines.len() {
            return Err(HostsError::LineOutOfRange {
                line_number,
                count: self.lines.len(),
            });
        }
        Ok(HostsLine {
            navigator: self,
            number: line_number,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = HostsLine<'_>> + '_ {
        (1..=self.lines.len()).map(move |number| HostsLine {
            navigator: self,
            number,
        })
    }

    fn at(&self, line_number: usize) -> Option<HostsLine<'_>> {
        self.get(line_number).ok()
    }
}

impl fmt::Debug for LineNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineNavigator")
            .field("count", &self.lines.len())
            .finish()
    }
}

/// A classified view of one line.
#[derive(Clone, Copy)]
pub struct HostsLine<'a> {
    navigator: &'a LineNavigator,
    number: usize,
}

impl<'a> HostsLine<'a> {
    pub fn text(&self) -> &'a str {
        &self.record().text
    }

    pub fn line_number(&self) -> usize {
        self.number
    }

    pub fn previous(&self) -> Option<HostsLine<'a>> {
        self.navigator.at(self.number.checked_sub(1)?)
    }

    pub fn next(&self) -> Option<HostsLine<'a>> {
        self.navigator.at(self.number + 1)
    }

    pub fn is_empty(&self) -> bool {
        *self
            .memo()
            .is_empty
            .get_or_init(|| self.text().trim().is_empty())
    }

    pub fn is_host(&self) -> bool {
        *self
            .memo()
            .is_host
            .get_or_init(|| !self.is_empty() && syntax::host_line().is_match(self.text()))
    }

    pub fn is_group_start(&self) -> bool {
        *self.memo().is_group_start.get_or_init(|| {
            !self.is_empty() && syntax::group_start_line().is_match(self.text())
        })
    }

    pub fn is_group_end(&self) -> bool {
        *self.memo().is_group_end.get_or_init(|| {
            !self.is_empty() && syntax::group_end_line().is_match(self.text())
        })
    }

    pub fn is_toggle_mode_option(&self) -> bool {
        *self.memo().is_toggle_mode_option.get_or_init(|| {
            !self.is_empty() && syntax::toggle_mode_line().is_match(self.text())
        })
    }

    pub fn is_control_element(&self) -> bool {
        *self.memo().is_control_element.get_or_init(|| {
            self.is_host()
                || self.is_group_start()
                || self.is_group_end()
                || self.is_toggle_mode_option()
        })
    }

    pub fn is_comment(&self) -> bool {
        *self.memo().is_comment.get_or_init(|| {
            !self.is_control_element() && syntax::comment_line().is_match(self.text())
        })
    }

    /// A comment directly above a host or group-start line.
    pub fn is_description(&self) -> bool {
        *self.memo().is_description.get_or_init(|| {
            self.is_comment()
                && self
                    .next()
                    .is_some_and(|next| next.is_host() || next.is_group_start())
        })
    }

    /// A comment that does not describe the following line.
    pub fn is_global_comment(&self) -> bool {
        *self.memo().is_global_comment.get_or_init(|| {
            self.is_comment()
                && self
                    .next()
                    .map_or(true, |next| !next.is_host() && !next.is_group_start())
        })
    }

    pub fn is_multi_line_comment(&self) -> bool {
        *self.memo().is_multi_line_comment.get_or_init(|| {
            self.is_global_comment()
                && (self.next().is_some_and(|l| l.is_global_comment())
                    || self.previous().is_some_and(|l| l.is_global_comment()))
        })
    }

    pub fn is_activatable(&self) -> bool {
        self.is_host()
    }

    /// An activatable line that is not commented out.
    pub fn is_active(&self) -> bool {
        *self.memo().is_active.get_or_init(|| {
            self.is_activatable() && !syntax::comment_line().is_match(self.text())
        })
    }

    /// Nearest enclosing group-start line; group markers are their own parent.
    ///
    /// The backward walk stops at the first line whose answer is already
    /// known, and every line it passes is given the same answer.
    pub fn parent_host_group(&self) -> Option<HostsLine<'a>> {
        let number = match self.memo().parent_host_group.get() {
            Some(cached) => *cached,
            None => self.resolve_parent_host_group(),
        };
        number.and_then(|n| self.navigator.at(n))
    }

    fn resolve_parent_host_group(&self) -> Option<usize> {
        if self.is_group_start() || self.is_group_end() {
            return *self.memo().parent_host_group.get_or_init(|| Some(self.number));
        }
        let mut visited = vec![self.number];
        let mut cursor = self.previous();
        let found = loop {
            let Some(line) = cursor else { break None };
            if line.is_group_end() {
                break None;
            }
            if line.is_group_start() {
                break Some(line.number);
            }
            if let Some(cached) = line.memo().parent_host_group.get() {
                break *cached;
            }
            visited.push(line.number);
            cursor = line.previous();
        };
        for n in visited {
            let _ = self.navigator.lines[n - 1].memo.parent_host_group.set(found);
        }
        found
    }

    pub fn is_member_of_host_group(&self) -> bool {
        self.parent_host_group().is_some()
    }

    /// Name of the enclosing group, if any.
    pub fn group_name(&self) -> Option<&'a str> {
        self.parent_host_group()
            .and_then(|group| group.values().first())
            .map(String::as_str)
    }

    /// Captured values for this line's classification: `[ip, names]` for
    /// hosts, `[name]` for group markers, `[mode]` for toggle directives and
    /// `[text]` for comments.
    pub fn values(&self) -> &'a [String] {
        self.memo().values.get_or_init(|| {
            let text = self.text();
            if self.is_global_comment() || self.is_description() {
                syntax::captured_values(syntax::comment_line(), text)
            } else if self.is_group_start() {
                syntax::captured_values(syntax::group_start_line(), text)
            } else if self.is_group_end() {
                syntax::captured_values(syntax::group_end_line(), text)
            } else if self.is_host() {
                syntax::captured_values(syntax::host_line(), text)
            } else if self.is_toggle_mode_option() {
                syntax::captured_values(syntax::toggle_mode_line(), text)
            } else {
                Vec::new()
            }
        })
    }

    /// Text of the description line directly above this one, if there is one.
    pub fn description_text(&self) -> Option<&'a str> {
        self.memo()
            .description_text
            .get_or_init(|| {
                self.previous()
                    .filter(|prev| prev.is_description())
                    .and_then(|prev| prev.values().first().cloned())
            })
            .as_deref()
    }

    /// Joined text of the multi-line comment run containing this line.
    pub fn multi_line_comment_text(&self) -> Option<&'a str> {
        self.memo()
            .multi_line_comment_text
            .get_or_init(|| {
                let (start, end) = self.comment_run()?;
                let text = (start..=end)
                    .filter_map(|n| self.navigator.at(n))
                    .map(|line| line.values().first().map(String::as_str).unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join("\n");
                Some(text)
            })
            .as_deref()
    }

    /// Number of lines in the multi-line comment run containing this line (0 if none).
    pub fn multi_line_comment_size(&self) -> usize {
        self.comment_run()
            .map(|(start, end)| end - start + 1)
            .unwrap_or(0)
    }

    /// Whether this line opens its multi-line comment run.
    pub fn starts_multi_line_comment(&self) -> bool {
        self.comment_run()
            .is_some_and(|(start, _)| start == self.number)
    }

    fn comment_run(&self) -> Option<(usize, usize)> {
        if let Some(run) = self.memo().comment_run.get() {
            return *run;
        }
        if !self.is_multi_line_comment() {
            return *self.memo().comment_run.get_or_init(|| None);
        }
        let mut start = *self;
        while let Some(prev) = start.previous().filter(|l| l.is_multi_line_comment()) {
            start = prev;
        }
        let mut end = *self;
        while let Some(next) = end.next().filter(|l| l.is_multi_line_comment()) {
            end = next;
        }
        let run = Some((start.number, end.number));
        for n in start.number..=end.number {
            let _ = self.navigator.lines[n - 1].memo.comment_run.set(run);
        }
        run
    }

    fn record(&self) -> &'a LineRecord {
        let navigator: &'a LineNavigator = self.navigator;
        &navigator.lines[self.number - 1]
    }

    fn memo(&self) -> &'a LineMemo {
        &self.record().memo
    }
}

impl fmt::Display for HostsLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.text().is_empty() {
            " - empty -"
        } else {
            self.text()
        };
        write!(f, "HostsLine #{}: {}", self.number, text)
    }
}

impl fmt::Debug for HostsLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostsLine")
            .field("line_number", &self.number)
            .field("text", &self.text())
            .finish()
    }
}
