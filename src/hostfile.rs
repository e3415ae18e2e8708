//! The mutable hosts tree.
//!
//! A [`HostFile`] owns every entry in an id-keyed arena. Each collection (the
//! root's and every entry's) is an ordered list of [`EntryId`]s, so document
//! order is the only iteration order. Child entries point back at their parent
//! by id; nothing holds a reference into the arena across calls.
//!
//! Every mutation drops the cached text and reports a [`Change`] to the
//! subscribed [`ChangeObserver`]s.

use serde::Serialize;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::entry::{fnv1a, normalize_description, EntryId, EntryKind, HostsEntry};
use crate::serialize;

/// What a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Name, description or active state of an entry.
    Entry(EntryId),
    /// Membership or order of a collection; `None` is the top-level collection.
    Children(Option<EntryId>),
    /// One of the exclusive toggle modes.
    ToggleMode,
    /// The whole tree was swapped for a freshly loaded one.
    Replaced,
}

/// Receives change notifications from a [`HostFile`].
pub trait ChangeObserver: Send {
    fn on_changed(&self, change: &Change);
}

impl<T: ChangeObserver + Sync + ?Sized> ChangeObserver for Arc<T> {
    fn on_changed(&self, change: &Change) {
        (**self).on_changed(change)
    }
}

/// Root of a parsed hosts file.
pub struct HostFile {
    path: Option<PathBuf>,
    entries: HashMap<EntryId, HostsEntry>,
    children: Vec<EntryId>,
    exclusive_group_toggle_mode: bool,
    exclusive_host_toggle_mode: bool,
    text: OnceCell<String>,
    observers: Vec<Box<dyn ChangeObserver>>,
}

impl HostFile {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            entries: HashMap::new(),
            children: Vec::new(),
            exclusive_group_toggle_mode: false,
            exclusive_host_toggle_mode: false,
            text: OnceCell::new(),
            observers: Vec::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ---- lookup ----

    pub fn get(&self, id: EntryId) -> Option<&HostsEntry> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of entries in the whole tree.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Top-level collection in document order.
    pub fn top_level(&self) -> &[EntryId] {
        &self.children
    }

    /// Collection of `parent` (`None` for the top level).
    pub fn children(&self, parent: Option<EntryId>) -> Option<&[EntryId]> {
        match parent {
            None => Some(&self.children),
            Some(id) => self.entries.get(&id).map(|e| e.children.as_slice()),
        }
    }

    /// Every entry id, depth-first in document order.
    pub fn walk(&self) -> Vec<EntryId> {
        let mut out = Vec::with_capacity(self.entries.len());
        let mut stack: Vec<EntryId> = self.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(entry) = self.entries.get(&id) {
                stack.extend(entry.children.iter().rev().copied());
            }
        }
        out
    }

    /// First entry of `kind` whose name matches case-insensitively.
    pub fn find(&self, kind: EntryKind, name: &str) -> Option<EntryId> {
        self.walk().into_iter().find(|id| {
            self.entries
                .get(id)
                .is_some_and(|e| e.kind == kind && e.name.eq_ignore_ascii_case(name))
        })
    }

    /// First host carrying a domain named `domain`.
    pub fn find_host_by_domain(&self, domain: &str) -> Option<EntryId> {
        let domain_id = self.find(EntryKind::Domain, domain)?;
        self.entries.get(&domain_id)?.parent
    }

    /// Top-level groups in document order.
    pub fn groups(&self) -> Vec<EntryId> {
        self.of_kind(&self.children, EntryKind::HostGroup)
    }

    /// Domain names of a host, in order.
    pub fn domains(&self, host: EntryId) -> Vec<&str> {
        self.entries
            .get(&host)
            .map(|h| {
                h.children
                    .iter()
                    .filter_map(|id| self.entries.get(id))
                    .filter(|e| e.kind == EntryKind::Domain)
                    .map(|e| e.name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    // ---- toggle modes ----

    pub fn exclusive_group_toggle_mode(&self) -> bool {
        self.exclusive_group_toggle_mode
    }

    pub fn exclusive_host_toggle_mode(&self) -> bool {
        self.exclusive_host_toggle_mode
    }

    pub fn set_exclusive_group_toggle_mode(&mut self, enabled: bool) {
        self.exclusive_group_toggle_mode = enabled;
        self.notify(Change::ToggleMode);
    }

    pub fn set_exclusive_host_toggle_mode(&mut self, enabled: bool) {
        self.exclusive_host_toggle_mode = enabled;
        self.notify(Change::ToggleMode);
    }

    // ---- activation ----

    /// Effective active state; `None` for unknown or non-activatable entries.
    ///
    /// An entry with activatable children is active iff all of them are.
    pub fn is_active(&self, id: EntryId) -> Option<bool> {
        let entry = self.entries.get(&id)?;
        entry.is_activatable().then(|| self.effective_active(entry))
    }

    /// Fraction of active activatable children, or 1.0/0.0 for a leaf.
    pub fn active_rate(&self, id: EntryId) -> Option<f64> {
        let entry = self.entries.get(&id)?;
        if !entry.is_activatable() {
            return None;
        }
        let kids = self.activatable_children(entry);
        if kids.is_empty() {
            return Some(if entry.active { 1.0 } else { 0.0 });
        }
        let active = kids.iter().filter(|k| self.effective_active(k)).count();
        Some(active as f64 / kids.len() as f64)
    }

    /// Set the state of one entry. Entries with activatable children push the
    /// state down to every child that differs.
    pub fn set_active(&mut self, id: EntryId, active: bool) -> bool {
        let Some(entry) = self.entries.get(&id) else {
            return false;
        };
        if !entry.is_activatable() {
            return false;
        }
        let kids = self.activatable_children(entry);
        if !kids.is_empty() {
            let differing: Vec<EntryId> = kids
                .into_iter()
                .filter(|k| self.effective_active(k) != active)
                .map(|k| k.id)
                .collect();
            for kid in differing {
                self.set_active(kid, active);
            }
            return true;
        }
        if entry.active == active {
            return true;
        }
        let parent = entry.parent;
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.active = active;
        }
        self.notify(Change::Entry(id));
        if let Some(parent) = parent {
            self.notify(Change::Entry(parent));
        }
        true
    }

    /// Invert one entry's state, ignoring the exclusive toggle modes.
    pub fn flip_active(&mut self, id: EntryId) -> bool {
        match self.is_active(id) {
            Some(active) => self.set_active(id, !active),
            None => false,
        }
    }

    /// Invert an entry's state under the exclusive toggle modes.
    pub fn toggle_active_state(&mut self, id: EntryId) -> bool {
        match self.is_active(id) {
            Some(active) => self.apply_active_state(id, !active),
            None => false,
        }
    }

    /// Activate an entry under the exclusive toggle modes.
    pub fn activate(&mut self, id: EntryId) -> bool {
        self.apply_active_state(id, true)
    }

    /// Deactivate an entry under the exclusive toggle modes.
    pub fn deactivate(&mut self, id: EntryId) -> bool {
        self.apply_active_state(id, false)
    }

    /// Set every top-level group to `active`; returns how many groups there are.
    pub fn set_all_groups_active(&mut self, active: bool) -> usize {
        let groups = self.groups();
        for group in &groups {
            self.set_active(*group, active);
        }
        groups.len()
    }

    fn apply_active_state(&mut self, id: EntryId, new_state: bool) -> bool {
        let Some(entry) = self.entries.get(&id) else {
            return false;
        };
        if !entry.is_activatable() {
            return false;
        }
        let kind = entry.kind;
        let exclusive = match kind {
            EntryKind::HostGroup => self.exclusive_group_toggle_mode,
            _ => self.exclusive_host_toggle_mode,
        };

        if !exclusive {
            return self.set_active(id, new_state);
        }

        let siblings = self.siblings_of_kind(id, kind);
        for sibling in siblings {
            // radio-button semantics when activating; everything off when deactivating
            self.set_active(sibling, new_state && sibling == id);
        }
        true
    }

    fn effective_active(&self, entry: &HostsEntry) -> bool {
        let kids = self.activatable_children(entry);
        if kids.is_empty() {
            entry.active
        } else {
            kids.iter().all(|k| self.effective_active(k))
        }
    }

    fn activatable_children(&self, entry: &HostsEntry) -> Vec<&HostsEntry> {
        entry
            .children
            .iter()
            .filter_map(|id| self.entries.get(id))
            .filter(|e| e.is_activatable())
            .collect()
    }

    fn siblings_of_kind(&self, id: EntryId, kind: EntryKind) -> Vec<EntryId> {
        let parent = self.entries.get(&id).and_then(|e| e.parent);
        match self.children(parent) {
            Some(collection) => self.of_kind(collection, kind),
            None => Vec::new(),
        }
    }

    fn of_kind(&self, collection: &[EntryId], kind: EntryKind) -> Vec<EntryId> {
        collection
            .iter()
            .copied()
            .filter(|id| self.entries.get(id).is_some_and(|e| e.kind == kind))
            .collect()
    }

    // ---- structural mutation ----

    /// Append `entry` to `parent`'s collection (`None` for the top level).
    ///
    /// Returns `None` when the parent is unknown, cannot hold this kind, or the
    /// entry is already part of the tree.
    pub fn add_child(&mut self, parent: Option<EntryId>, entry: HostsEntry) -> Option<EntryId> {
        self.insert_child(parent, None, entry)
    }

    /// Insert `entry` at position 0 of `parent`'s collection.
    pub fn add_child_to_top(
        &mut self,
        parent: Option<EntryId>,
        entry: HostsEntry,
    ) -> Option<EntryId> {
        self.insert_child(parent, Some(0), entry)
    }

    fn insert_child(
        &mut self,
        parent: Option<EntryId>,
        index: Option<usize>,
        mut entry: HostsEntry,
    ) -> Option<EntryId> {
        let accepted = match parent {
            None => entry.kind.is_top_level(),
            Some(p) => self.entries.get(&p)?.kind.accepts(entry.kind),
        };
        let readable = entry.kind != EntryKind::Comment || serialize::is_plain_comment(&entry.name);
        if !accepted || !readable || self.entries.contains_key(&entry.id) {
            tracing::debug!(kind = %entry.kind, "rejected child entry");
            return None;
        }
        let id = entry.id;
        entry.parent = parent;
        entry.children.clear();
        let collection = self.collection_mut(parent)?;
        match index {
            Some(i) => collection.insert(i.min(collection.len()), id),
            None => collection.push(id),
        }
        self.entries.insert(id, entry);
        self.notify(Change::Children(parent));
        Some(id)
    }

    /// Detach an entry (and its subtree) from its parent.
    pub fn delete(&mut self, id: EntryId) -> bool {
        match self.entries.get(&id) {
            Some(entry) => {
                let parent = entry.parent;
                self.delete_child(parent, id)
            }
            None => false,
        }
    }

    /// Remove `child` from `parent`'s collection; `false` if it is not there.
    ///
    /// A host line needs at least one domain, so removing the last domain of a
    /// host removes the host with it.
    pub fn delete_child(&mut self, parent: Option<EntryId>, child: EntryId) -> bool {
        if let Some(host) = parent.filter(|p| self.is_last_domain(*p, child)) {
            return self.delete(host);
        }
        let Some(collection) = self.collection_mut(parent) else {
            return false;
        };
        let Some(position) = collection.iter().position(|id| *id == child) else {
            return false;
        };
        collection.remove(position);
        self.drop_subtree(child);
        self.notify(Change::Children(parent));
        true
    }

    fn is_last_domain(&self, host: EntryId, child: EntryId) -> bool {
        self.entries
            .get(&host)
            .is_some_and(|h| h.kind == EntryKind::Host && h.children == [child])
    }

    /// Remove every top-level entry.
    pub fn clear(&mut self) -> bool {
        if self.children.is_empty() {
            return false;
        }
        self.children.clear();
        self.entries.clear();
        self.notify(Change::Children(None));
        true
    }

    /// Move an entry one position up in its collection, wrapping to the end.
    pub fn move_up(&mut self, id: EntryId) -> Option<usize> {
        let parent = self.entries.get(&id)?.parent;
        self.move_child_up(parent, id)
    }

    /// Move an entry one position down in its collection, wrapping to the start.
    pub fn move_down(&mut self, id: EntryId) -> Option<usize> {
        let parent = self.entries.get(&id)?.parent;
        self.move_child_down(parent, id)
    }

    pub fn move_child_up(&mut self, parent: Option<EntryId>, child: EntryId) -> Option<usize> {
        self.move_within(parent, child, -1)
    }

    pub fn move_child_down(&mut self, parent: Option<EntryId>, child: EntryId) -> Option<usize> {
        self.move_within(parent, child, 1)
    }

    fn move_within(&mut self, parent: Option<EntryId>, child: EntryId, step: isize) -> Option<usize> {
        let collection = self.collection_mut(parent)?;
        let current = collection.iter().position(|id| *id == child)?;
        let next = next_ring_position(current, collection.len(), step);
        let id = collection.remove(current);
        collection.insert(next, id);
        self.notify(Change::Children(parent));
        Some(next)
    }

    /// Rename an entry; rejects blank names for everything but comments.
    pub fn set_name(&mut self, id: EntryId, name: impl Into<String>) -> bool {
        let name = name.into();
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        let valid = match entry.kind {
            EntryKind::Comment => serialize::is_plain_comment(&name),
            _ => !name.trim().is_empty(),
        };
        if !valid {
            return false;
        }
        entry.name = name;
        self.notify(Change::Entry(id));
        true
    }

    pub fn set_description(&mut self, id: EntryId, description: Option<&str>) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        entry.description = normalize_description(description.map(str::to_string));
        self.notify(Change::Entry(id));
        true
    }

    fn collection_mut(&mut self, parent: Option<EntryId>) -> Option<&mut Vec<EntryId>> {
        match parent {
            None => Some(&mut self.children),
            Some(id) => self.entries.get_mut(&id).map(|e| &mut e.children),
        }
    }

    fn drop_subtree(&mut self, id: EntryId) {
        if let Some(entry) = self.entries.remove(&id) {
            for child in entry.children {
                self.drop_subtree(child);
            }
        }
    }

    // ---- notification ----

    pub fn subscribe(&mut self, observer: Box<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    /// Take over the observers of the tree this one replaces.
    pub fn adopt_observers(&mut self, previous: &mut HostFile) {
        self.observers.append(&mut previous.observers);
        self.notify(Change::Replaced);
    }

    fn notify(&mut self, change: Change) {
        self.text.take();
        for observer in &self.observers {
            observer.on_changed(&change);
        }
    }

    // ---- text ----

    /// Regenerated hosts file text, cached until the next mutation.
    pub fn text(&self) -> &str {
        self.text.get_or_init(|| serialize::file_text(self))
    }

    /// Text of a single entry.
    pub fn entry_text(&self, id: EntryId) -> Option<String> {
        self.entries
            .get(&id)
            .map(|entry| serialize::entry_text(self, entry))
    }

    // ---- identity ----

    /// `<Kind>-<hash>` over an entry and its whole subtree.
    pub fn signature(&self, id: EntryId) -> Option<String> {
        let entry = self.entries.get(&id)?;
        Some(format!("{}-{:016x}", entry.kind, self.subtree_hash(entry)))
    }

    fn subtree_hash(&self, entry: &HostsEntry) -> u64 {
        let mut hash = entry.own_hash();
        for child in entry.children.iter().filter_map(|id| self.entries.get(id)) {
            fnv1a(&mut hash, &self.subtree_hash(child).to_le_bytes());
        }
        hash
    }

    /// Structural copy for comparison and reporting.
    pub fn snapshot(&self) -> HostFileSnapshot {
        HostFileSnapshot {
            exclusive_group_toggle_mode: self.exclusive_group_toggle_mode,
            exclusive_host_toggle_mode: self.exclusive_host_toggle_mode,
            entries: self.snapshot_collection(&self.children),
        }
    }

    fn snapshot_collection(&self, collection: &[EntryId]) -> Vec<EntrySnapshot> {
        collection
            .iter()
            .filter_map(|id| self.entries.get(id))
            .map(|entry| EntrySnapshot {
                kind: entry.kind,
                name: entry.name.clone(),
                description: entry.description.clone(),
                active: entry
                    .is_activatable()
                    .then(|| self.effective_active(entry)),
                children: self.snapshot_collection(&entry.children),
            })
            .collect()
    }
}

impl Default for HostFile {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Debug for HostFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostFile")
            .field("path", &self.path)
            .field("entries", &self.entries.len())
            .field("exclusive_group_toggle_mode", &self.exclusive_group_toggle_mode)
            .field("exclusive_host_toggle_mode", &self.exclusive_host_toggle_mode)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Semantic view of a tree: what a round trip through text must preserve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostFileSnapshot {
    pub exclusive_group_toggle_mode: bool,
    pub exclusive_host_toggle_mode: bool,
    pub entries: Vec<EntrySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrySnapshot {
    pub kind: EntryKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EntrySnapshot>,
}

fn next_ring_position(current: usize, size: usize, step: isize) -> usize {
    (current as isize + step).rem_euclid(size as isize) as usize
}
