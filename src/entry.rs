//! Hosts file entries: comments, groups, hosts and domains.
//!
//! Entries are plain records. Structure (parent/children) is owned by the
//! [`HostFile`](crate::hostfile::HostFile) arena, which hands out
//! [`EntryId`]s; the `parent` field is a back-reference by id only.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::HostsError;

pub const DEFAULT_COMMENT: &str = "New comment";
pub const DEFAULT_GROUP_NAME: &str = "New group";
pub const DEFAULT_HOST_IP: &str = "127.0.0.1";
pub const DEFAULT_DOMAIN: &str = "example.local";

/// Process-unique, lifetime-stable entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Comment,
    HostGroup,
    Host,
    Domain,
}

impl EntryKind {
    /// Hosts and groups carry an active state.
    pub fn is_activatable(self) -> bool {
        matches!(self, EntryKind::HostGroup | EntryKind::Host)
    }

    /// Whether an entry of this kind may hold a `child` entry.
    pub fn accepts(self, child: EntryKind) -> bool {
        matches!(
            (self, child),
            (EntryKind::HostGroup, EntryKind::Host) | (EntryKind::Host, EntryKind::Domain)
        )
    }

    /// Whether this kind may sit directly in the file's top-level collection.
    pub fn is_top_level(self) -> bool {
        matches!(self, EntryKind::Comment | EntryKind::HostGroup | EntryKind::Host)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Comment => "Comment",
            EntryKind::HostGroup => "HostGroup",
            EntryKind::Host => "Host",
            EntryKind::Domain => "Domain",
        };
        f.write_str(name)
    }
}

/// One node of the hosts tree.
///
/// `name` holds the comment text for comments, the group name for groups, the
/// address for hosts and the host name for domains.
#[derive(Debug, Clone)]
pub struct HostsEntry {
    pub(crate) id: EntryId,
    pub(crate) kind: EntryKind,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) active: bool,
    pub(crate) parent: Option<EntryId>,
    pub(crate) children: Vec<EntryId>,
}

impl HostsEntry {
    /// New detached entry. Every kind except `Comment` needs a non-empty name.
    pub fn new(kind: EntryKind, name: impl Into<String>) -> Result<Self, HostsError> {
        let name = name.into();
        if kind != EntryKind::Comment && name.trim().is_empty() {
            return Err(HostsError::EmptyName { kind });
        }
        Ok(Self {
            id: EntryId::new(),
            kind,
            name,
            description: None,
            active: false,
            parent: None,
            children: Vec::new(),
        })
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            kind: EntryKind::Comment,
            name: text.into(),
            description: None,
            active: false,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn host_group(name: impl Into<String>) -> Result<Self, HostsError> {
        Self::new(EntryKind::HostGroup, name)
    }

    pub fn host(ip: impl Into<String>, active: bool) -> Result<Self, HostsError> {
        Ok(Self::new(EntryKind::Host, ip)?.with_active(active))
    }

    pub fn domain(name: impl Into<String>) -> Result<Self, HostsError> {
        Self::new(EntryKind::Domain, name)
    }

    /// Placeholder entry of `kind`, as created by an "add" action.
    pub fn empty(kind: EntryKind) -> Self {
        let name = match kind {
            EntryKind::Comment => DEFAULT_COMMENT,
            EntryKind::HostGroup => DEFAULT_GROUP_NAME,
            EntryKind::Host => DEFAULT_HOST_IP,
            EntryKind::Domain => DEFAULT_DOMAIN,
        };
        Self {
            id: EntryId::new(),
            kind,
            name: name.to_string(),
            description: None,
            active: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Blank descriptions are stored as `None`.
    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = normalize_description(description.map(str::to_string));
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn children(&self) -> &[EntryId] {
        &self.children
    }

    pub fn is_activatable(&self) -> bool {
        self.kind.is_activatable()
    }

    /// Hash of kind, name, description and stored active flag.
    pub(crate) fn own_hash(&self) -> u64 {
        let mut hash = FNV_OFFSET;
        fnv1a(&mut hash, self.kind.to_string().as_bytes());
        fnv1a(&mut hash, self.name.as_bytes());
        fnv1a(&mut hash, self.description.as_deref().unwrap_or_default().as_bytes());
        fnv1a(&mut hash, &[u8::from(self.active)]);
        hash
    }

    /// `<Kind>-<hash>` over this entry's own fields. Entries without children
    /// share this signature with [`HostFile::signature`](crate::hostfile::HostFile::signature).
    pub fn signature(&self) -> String {
        format!("{}-{:016x}", self.kind, self.own_hash())
    }
}

impl fmt::Display for HostsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Name: {}, Id: {})", self.kind, self.name, self.id)
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

pub(crate) fn fnv1a(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(FNV_PRIME);
    }
    // field separator
    *hash ^= 0xff;
    *hash = hash.wrapping_mul(FNV_PRIME);
}

/// Descriptions are single-line and trimmed; blank ones become `None`.
pub(crate) fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.lines().map(str::trim).filter(|l| !l.is_empty()).collect::<Vec<_>>().join(" "))
        .filter(|d| !d.is_empty())
}
