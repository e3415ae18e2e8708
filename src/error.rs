//! Typed errors for the hosts model.
//!
//! Only programmer errors live here. Unknown entry ids are reported as
//! `false`/`None` by the tree API, and I/O failures are `anyhow` errors raised
//! by the file-access layer.

use crate::entry::EntryKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostsError {
    #[error("{kind} entries require a non-empty name")]
    EmptyName { kind: EntryKind },

    #[error("line {line_number} is out of range (1..={count})")]
    LineOutOfRange { line_number: usize, count: usize },
}
