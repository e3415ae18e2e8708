//! Hostman - hosts file editor with groups, toggles and profiles.

pub mod cli;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod hostfile;
pub mod hosts;
pub mod line;
pub mod parser;
pub mod platform;
pub mod profile;
pub mod serialize;
pub mod store;
pub mod syntax;

pub use entry::{EntryId, EntryKind, HostsEntry};
pub use error::HostsError;
pub use hostfile::{Change, ChangeObserver, HostFile};
pub use line::{HostsLine, LineNavigator};
