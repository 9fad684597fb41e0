//! # Jotbook Core Library
//!
//! Storage and mutation engine for Jotbook, a terminal journal. A journal is
//! a plain UTF-8 text file with one `TIMESTAMP\tMESSAGE` line per entry.
//! Every mutation copies the file into a single backup slot first, which is
//! what `undo` restores.
//!
//! ## Architecture
//!
//! - **Codec**: one entry per line; tabs, newlines and backslashes in messages
//!   are escaped
//! - **Store**: whole-file load, append, and rewrite of a journal path
//! - **Backup**: the `<journal>.bak` slot
//! - **Engine**: validate, back up, then apply; the only mutation path
//! - **Search**: keyword scan that keeps original indices
//! - **Storage**: data directory, journal name resolution, TOML config
//!
//! ## Key Components
//!
//! - [`JournalEngine`]: append / edit / delete / undo
//! - [`JournalStore`]: file access
//! - [`BackupManager`]: backup slot
//! - [`Config`]: user preferences

pub mod backup;
pub mod codec;
pub mod engine;
pub mod entry;
pub mod error;
pub mod search;
pub mod storage;
pub mod store;

pub use backup::{BackupManager, BackupOutcome};
pub use engine::{BackupPolicy, JournalEngine};
pub use entry::{Entry, Timestamp, TIMESTAMP_FORMAT};
pub use error::{ConfigError, JournalError};
pub use search::{search, search_with, SearchHit, SearchMode};
pub use storage::{Config, DisplayConfig, JournalConfig};
pub use store::JournalStore;
