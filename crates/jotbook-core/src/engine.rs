//! Journal mutation engine.
//!
//! Every mutation runs VALIDATE -> BACKUP -> APPLY. Rejected input never
//! touches the journal or its backup slot. What happens when the backup step
//! fails is decided by [`BackupPolicy`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::backup::{BackupManager, BackupOutcome};
use crate::entry::Entry;
use crate::error::{JournalError, Result};
use crate::store::JournalStore;

/// Reaction to a failed backup before a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupPolicy {
    /// Warn and carry on with the mutation; undo may then be unavailable
    #[default]
    Permissive,
    /// Abort the mutation
    Strict,
}

impl std::str::FromStr for BackupPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(BackupPolicy::Permissive),
            "strict" => Ok(BackupPolicy::Strict),
            other => Err(format!("unknown backup policy: {other}")),
        }
    }
}

/// Sole entry point for journal mutations.
#[derive(Debug, Clone)]
pub struct JournalEngine {
    store: JournalStore,
    backup: BackupManager,
    policy: BackupPolicy,
}

impl JournalEngine {
    pub fn new(path: impl Into<PathBuf>, policy: BackupPolicy) -> Self {
        let path = path.into();
        Self {
            store: JournalStore::new(path.clone()),
            backup: BackupManager::new(path),
            policy,
        }
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub fn backup_manager(&self) -> &BackupManager {
        &self.backup
    }

    /// All entries in file order.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        self.store.load()
    }

    /// Entry at `index` of a fresh load.
    pub fn get(&self, index: usize) -> Result<Entry> {
        let mut entries = self.store.load()?;
        check_index(index, entries.len())?;
        Ok(entries.swap_remove(index))
    }

    /// Append a new entry stamped with the current local time.
    pub fn append(&self, message: &str) -> Result<Entry> {
        check_message(message)?;
        let entry = Entry::now(message);
        self.take_backup()?;
        self.store.append(&entry)?;
        tracing::debug!(journal = %self.path().display(), "entry appended");
        Ok(entry)
    }

    /// Replace the message at `index`, keeping its timestamp.
    pub fn edit_at(&self, index: usize, new_message: &str) -> Result<Entry> {
        check_message(new_message)?;
        let mut entries = self.store.load()?;
        check_index(index, entries.len())?;

        entries[index].message = new_message.to_string();
        let edited = entries[index].clone();

        self.take_backup()?;
        self.store.rewrite_all(&entries)?;
        tracing::debug!(journal = %self.path().display(), index, "entry edited");
        Ok(edited)
    }

    /// Remove the entry at `index`. Later entries shift down by one.
    pub fn delete_at(&self, index: usize) -> Result<Entry> {
        let mut entries = self.store.load()?;
        check_index(index, entries.len())?;

        let removed = entries.remove(index);

        self.take_backup()?;
        self.store.rewrite_all(&entries)?;
        tracing::debug!(journal = %self.path().display(), index, "entry deleted");
        Ok(removed)
    }

    /// Restore the journal from its backup slot.
    pub fn undo(&self) -> Result<()> {
        self.backup.restore()
    }

    pub fn can_undo(&self) -> bool {
        self.backup.has_backup()
    }

    fn take_backup(&self) -> Result<()> {
        match self.backup.backup() {
            Ok(BackupOutcome::Saved { .. }) | Ok(BackupOutcome::NothingToProtect) => Ok(()),
            Err(e) => match self.policy {
                BackupPolicy::Strict => Err(e),
                BackupPolicy::Permissive => {
                    tracing::warn!(error = %e, "backup failed, continuing without undo");
                    Ok(())
                }
            },
        }
    }
}

/// Convert a user-supplied signed index, rejecting negatives.
pub fn index_from_signed(index: i64, len: usize) -> Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(JournalError::IndexOutOfRange { index, len })
}

fn check_message(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(JournalError::EmptyMessage);
    }
    Ok(())
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(JournalError::IndexOutOfRange {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn engine_in(dir: &TempDir) -> JournalEngine {
        JournalEngine::new(dir.path().join("journal.txt"), BackupPolicy::Permissive)
    }

    fn seed(engine: &JournalEngine, lines: &str) {
        fs::write(engine.path(), lines).unwrap();
    }

    #[test]
    fn append_rejects_blank_without_side_effects() {
        let dir = TempDir::new().unwrap();
        let engine = engine_in(&dir);
        assert!(matches!(engine.append(""), Err(JournalError::EmptyMessage)));
        assert!(matches!(engine.append(" \t "), Err(JournalError::EmptyMessage)));
        assert!(!engine.path().exists());
        assert!(!engine.can_undo());
    }

    #[test]
    fn append_keeps_message_untrimmed() {
        let dir = TempDir::new().unwrap();
        let engine = engine_in(&dir);
        let entry = engine.append("  indented").unwrap();
        assert_eq!(entry.message, "  indented");
        assert_eq!(engine.entries().unwrap()[0].message, "  indented");
    }

    #[test]
    fn first_append_has_nothing_to_back_up() {
        let dir = TempDir::new().unwrap();
        let engine = engine_in(&dir);
        engine.append("Hello").unwrap();
        assert!(!engine.can_undo());
        assert!(matches!(engine.undo(), Err(JournalError::NoBackup { .. })));
    }

    #[test]
    fn edit_keeps_timestamp() {
        let dir = TempDir::new().unwrap();
        let engine = engine_in(&dir);
        seed(&engine, "2026-01-01 08:00:00\tdraft\n");

        let edited = engine.edit_at(0, "final").unwrap();
        assert_eq!(edited.timestamp.as_str(), "2026-01-01 08:00:00");
        assert_eq!(engine.entries().unwrap(), vec![edited]);
    }

    #[test]
    fn edit_rejects_blank_message() {
        let dir = TempDir::new().unwrap();
        let engine = engine_in(&dir);
        seed(&engine, "2026-01-01 08:00:00\tdraft\n");
        assert!(matches!(
            engine.edit_at(0, "  "),
            Err(JournalError::EmptyMessage)
        ));
        assert!(!engine.can_undo());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let dir = TempDir::new().unwrap();
        let engine = engine_in(&dir);
        seed(&engine, "2026-01-01 08:00:00\tonly\n");

        assert!(matches!(
            engine.edit_at(1, "x"),
            Err(JournalError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(matches!(
            engine.delete_at(5),
            Err(JournalError::IndexOutOfRange { index: 5, len: 1 })
        ));
        assert!(matches!(
            engine.get(1),
            Err(JournalError::IndexOutOfRange { .. })
        ));
        assert!(!engine.can_undo());
    }

    #[test]
    fn delete_shifts_later_indices() {
        let dir = TempDir::new().unwrap();
        let engine = engine_in(&dir);
        seed(
            &engine,
            "2026-01-01 08:00:00\ta\n2026-01-01 09:00:00\tb\n2026-01-01 10:00:00\tc\n",
        );

        let removed = engine.delete_at(1).unwrap();
        assert_eq!(removed.message, "b");
        assert_eq!(engine.get(1).unwrap().message, "c");
    }

    #[test]
    fn delete_drops_malformed_lines_but_backup_keeps_them() {
        let dir = TempDir::new().unwrap();
        let engine = engine_in(&dir);
        let original = "2026-01-01 08:00:00\ta\nnoise\n2026-01-01 09:00:00\tb\n";
        seed(&engine, original);

        engine.delete_at(0).unwrap();
        assert_eq!(
            fs::read_to_string(engine.path()).unwrap(),
            "2026-01-01 09:00:00\tb\n"
        );
        assert_eq!(
            fs::read_to_string(engine.backup_manager().backup_path()).unwrap(),
            original
        );
    }

    #[test]
    fn signed_index_conversion() {
        assert_eq!(index_from_signed(0, 2).unwrap(), 0);
        assert!(matches!(
            index_from_signed(-1, 2),
            Err(JournalError::IndexOutOfRange { index: -1, len: 2 })
        ));
        assert!(matches!(
            index_from_signed(2, 2),
            Err(JournalError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn policy_parses_from_text() {
        assert_eq!("strict".parse::<BackupPolicy>().unwrap(), BackupPolicy::Strict);
        assert_eq!(
            " Permissive ".parse::<BackupPolicy>().unwrap(),
            BackupPolicy::Permissive
        );
        assert!("lenient".parse::<BackupPolicy>().is_err());
    }
}
