//! Single-slot backup for a journal file.
//!
//! The slot lives next to the journal at `<path>.bak` and is overwritten by
//! every mutation. Restoring does not take a new backup, so undo is one level
//! deep.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{JournalError, Result};

const BACKUP_SUFFIX: &str = ".bak";

/// What a backup attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    /// Journal was copied into the slot
    Saved { bytes: u64 },
    /// Journal does not exist yet; the slot was left alone
    NothingToProtect,
}

/// Owns the backup slot of one journal file
#[derive(Debug, Clone)]
pub struct BackupManager {
    journal: PathBuf,
    slot: PathBuf,
}

impl BackupManager {
    pub fn new(journal: impl Into<PathBuf>) -> Self {
        let journal = journal.into();
        let slot = backup_path_for(&journal);
        Self { journal, slot }
    }

    /// Copy the journal byte for byte into the slot.
    pub fn backup(&self) -> Result<BackupOutcome> {
        if !self.journal.exists() {
            return Ok(BackupOutcome::NothingToProtect);
        }
        let bytes = fs::copy(&self.journal, &self.slot).map_err(|source| {
            JournalError::BackupFailed {
                path: self.slot.clone(),
                source,
            }
        })?;
        tracing::debug!(backup = %self.slot.display(), bytes, "journal backed up");
        Ok(BackupOutcome::Saved { bytes })
    }

    /// Copy the slot back over the journal.
    ///
    /// The slot is kept, so a second restore reapplies the same snapshot.
    /// Anything at the slot path that is not a regular file is not a backup.
    pub fn restore(&self) -> Result<()> {
        if !self.slot.is_file() {
            return Err(JournalError::NoBackup {
                path: self.slot.clone(),
            });
        }
        fs::copy(&self.slot, &self.journal).map_err(|e| JournalError::io(&self.journal, e))?;
        tracing::info!(journal = %self.journal.display(), "journal restored from backup");
        Ok(())
    }

    pub fn has_backup(&self) -> bool {
        self.slot.is_file()
    }

    pub fn backup_path(&self) -> &Path {
        &self.slot
    }
}

/// `<journal>.bak`, appended to the full file name.
pub fn backup_path_for(journal: &Path) -> PathBuf {
    let mut name: OsString = journal.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}
