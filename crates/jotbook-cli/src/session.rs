//! Per-invocation state handed to every command.

use std::path::{Path, PathBuf};

use jotbook_core::storage::{journals_dir, resolve_journal};
use jotbook_core::{BackupPolicy, Config, JournalEngine};

use crate::display::DisplaySettings;

/// Current journal plus the preferences the presentation layer needs.
#[derive(Debug, Clone)]
pub struct Session {
    journals_dir: PathBuf,
    journal_name: String,
    journal_path: PathBuf,
    pub policy: BackupPolicy,
    pub display: DisplaySettings,
}

impl Session {
    /// Build a session from config and command-line overrides.
    pub fn open(
        config: &Config,
        journal: Option<&str>,
        strict: bool,
        no_color: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = journals_dir()?;
        let name = journal.unwrap_or(config.journal.default_name.as_str());
        let policy = if strict {
            BackupPolicy::Strict
        } else {
            config.journal.backup_policy
        };
        Ok(Self::in_dir(
            dir,
            name,
            policy,
            DisplaySettings::from_config(&config.display, no_color),
        )?)
    }

    /// Session rooted at an explicit journals directory.
    pub fn in_dir(
        journals_dir: PathBuf,
        name: &str,
        policy: BackupPolicy,
        display: DisplaySettings,
    ) -> jotbook_core::error::Result<Self> {
        let journal_path = resolve_journal(&journals_dir, name)?;
        Ok(Self {
            journals_dir,
            journal_name: name.trim().to_string(),
            journal_path,
            policy,
            display,
        })
    }

    /// Point the session at another journal in the same directory.
    pub fn switch_journal(&mut self, name: &str) -> jotbook_core::error::Result<()> {
        self.journal_path = resolve_journal(&self.journals_dir, name)?;
        self.journal_name = name.trim().to_string();
        tracing::debug!(journal = %self.journal_path.display(), "switched journal");
        Ok(())
    }

    pub fn engine(&self) -> JournalEngine {
        JournalEngine::new(self.journal_path.clone(), self.policy)
    }

    pub fn journal_name(&self) -> &str {
        &self.journal_name
    }

    pub fn journal_path(&self) -> &Path {
        &self.journal_path
    }

    pub fn journals_dir(&self) -> &Path {
        &self.journals_dir
    }
}
