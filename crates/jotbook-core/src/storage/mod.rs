mod config;

pub use config::{Config, DisplayConfig, JournalConfig};

use std::path::{Path, PathBuf};

use crate::backup::backup_path_for;
use crate::error::{JournalError, Result};
use crate::store::JournalStore;

const JOURNAL_EXTENSION: &str = "txt";

/// Returns the jotbook data directory, creating it if needed.
///
/// `JOTBOOK_HOME` overrides the location outright. Otherwise this is
/// `~/.config/jotbook/`, or `~/.config/jotbook-dev/` when `JOTBOOK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("JOTBOOK_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("JOTBOOK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("jotbook-dev")
            } else {
                base_dir.join("jotbook")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| JournalError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Directory holding the journal files.
pub fn journals_dir() -> Result<PathBuf> {
    let dir = data_dir()?.join("journals");
    std::fs::create_dir_all(&dir)
        .map_err(|e| JournalError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Map a journal name to its file inside `dir`.
///
/// Names without an extension get `.txt`. The file is not created here; the
/// first append does that.
pub fn resolve_journal(dir: &Path, name: &str) -> Result<PathBuf> {
    let name = name.trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(JournalError::InvalidJournalName(name.to_string()));
    }
    if name.contains(['/', '\\']) {
        return Err(JournalError::InvalidJournalName(format!(
            "{name} (path separators are not allowed)"
        )));
    }
    if name.ends_with(".bak") {
        return Err(JournalError::InvalidJournalName(format!(
            "{name} (reserved for backups)"
        )));
    }

    let mut path = dir.join(name);
    if path.extension().is_none() {
        path.set_extension(JOURNAL_EXTENSION);
    }
    Ok(path)
}

/// A journal file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalInfo {
    pub name: String,
    pub path: PathBuf,
    pub entries: usize,
    pub has_backup: bool,
}

/// Journals in `dir`, sorted by name. Backup slots are not listed.
pub fn list_journals(dir: &Path) -> Result<Vec<JournalInfo>> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(JournalError::io(dir, e)),
    };

    let mut journals = Vec::new();
    for item in read_dir {
        let item = item.map_err(|e| JournalError::io(dir, e))?;
        let path = item.path();
        if !path.is_file() || path.extension().is_some_and(|ext| ext == "bak") {
            continue;
        }
        let name = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => continue,
        };
        let entries = JournalStore::new(path.clone()).load()?.len();
        let has_backup = backup_path_for(&path).is_file();
        journals.push(JournalInfo {
            name,
            path,
            entries,
            has_backup,
        });
    }
    journals.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(journals)
}
