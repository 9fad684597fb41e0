//! Plain-text journal storage.
//!
//! Reads and writes whole files; journals are small enough that streaming
//! or seeking buys nothing.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::codec;
use crate::entry::Entry;
use crate::error::{JournalError, Result};

/// Storage for one journal file
#[derive(Debug, Clone)]
pub struct JournalStore {
    path: PathBuf,
}

impl JournalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load all entries in file order.
    ///
    /// A missing file is an empty journal. Lines without a tab separator or
    /// with invalid UTF-8 are skipped.
    pub fn load(&self) -> Result<Vec<Entry>> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(JournalError::io(&self.path, e)),
        };

        let mut entries = Vec::new();
        for (line_no, raw) in content.split(|b| *b == b'\n').enumerate() {
            if raw.is_empty() {
                continue;
            }
            match std::str::from_utf8(raw).ok().and_then(codec::decode) {
                Some(entry) => entries.push(entry),
                None => tracing::debug!(
                    path = %self.path.display(),
                    line = line_no + 1,
                    "skipping malformed journal line"
                ),
            }
        }
        Ok(entries)
    }

    /// Append one entry without touching existing content.
    ///
    /// A last line left without its newline is terminated first so the new
    /// record starts on a line of its own.
    pub fn append(&self, entry: &Entry) -> Result<()> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| JournalError::io(&self.path, e))?;

        let mut line = codec::encode(entry);
        if ends_unterminated(&mut file).map_err(|e| JournalError::io(&self.path, e))? {
            tracing::debug!(path = %self.path.display(), "terminating unfinished last line");
            line.insert(0, '\n');
        }
        file.write_all(line.as_bytes())
            .map_err(|e| JournalError::io(&self.path, e))?;
        Ok(())
    }

    /// Truncate the file and write every entry in order.
    ///
    /// Not atomic: a crash mid-write leaves a partial file. Callers back up
    /// first.
    pub fn rewrite_all(&self, entries: &[Entry]) -> Result<()> {
        self.ensure_parent()?;
        let content: String = entries.iter().map(codec::encode).collect();
        fs::write(&self.path, content).map_err(|e| JournalError::io(&self.path, e))?;
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| JournalError::io(parent, e))
            }
            _ => Ok(()),
        }
    }
}

/// True when the file is non-empty and its last byte is not a newline.
fn ends_unterminated(file: &mut fs::File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
