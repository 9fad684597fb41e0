//! Journal entry commands for CLI.

use std::io::{BufRead, Write};

use clap::Subcommand;
use jotbook_core::engine::index_from_signed;
use jotbook_core::{search_with, Entry, SearchMode};

use crate::display::{self, DisplaySettings};
use crate::session::Session;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Subcommand)]
pub enum EntryAction {
    /// Write a new entry
    Add {
        /// Entry text (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// List entries
    List {
        /// Page to show (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Show every entry on one page
        #[arg(long)]
        all: bool,
        /// Hide timestamps
        #[arg(long)]
        no_timestamps: bool,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single entry
    Read {
        /// Entry index as shown by `list`
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
    /// Find entries whose message contains a keyword
    Search {
        keyword: String,
        /// Compare case-sensitively
        #[arg(long)]
        match_case: bool,
    },
    /// Replace an entry's message, keeping its timestamp
    Edit {
        /// Entry index as shown by `list`
        #[arg(allow_negative_numbers = true)]
        index: i64,
        /// New entry text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Delete an entry
    Delete {
        /// Entry index as shown by `list`
        #[arg(allow_negative_numbers = true)]
        index: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Restore the journal to how it was before the last change
    Undo,
}

pub fn run(session: &Session, action: EntryAction) -> CmdResult {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match action {
        EntryAction::Add { message } => add(session, &message.join(" "), &mut out)?,
        EntryAction::List {
            page,
            all,
            no_timestamps,
            json,
        } => {
            if json {
                print_json(session, &mut out)?;
            } else {
                let mut settings = session.display.clone();
                if all {
                    settings.page_size = 0;
                }
                if no_timestamps {
                    settings.show_timestamps = false;
                }
                list_page(session, &settings, page, &mut out)?;
            }
        }
        EntryAction::Read { index } => read(session, index, &mut out)?,
        EntryAction::Search {
            keyword,
            match_case,
        } => {
            let mode = if match_case {
                SearchMode::MatchCase
            } else {
                SearchMode::IgnoreCase
            };
            find(session, &keyword, mode, &mut out)?;
        }
        EntryAction::Edit { index, message } => edit(session, index, &message.join(" "), &mut out)?,
        EntryAction::Delete { index, yes } => {
            let stdin = std::io::stdin();
            delete(session, index, yes, &mut stdin.lock(), &mut out)?;
        }
        EntryAction::Undo => undo(session, &mut out)?,
    }
    Ok(())
}

pub(crate) fn add(session: &Session, message: &str, out: &mut impl Write) -> CmdResult {
    let engine = session.engine();
    let entry = engine.append(message)?;
    let index = engine.entries()?.len().saturating_sub(1);
    writeln!(out, "Added entry [{index}] at {}", entry.timestamp)?;
    Ok(())
}

/// Write one page of the listing. Returns the page count.
pub(crate) fn list_page(
    session: &Session,
    settings: &DisplaySettings,
    page: usize,
    out: &mut impl Write,
) -> Result<usize, Box<dyn std::error::Error>> {
    let entries = session.engine().entries()?;
    if entries.is_empty() {
        writeln!(out, "Journal '{}' is empty", session.journal_name())?;
        return Ok(0);
    }

    let page = display::paginate(entries.len(), page, settings.page_size);
    for index in page.range.clone() {
        writeln!(out, "{}", display::format_row(index, &entries[index], settings))?;
    }
    if let Some(footer) = display::page_footer(&page) {
        writeln!(out, "{footer}")?;
    }
    Ok(page.total)
}

fn print_json(session: &Session, out: &mut impl Write) -> CmdResult {
    let entries = session.engine().entries()?;
    let rows: Vec<serde_json::Value> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::json!({
                "index": index,
                "timestamp": entry.timestamp,
                "message": entry.message,
            })
        })
        .collect();
    writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
    Ok(())
}

/// Resolve a user-supplied index against a fresh load.
pub(crate) fn lookup(session: &Session, index: i64) -> Result<(usize, Entry), Box<dyn std::error::Error>> {
    let mut entries = session.engine().entries()?;
    let index = index_from_signed(index, entries.len())?;
    Ok((index, entries.swap_remove(index)))
}

pub(crate) fn read(session: &Session, index: i64, out: &mut impl Write) -> CmdResult {
    let (index, entry) = lookup(session, index)?;
    writeln!(out, "{}", display::format_entry(index, &entry, &session.display))?;
    Ok(())
}

pub(crate) fn find(session: &Session, keyword: &str, mode: SearchMode, out: &mut impl Write) -> CmdResult {
    let entries = session.engine().entries()?;
    let hits = search_with(&entries, keyword, mode);
    if hits.is_empty() {
        writeln!(out, "No entries match '{keyword}'")?;
        return Ok(());
    }
    for hit in &hits {
        writeln!(out, "{}", display::format_row(hit.index, hit.entry, &session.display))?;
    }
    writeln!(out, "{} match(es)", hits.len())?;
    Ok(())
}

pub(crate) fn edit(session: &Session, index: i64, message: &str, out: &mut impl Write) -> CmdResult {
    let engine = session.engine();
    let index = index_from_signed(index, engine.entries()?.len())?;
    engine.edit_at(index, message)?;
    writeln!(out, "Updated entry [{index}]")?;
    Ok(())
}

pub(crate) fn delete(
    session: &Session,
    index: i64,
    assume_yes: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> CmdResult {
    let (index, entry) = lookup(session, index)?;
    if !assume_yes {
        writeln!(out, "{}", display::format_row(index, &entry, &session.display))?;
        if !confirm(&format!("Delete entry [{index}]?"), input, out)? {
            writeln!(out, "Delete cancelled")?;
            return Ok(());
        }
    }
    session.engine().delete_at(index)?;
    writeln!(out, "Deleted entry [{index}]")?;
    Ok(())
}

pub(crate) fn undo(session: &Session, out: &mut impl Write) -> CmdResult {
    session.engine().undo()?;
    writeln!(out, "Restored '{}' to its state before the last change", session.journal_name())?;
    Ok(())
}

/// Ask a yes/no question; anything but `y`/`yes` (including EOF) is no.
pub(crate) fn confirm(
    prompt: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> std::io::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jotbook_core::BackupPolicy;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Session {
        Session::in_dir(
            dir.path().to_path_buf(),
            "journal",
            BackupPolicy::Permissive,
            DisplaySettings::plain(),
        )
        .unwrap()
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> CmdResult) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn add_reports_index() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir);
        assert!(output(|o| add(&s, "one", o)).starts_with("Added entry [0] at "));
        assert!(output(|o| add(&s, "two", o)).starts_with("Added entry [1] at "));
    }

    #[test]
    fn empty_listing() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir);
        let text = output(|o| list_page(&s, &s.display, 1, o).map(|_| ()));
        assert_eq!(text, "Journal 'journal' is empty\n");
    }

    #[test]
    fn listing_is_paginated() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir);
        for i in 0..5 {
            s.engine().append(&format!("entry {i}")).unwrap();
        }
        let settings = DisplaySettings {
            page_size: 2,
            show_timestamps: false,
            ..DisplaySettings::plain()
        };
        let mut buf = Vec::new();
        let pages = list_page(&s, &settings, 3, &mut buf).unwrap();
        assert_eq!(pages, 3);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[4]  entry 4\n-- page 3/3 --\n"
        );
    }

    #[test]
    fn negative_index_is_out_of_range() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir);
        s.engine().append("only").unwrap();
        let mut buf = Vec::new();
        let err = read(&s, -1, &mut buf).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn search_prints_original_indices() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir);
        for m in ["buy milk", "call mom", "buy eggs"] {
            s.engine().append(m).unwrap();
        }
        let mut settings_session = s.clone();
        settings_session.display.show_timestamps = false;
        let text = output(|o| find(&settings_session, "BUY", SearchMode::IgnoreCase, o));
        assert_eq!(text, "[0]  buy milk\n[2]  buy eggs\n2 match(es)\n");
    }

    #[test]
    fn delete_asks_for_confirmation() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir);
        s.engine().append("keep me").unwrap();

        let text = output(|o| delete(&s, 0, false, &mut Cursor::new("n\n"), o));
        assert!(text.ends_with("Delete cancelled\n"));
        assert_eq!(s.engine().entries().unwrap().len(), 1);

        let text = output(|o| delete(&s, 0, false, &mut Cursor::new("y\n"), o));
        assert!(text.ends_with("Deleted entry [0]\n"));
        assert!(s.engine().entries().unwrap().is_empty());
    }

    #[test]
    fn confirm_treats_eof_as_no() {
        let mut buf = Vec::new();
        assert!(!confirm("Sure?", &mut Cursor::new(""), &mut buf).unwrap());
        assert!(confirm("Sure?", &mut Cursor::new("YES\n"), &mut buf).unwrap());
    }

    #[test]
    fn undo_without_backup_fails() {
        let dir = TempDir::new().unwrap();
        let s = session(&dir);
        let mut buf = Vec::new();
        let err = undo(&s, &mut buf).unwrap_err();
        assert!(err.to_string().contains("No backup"));
    }
}
