//! Listing of the journals in the data directory.

use std::io::Write;

use jotbook_core::storage::list_journals;

use crate::session::Session;

pub fn run(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    write_list(session, &mut stdout.lock())
}

pub(crate) fn write_list(session: &Session, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let journals = list_journals(session.journals_dir())?;
    if journals.is_empty() {
        writeln!(out, "No journals yet in {}", session.journals_dir().display())?;
        return Ok(());
    }
    for journal in journals {
        let marker = if journal.path == session.journal_path() { '*' } else { ' ' };
        let undo = if journal.has_backup { "  (undo available)" } else { "" };
        writeln!(out, "{marker} {}  {} entries{undo}", journal.name, journal.entries)?;
    }
    Ok(())
}
