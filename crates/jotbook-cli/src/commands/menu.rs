//! Interactive menu loop.
//!
//! Reads choices line by line, so it works the same on a terminal and with
//! piped input. Errors from a single action are printed and the loop goes on;
//! end of input quits.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use jotbook_core::engine::index_from_signed;
use jotbook_core::{Config, SearchMode};

use super::{entries, journals};
use crate::session::Session;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn run(session: &mut Session, config: Config, config_path: Option<PathBuf>) -> CmdResult {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Menu::new(session, config, config_path, stdin.lock(), stdout.lock()).run()
}

pub struct Menu<'a, R, W> {
    session: &'a mut Session,
    config: Config,
    /// Where display toggles are saved; `None` keeps them for this session only.
    config_path: Option<PathBuf>,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        session: &'a mut Session,
        config: Config,
        config_path: Option<PathBuf>,
        input: R,
        out: W,
    ) -> Self {
        Self {
            session,
            config,
            config_path,
            input,
            out,
        }
    }

    pub fn run(&mut self) -> CmdResult {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("> ")? else {
                writeln!(self.out)?;
                return Ok(());
            };

            let result = match choice.as_str() {
                "1" | "w" => self.write_entry(),
                "2" | "l" => self.list(),
                "3" | "r" => self.read(),
                "4" | "s" => self.search(),
                "5" | "e" => self.edit(),
                "6" | "d" => self.delete(),
                "7" | "u" => entries::undo(self.session, &mut self.out),
                "8" | "j" => self.switch_journal(),
                "9" | "o" => self.settings(),
                "0" | "q" | "quit" | "exit" => return Ok(()),
                "" => Ok(()),
                other => {
                    writeln!(self.out, "Unknown choice: {other}")?;
                    Ok(())
                }
            };

            if let Err(e) = result {
                writeln!(self.out, "error: {e}")?;
            }
        }
    }

    fn print_menu(&mut self) -> std::io::Result<()> {
        let count = self
            .session
            .engine()
            .entries()
            .map(|e| e.len().to_string())
            .unwrap_or_else(|_| "?".into());
        writeln!(self.out)?;
        writeln!(self.out, "Journal: {} ({count} entries)", self.session.journal_name())?;
        writeln!(self.out, " 1) Write entry      2) List entries")?;
        writeln!(self.out, " 3) Read entry       4) Search")?;
        writeln!(self.out, " 5) Edit entry       6) Delete entry")?;
        writeln!(self.out, " 7) Undo last change 8) Switch journal")?;
        writeln!(self.out, " 9) Settings         q) Quit")?;
        Ok(())
    }

    /// Print `text` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> std::io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Read lines until an empty one; they form one message.
    fn read_message(&mut self) -> std::io::Result<String> {
        writeln!(self.out, "(finish with an empty line)")?;
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                break;
            }
            lines.push(line.to_string());
        }
        Ok(lines.join("\n"))
    }

    fn ask_index(&mut self) -> Result<Option<i64>, Box<dyn std::error::Error>> {
        let Some(raw) = self.prompt("Entry number: ")? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(Some(raw.parse::<i64>().map_err(|_| format!("not a number: {raw}"))?))
    }

    /// Show the current listing so indices are fresh before asking for one.
    fn show_all(&mut self) -> CmdResult {
        let mut settings = self.session.display.clone();
        settings.page_size = 0;
        entries::list_page(self.session, &settings, 1, &mut self.out)?;
        Ok(())
    }

    fn write_entry(&mut self) -> CmdResult {
        writeln!(self.out, "New entry")?;
        let message = self.read_message()?;
        entries::add(self.session, &message, &mut self.out)
    }

    fn list(&mut self) -> CmdResult {
        let mut page = 1;
        loop {
            let settings = self.session.display.clone();
            let total = entries::list_page(self.session, &settings, page, &mut self.out)?;
            if page >= total {
                return Ok(());
            }
            match self.prompt("Enter for next page, q to stop: ")? {
                Some(answer) if answer.is_empty() => page += 1,
                _ => return Ok(()),
            }
        }
    }

    fn read(&mut self) -> CmdResult {
        self.show_all()?;
        if let Some(index) = self.ask_index()? {
            entries::read(self.session, index, &mut self.out)?;
        }
        Ok(())
    }

    fn search(&mut self) -> CmdResult {
        let Some(keyword) = self.prompt("Keyword: ")? else {
            return Ok(());
        };
        entries::find(self.session, &keyword, SearchMode::IgnoreCase, &mut self.out)
    }

    fn edit(&mut self) -> CmdResult {
        self.show_all()?;
        let Some(index) = self.ask_index()? else {
            return Ok(());
        };
        // Validate before asking for the new text
        let engine = self.session.engine();
        index_from_signed(index, engine.entries()?.len())?;
        writeln!(self.out, "New text for entry [{index}]")?;
        let message = self.read_message()?;
        entries::edit(self.session, index, &message, &mut self.out)
    }

    fn delete(&mut self) -> CmdResult {
        self.show_all()?;
        if let Some(index) = self.ask_index()? {
            entries::delete(self.session, index, false, &mut self.input, &mut self.out)?;
        }
        Ok(())
    }

    fn switch_journal(&mut self) -> CmdResult {
        journals::write_list(self.session, &mut self.out)?;
        let Some(name) = self.prompt("Journal name (new names are created on first write): ")? else {
            return Ok(());
        };
        if name.is_empty() {
            return Ok(());
        }
        self.session.switch_journal(&name)?;
        writeln!(self.out, "Now using '{}'", self.session.journal_name())?;
        Ok(())
    }

    fn settings(&mut self) -> CmdResult {
        loop {
            let display = &self.session.display;
            let on_off = |flag: bool| if flag { "on" } else { "off" };
            let summary = format!(
                " 1) Timestamps: {}\n 2) Wrap width: {}\n 3) Color: {}\n 4) Page size: {}\n b) Back",
                on_off(display.show_timestamps),
                display.wrap_width,
                on_off(display.color),
                display.page_size,
            );
            writeln!(self.out, "{summary}")?;

            let Some(choice) = self.prompt("settings> ")? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => {
                    self.session.display.show_timestamps = !self.session.display.show_timestamps;
                    self.config.display.show_timestamps = self.session.display.show_timestamps;
                }
                "2" => {
                    let Some(width) = self.ask_number("Wrap width (0 = no wrapping): ")? else {
                        continue;
                    };
                    self.session.display.wrap_width = width as usize;
                    self.config.display.wrap_width = width;
                }
                "3" => {
                    self.session.display.color = !self.session.display.color;
                    self.config.display.color = self.session.display.color;
                }
                "4" => {
                    let Some(size) = self.ask_number("Page size (0 = no paging): ")? else {
                        continue;
                    };
                    self.session.display.page_size = size as usize;
                    self.config.display.page_size = size;
                }
                "b" | "q" | "" => return Ok(()),
                other => {
                    writeln!(self.out, "Unknown choice: {other}")?;
                    continue;
                }
            }
            self.persist_config()?;
        }
    }

    fn ask_number(&mut self, text: &str) -> Result<Option<u32>, Box<dyn std::error::Error>> {
        let Some(raw) = self.prompt(text)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(Some(raw.parse::<u32>().map_err(|_| format!("not a number: {raw}"))?))
    }

    fn persist_config(&mut self) -> CmdResult {
        if let Some(path) = &self.config_path {
            self.config.save_to(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplaySettings;
    use jotbook_core::BackupPolicy;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Session {
        Session::in_dir(
            dir.path().join("journals"),
            "journal",
            BackupPolicy::Permissive,
            DisplaySettings::plain(),
        )
        .unwrap()
    }

    fn drive(session: &mut Session, config_path: Option<PathBuf>, script: &str) -> String {
        let mut out = Vec::new();
        Menu::new(
            session,
            Config::default(),
            config_path,
            Cursor::new(script.to_string()),
            &mut out,
        )
        .run()
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn write_edit_delete_undo_through_menu() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);

        let script = "1\nfirst line\nsecond line\n\n\
                      w\nanother\n\n\
                      5\n1\nchanged\n\n\
                      6\n0\ny\n\
                      u\n\
                      q\n";
        let text = drive(&mut s, None, script);
        assert!(text.contains("Added entry [0]"));
        assert!(text.contains("Added entry [1]"));
        assert!(text.contains("Updated entry [1]"));
        assert!(text.contains("Deleted entry [0]"));
        assert!(text.contains("Restored 'journal'"));

        let entries = s.engine().entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first line\nsecond line");
        assert_eq!(entries[1].message, "changed");
    }

    #[test]
    fn bad_input_is_reported_and_loop_continues() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        let text = drive(&mut s, None, "3\nabc\n5\n7\nzz\n1\n\nq\n");
        assert!(text.contains("error: not a number: abc"));
        assert!(text.contains("error: Index 7 out of range"));
        assert!(text.contains("Unknown choice: zz"));
        assert!(text.contains("error: Message is empty"));
    }

    #[test]
    fn end_of_input_quits() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        let text = drive(&mut s, None, "");
        assert!(text.contains("Journal: journal (0 entries)"));
    }

    #[test]
    fn switch_journal_changes_target() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        drive(&mut s, None, "j\ntravel\nw\nparis\n\nq\n");
        assert_eq!(s.journal_name(), "travel");
        assert!(s.journal_path().ends_with("travel.txt"));
        assert_eq!(s.engine().entries().unwrap()[0].message, "paris");
    }

    #[test]
    fn settings_toggles_are_saved() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        let config_path = dir.path().join("config.toml");
        drive(&mut s, Some(config_path.clone()), "9\n1\n2\n40\nb\nq\n");

        assert!(!s.display.show_timestamps);
        assert_eq!(s.display.wrap_width, 40);
        let saved = Config::load_from(&config_path).unwrap();
        assert!(!saved.display.show_timestamps);
        assert_eq!(saved.display.wrap_width, 40);
    }

    #[test]
    fn list_pages_until_stopped() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.display.page_size = 1;
        s.display.show_timestamps = false;
        for m in ["a", "b", "c"] {
            s.engine().append(m).unwrap();
        }
        let text = drive(&mut s, None, "2\n\nq\nq\n");
        assert!(text.contains("[0]  a"));
        assert!(text.contains("[1]  b"));
        assert!(!text.contains("[2]  c"));
    }
}
