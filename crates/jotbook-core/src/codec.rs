//! Line codec for the journal file format.
//!
//! Each entry occupies exactly one line: `TIMESTAMP\tMESSAGE\n`. Tabs,
//! newlines, carriage returns and backslashes inside the message are written
//! as two-character escapes (`\t`, `\n`, `\r`, `\\`) so the one-record-per-line
//! layout can never be broken by user input.

use crate::entry::Entry;

const SEPARATOR: char = '\t';

/// Encode an entry as one line, including the trailing newline.
pub fn encode(entry: &Entry) -> String {
    let message = escape(&entry.message);
    let mut line = String::with_capacity(entry.timestamp.as_str().len() + message.len() + 2);
    line.push_str(entry.timestamp.as_str());
    line.push(SEPARATOR);
    line.push_str(&message);
    line.push('\n');
    line
}

/// Decode one line. Returns `None` for lines without a tab separator.
pub fn decode(line: &str) -> Option<Entry> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    let (timestamp, message) = line.split_once(SEPARATOR)?;
    Some(Entry::new(timestamp, unescape(message)))
}

fn escape(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    for c in message.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            // Unknown escape: keep it verbatim
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
