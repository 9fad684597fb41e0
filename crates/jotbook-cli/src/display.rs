//! Terminal rendering of journal entries: wrapping, pagination, color.

use std::io::IsTerminal;
use std::ops::Range;

use jotbook_core::{DisplayConfig, Entry};
use owo_colors::OwoColorize;

/// Narrowest column the message body is wrapped to.
const MIN_BODY_WIDTH: usize = 20;

/// Resolved display preferences for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub show_timestamps: bool,
    /// 0 disables wrapping.
    pub wrap_width: usize,
    pub color: bool,
    /// 0 shows everything on one page.
    pub page_size: usize,
}

impl DisplaySettings {
    /// Color is only used when configured, not disabled on the command line,
    /// and stdout is a terminal.
    pub fn from_config(cfg: &DisplayConfig, no_color: bool) -> Self {
        Self {
            show_timestamps: cfg.show_timestamps,
            wrap_width: cfg.wrap_width as usize,
            color: cfg.color && !no_color && std::io::stdout().is_terminal(),
            page_size: cfg.page_size as usize,
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            show_timestamps: true,
            wrap_width: 0,
            color: false,
            page_size: 0,
        }
    }
}

/// Word-wrap `text` to `width` columns. Embedded newlines always break;
/// words longer than `width` are split. `width == 0` only splits on newlines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if width == 0 {
            lines.push(paragraph.to_string());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            loop {
                let sep = usize::from(current_len > 0);
                if current_len + sep + word.len() <= width {
                    if sep == 1 {
                        current.push(' ');
                    }
                    current.extend(word.iter());
                    current_len += sep + word.len();
                    break;
                }
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                    continue;
                }
                // Word alone is wider than the line
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
        }
        lines.push(current);
    }
    lines
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Entry indices on this page.
    pub range: Range<usize>,
    /// 1-based page number after clamping.
    pub number: usize,
    pub total: usize,
}

/// Select page `page` (1-based, clamped to the valid range) of `len` items.
pub fn paginate(len: usize, page: usize, page_size: usize) -> Page {
    if page_size == 0 || len == 0 {
        return Page {
            range: 0..len,
            number: 1,
            total: 1,
        };
    }
    let total = len.div_ceil(page_size);
    let number = page.clamp(1, total);
    let start = (number - 1) * page_size;
    Page {
        range: start..(start + page_size).min(len),
        number,
        total,
    }
}

fn index_label(index: usize, settings: &DisplaySettings) -> String {
    let label = format!("[{index}]");
    if settings.color {
        label.yellow().to_string()
    } else {
        label
    }
}

fn timestamp_label(entry: &Entry, settings: &DisplaySettings) -> String {
    if settings.color {
        entry.timestamp.as_str().dimmed().to_string()
    } else {
        entry.timestamp.to_string()
    }
}

/// Listing row: `[i] timestamp  message`, continuation lines indented under
/// the message.
pub fn format_row(index: usize, entry: &Entry, settings: &DisplaySettings) -> String {
    let mut prefix = index_label(index, settings);
    let mut prefix_width = format!("[{index}]").chars().count();
    if settings.show_timestamps {
        prefix.push(' ');
        prefix.push_str(&timestamp_label(entry, settings));
        prefix_width += 1 + entry.timestamp.as_str().chars().count();
    }
    prefix.push_str("  ");
    prefix_width += 2;

    let body_width = if settings.wrap_width == 0 {
        0
    } else {
        settings.wrap_width.saturating_sub(prefix_width).max(MIN_BODY_WIDTH)
    };

    let indent = " ".repeat(prefix_width);
    let mut out = String::new();
    for (i, line) in wrap(&entry.message, body_width).iter().enumerate() {
        if i == 0 {
            out.push_str(&prefix);
        } else {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    out
}

/// Full view of a single entry.
pub fn format_entry(index: usize, entry: &Entry, settings: &DisplaySettings) -> String {
    let mut out = format!("Entry {}", index_label(index, settings));
    if settings.show_timestamps {
        out.push_str("  ");
        out.push_str(&timestamp_label(entry, settings));
    }
    out.push('\n');
    for line in wrap(&entry.message, settings.wrap_width) {
        out.push('\n');
        out.push_str(&line);
    }
    out
}

/// Page footer, empty when everything fits on one page.
pub fn page_footer(page: &Page) -> Option<String> {
    (page.total > 1).then(|| format!("-- page {}/{} --", page.number, page.total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> Entry {
        Entry::new("2026-01-01 08:00:00", message)
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_keeps_embedded_newlines() {
        assert_eq!(wrap("one\n\ntwo", 0), vec!["one", "", "two"]);
        assert_eq!(wrap("one two\nthree", 5), vec!["one", "two", "three"]);
    }

    #[test]
    fn wrap_counts_chars_not_bytes() {
        assert_eq!(wrap("héllo wörld", 5), vec!["héllo", "wörld"]);
    }

    #[test]
    fn paginate_clamps_page_number() {
        assert_eq!(
            paginate(25, 3, 10),
            Page {
                range: 20..25,
                number: 3,
                total: 3
            }
        );
        assert_eq!(paginate(25, 9, 10).number, 3);
        assert_eq!(paginate(25, 0, 10).range, 0..10);
    }

    #[test]
    fn paginate_without_page_size_shows_all() {
        assert_eq!(paginate(25, 2, 0).range, 0..25);
        assert_eq!(paginate(0, 1, 10).total, 1);
    }

    #[test]
    fn row_without_wrapping() {
        let settings = DisplaySettings::plain();
        assert_eq!(
            format_row(3, &entry("hello"), &settings),
            "[3] 2026-01-01 08:00:00  hello"
        );
    }

    #[test]
    fn row_hides_timestamp() {
        let settings = DisplaySettings {
            show_timestamps: false,
            ..DisplaySettings::plain()
        };
        assert_eq!(format_row(0, &entry("hello"), &settings), "[0]  hello");
    }

    #[test]
    fn row_indents_continuation_lines() {
        let settings = DisplaySettings {
            show_timestamps: false,
            wrap_width: 25,
            ..DisplaySettings::plain()
        };
        let row = format_row(0, &entry("aaaa bbbb cccc dddd eeee ffff"), &settings);
        let lines: Vec<&str> = row.lines().collect();
        assert_eq!(lines[0], "[0]  aaaa bbbb cccc dddd");
        assert_eq!(lines[1], "     eeee ffff");
    }

    #[test]
    fn entry_view_lists_message_lines() {
        let settings = DisplaySettings::plain();
        assert_eq!(
            format_entry(1, &entry("line one\nline two"), &settings),
            "Entry [1]  2026-01-01 08:00:00\n\nline one\nline two"
        );
    }

    #[test]
    fn footer_only_for_multiple_pages() {
        assert!(page_footer(&paginate(5, 1, 10)).is_none());
        assert_eq!(
            page_footer(&paginate(15, 2, 10)).as_deref(),
            Some("-- page 2/2 --")
        );
    }
}
