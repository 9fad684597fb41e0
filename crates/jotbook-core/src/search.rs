//! Keyword search over loaded entries.
//!
//! Hits keep the entry's position in the full journal so callers can pass
//! it straight to read/edit/delete.

use crate::entry::Entry;

/// How keywords are compared against messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    IgnoreCase,
    MatchCase,
}

/// A matching entry and its index in the unfiltered journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub index: usize,
    pub entry: &'a Entry,
}

/// Case-insensitive substring search on message text.
pub fn search<'a>(entries: &'a [Entry], keyword: &str) -> Vec<SearchHit<'a>> {
    search_with(entries, keyword, SearchMode::IgnoreCase)
}

/// The keyword is matched literally, surrounding spaces included. A blank
/// keyword matches nothing.
pub fn search_with<'a>(entries: &'a [Entry], keyword: &str, mode: SearchMode) -> Vec<SearchHit<'a>> {
    if keyword.trim().is_empty() {
        return Vec::new();
    }

    let needle = match mode {
        SearchMode::IgnoreCase => keyword.to_lowercase(),
        SearchMode::MatchCase => keyword.to_string(),
    };

    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| match mode {
            SearchMode::IgnoreCase => entry.message.to_lowercase().contains(&needle),
            SearchMode::MatchCase => entry.message.contains(&needle),
        })
        .map(|(index, entry)| SearchHit { index, entry })
        .collect()
}
