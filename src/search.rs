//! Suggestion filtering and the row policy of the suggestion panel.

use crate::normalize::normalize;

/// Upper bound on suggestions surfaced at once. There is no paging.
pub const MAX_RESULTS: usize = 30;

/// Shown when Enter is pressed on an empty query.
pub const EMPTY_LOCATION: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<'a> {
    pub results: Vec<&'a str>,
    pub exact_match: bool,
}

/// Filters `catalog` by `query`, keeping catalog order and at most
/// [`MAX_RESULTS`] entries.
///
/// An empty (or whitespace-only) query yields the head of the catalog and
/// never an exact match. Otherwise an entry is kept when its comparison key
/// contains the query's key anywhere.
pub fn filter<'a, S: AsRef<str>>(catalog: &'a [S], query: &str) -> SearchResult<'a> {
    let q = query.trim();
    if q.is_empty() {
        return SearchResult {
            results: catalog.iter().take(MAX_RESULTS).map(|s| s.as_ref()).collect(),
            exact_match: false,
        };
    }

    let key = normalize(q);
    let mut exact_match = false;
    let results = catalog
        .iter()
        .map(|s| s.as_ref())
        .filter_map(|name| {
            let k = normalize(name);
            if !k.contains(&key) {
                return None;
            }
            exact_match |= k == key;
            Some(name)
        })
        .take(MAX_RESULTS)
        .collect();

    SearchResult {
        results,
        exact_match,
    }
}

/// One line of the suggestion panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// "Use the typed text" row, placed ahead of catalog rows.
    NewEntry(String),
    Entry(String),
    /// Informational row when nothing matched; not selectable.
    Empty(String),
}

impl Row {
    pub fn label(&self) -> String {
        match self {
            Row::NewEntry(text) | Row::Empty(text) => format!("Usar \"{text}\""),
            Row::Entry(name) => name.clone(),
        }
    }

    /// Location applied when the row is chosen.
    pub fn target(&self) -> Option<&str> {
        match self {
            Row::NewEntry(text) | Row::Entry(text) => Some(text.as_str()),
            Row::Empty(_) => None,
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.target().is_some()
    }
}

/// Which of the three mutually exclusive panel layouts is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    CatalogOnly,
    WithNewEntry,
    EmptyState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    pub layout: Layout,
    pub rows: Vec<Row>,
}

/// Builds the panel rows for `query`. Recomputed from scratch on every
/// call; nothing is cached between keystrokes.
pub fn suggestions<S: AsRef<str>>(catalog: &[S], query: &str) -> Suggestions {
    let trimmed = query.trim();
    let SearchResult {
        results,
        exact_match,
    } = filter(catalog, query);

    if results.is_empty() {
        let text = if trimmed.is_empty() { "…" } else { trimmed };
        return Suggestions {
            layout: Layout::EmptyState,
            rows: vec![Row::Empty(text.to_string())],
        };
    }

    let mut rows = Vec::with_capacity(results.len() + 1);
    let layout = if !trimmed.is_empty() && !exact_match {
        rows.push(Row::NewEntry(trimmed.to_string()));
        Layout::WithNewEntry
    } else {
        Layout::CatalogOnly
    };
    rows.extend(results.into_iter().map(|name| Row::Entry(name.to_string())));

    Suggestions { layout, rows }
}
