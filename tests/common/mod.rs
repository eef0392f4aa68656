//! Shared test utilities and fixtures.

#![allow(dead_code)]

use passim::{
    Corpus, Document, LanguageMode, SearchEvent, SearchOptions, SearchOrchestrator, SearchResult,
    Segments, TextIndex, UnitMode,
};

// Re-export canonical fixtures from passim::testing
pub use passim::testing::{long_verse, sample_commentary, sample_corpus, sample_verses, segments};

/// Segments keyed `s1`, `s2`, ... in order.
pub fn numbered_segments(texts: &[String]) -> Segments {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| (format!("s{}", i + 1), t.clone()))
        .collect()
}

pub fn build(texts: &[String], language: LanguageMode, unit: UnitMode) -> TextIndex {
    TextIndex::build(&numbered_segments(texts), language, unit)
}

/// A corpus with one primary document.
pub fn single_document(id: &str, body: Segments, commentary: Option<Segments>) -> Corpus {
    let mut doc = Document::new(id, body);
    doc.commentary = commentary;
    Corpus {
        primary: vec![doc],
        secondary: vec![],
    }
}

/// Run a search to completion with default config and collect results.
pub fn search(corpus: &Corpus, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
    SearchOrchestrator::default().search_all(corpus, query, options)
}

pub fn result_events(events: &[SearchEvent]) -> Vec<&SearchResult> {
    events
        .iter()
        .filter_map(|e| match e {
            SearchEvent::Result(r) => Some(r),
            SearchEvent::Progress(_) => None,
        })
        .collect()
}

/// Strip highlight markers and ellipses, leaving the window text.
pub fn plain_window(html: &str) -> String {
    html.trim_start_matches("[...] ")
        .trim_end_matches(" [...]")
        .replace("<b>", "")
        .replace("</b>", "")
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
