//! Passage search with highlighted, word-budgeted snippets.
//!
//! Documents are ordered collections of named segments (verses, comment
//! lines). A search finds every occurrence of a query, cuts a readable window
//! of text around it, highlights the match in the original text, and resolves
//! it to a location a reader can link to (`mn10:1.1-mn10:1.3`, `comment4`).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ normalize.rs │────▶│   index.rs   │────▶│  matcher.rs  │
//! │ (fold, strip │     │ (TextIndex,  │     │ (QueryMatcher│
//! │  markup)     │     │  offset map) │     │  loose/strict│
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │                    │
//!                             ▼                    ▼
//!                      ┌──────────────┐     ┌──────────────┐
//!                      │ location.rs  │◀────│  passage.rs  │
//!                      │ (verse range,│     │ (window,     │
//!                      │  ordinal)    │     │  highlight)  │
//!                      └──────────────┘     └──────────────┘
//!                             │                    │
//!                             ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                        search.rs                         │
//! │   (SearchOrchestrator: corpus loop, cap, progress,      │
//! │    cancellation, index cache)                           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Matching happens on normalized text (lowercase, whitespace collapsed,
//! diacritics stripped for source-language corpora). Everything shown to the
//! reader comes from the original text, through the index's offset map.
//!
//! # Usage
//!
//! ```
//! use passim::{Corpus, Document, SearchOptions, SearchOrchestrator, Segments};
//!
//! let body: Segments = [
//!     ("v1", "The training is hard."),
//!     ("v2", "He continues training daily."),
//! ]
//! .into_iter()
//! .collect();
//! let corpus = Corpus {
//!     primary: vec![Document::new("doc1", body)],
//!     secondary: vec![],
//! };
//!
//! let mut orchestrator = SearchOrchestrator::default();
//! let results = orchestrator.search_all(&corpus, "training", &SearchOptions::default());
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].anchor(), "doc1#v1-v1");
//! assert!(results[0].passage.html.contains("<b>training</b>"));
//! ```

pub mod config;
pub mod contracts;
pub mod corpus;
pub mod error;
pub mod index;
pub mod location;
pub mod matcher;
pub mod normalize;
pub mod passage;
pub mod search;
pub mod testing;
pub mod types;

// Re-exports for public API
pub use config::SearchConfig;
pub use corpus::{sort_key, Category, CategoryFilter, Corpus, Document, Language};
pub use error::{PassimError, Result};
pub use index::TextIndex;
pub use location::resolve;
pub use matcher::{find_all, QueryMatcher};
pub use normalize::{
    clean_query, collapse_whitespace, normalize_for_search, strip_diacritics, strip_markup,
};
pub use passage::{Highlight, Passage, PassageExtractor};
pub use search::{
    CancellationToken, Progress, ResultSource, SearchEvent, SearchOptions, SearchOrchestrator,
    SearchOutcome, SearchResult, SearchState,
};
pub use types::{
    find_segment_at_offset, validate_segment_bounds, LanguageMode, Location, SegmentBound,
    Segments, Span, UnitMode,
};
