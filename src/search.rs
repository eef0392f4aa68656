// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search loop: documents in, streamed results out.
//!
//! ```text
//! Idle ──start──▶ Running ──last document──▶ Completed
//!                    │
//!                    └──token cancelled──▶ Stopped
//! ```
//!
//! For every selected document the orchestrator builds (or reuses) a
//! `TextIndex`, finds matches, and turns each into a `SearchResult` with a
//! highlighted passage and a location. Results go to the caller's sink as soon
//! as they exist. Progress is reported after every sub-scan: primary documents
//! have two (body, commentary), secondary documents one.
//!
//! The primary and secondary corpora are interleaved document by document, or
//! run on two rayon threads when `concurrent_languages` is set.
//!
//! # Cancellation
//!
//! The token is checked before each document and before each emitted result.
//! Once it is cancelled nothing more reaches the sink; results already emitted
//! stand. A stopped search is not an error.

use crate::config::SearchConfig;
use crate::corpus::{CategoryFilter, Corpus, Document, Language};
use crate::index::TextIndex;
use crate::location::resolve;
use crate::matcher::QueryMatcher;
use crate::passage::{Passage, PassageExtractor};
use crate::types::{LanguageMode, Location, Segments, UnitMode};
use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

pub use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    pub languages: BTreeSet<Language>,
    /// Empty means every category.
    pub categories: CategoryFilter,
    pub strict: bool,
    pub single_result_per_document: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            languages: Language::ALL.into_iter().collect(),
            categories: CategoryFilter::all(),
            strict: false,
            single_result_per_document: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchState {
    #[default]
    Idle,
    Running,
    Completed,
    Stopped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// Which part of a document a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultSource {
    Body,
    Commentary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub document_id: String,
    pub display_id: String,
    pub label: String,
    pub language: Language,
    pub source: ResultSource,
    pub passage: Passage,
    pub location: Location,
}

impl SearchResult {
    /// Deep link fragment target: `documentId#location`.
    pub fn anchor(&self) -> String {
        format!("{}#{}", self.document_id, self.location.anchor())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SearchEvent {
    Result(SearchResult),
    Progress(Progress),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub state: SearchState,
    pub results: usize,
    pub progress: Progress,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct IndexKey {
    document_id: String,
    source: ResultSource,
    language: LanguageMode,
    fingerprint: u64,
}

pub struct SearchOrchestrator {
    config: SearchConfig,
    state: SearchState,
    cache: Option<Mutex<LruCache<IndexKey, Arc<TextIndex>>>>,
}

impl SearchOrchestrator {
    pub fn new(config: SearchConfig) -> Self {
        let cache = NonZeroUsize::new(config.index_cache_capacity)
            .map(|capacity| Mutex::new(LruCache::new(capacity)));
        SearchOrchestrator {
            config,
            state: SearchState::Idle,
            cache,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of indexes currently cached.
    pub fn cached_indexes(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }

    /// Run a search, streaming events into `sink`.
    ///
    /// A finished orchestrator can be started again; its index cache carries
    /// over.
    pub fn start<F>(
        &mut self,
        corpus: &Corpus,
        query: &str,
        options: &SearchOptions,
        cancel: &CancellationToken,
        sink: F,
    ) -> SearchOutcome
    where
        F: FnMut(SearchEvent) + Send,
    {
        self.state = SearchState::Running;
        let outcome = self.run(corpus, query, options, cancel, sink);
        self.state = outcome.state;
        outcome
    }

    /// Run a search to completion and collect its results.
    pub fn search_all(
        &mut self,
        corpus: &Corpus,
        query: &str,
        options: &SearchOptions,
    ) -> Vec<SearchResult> {
        let mut results = Vec::new();
        self.start(corpus, query, options, &CancellationToken::new(), |event| {
            if let SearchEvent::Result(result) = event {
                results.push(result);
            }
        });
        results
    }

    fn run<F>(
        &self,
        corpus: &Corpus,
        query: &str,
        options: &SearchOptions,
        cancel: &CancellationToken,
        sink: F,
    ) -> SearchOutcome
    where
        F: FnMut(SearchEvent) + Send,
    {
        let passes: Vec<Pass<'_>> = options
            .languages
            .iter()
            .map(|&language| Pass {
                language,
                documents: corpus.select(language, &options.categories),
                matcher: QueryMatcher::new(query, language.mode(), options.strict),
                extractor: PassageExtractor::new(self.word_budget(language))
                    .with_highlight(self.config.highlight()),
            })
            .collect();

        let run = Run {
            orchestrator: self,
            cancel,
            cap: if options.single_result_per_document {
                1
            } else {
                self.config.max_results_per_document
            },
            total: passes.iter().map(Pass::units).sum(),
            completed: AtomicUsize::new(0),
            emitted: AtomicUsize::new(0),
            stopped: AtomicBool::new(false),
            sink: Mutex::new(sink),
        };

        if self.config.concurrent_languages && passes.len() == 2 {
            run.concurrent(&passes);
        } else {
            run.interleaved(&passes);
        }

        let state = if run.stopped.load(Ordering::SeqCst) {
            SearchState::Stopped
        } else {
            SearchState::Completed
        };
        let outcome = SearchOutcome {
            state,
            results: run.emitted.load(Ordering::SeqCst),
            progress: Progress {
                completed: run.completed.load(Ordering::SeqCst),
                total: run.total,
            },
        };
        info!(
            state = ?outcome.state,
            results = outcome.results,
            completed = outcome.progress.completed,
            total = outcome.progress.total,
            "search finished"
        );
        outcome
    }

    fn word_budget(&self, language: Language) -> usize {
        match language {
            Language::Primary => self.config.primary_word_budget,
            Language::Secondary => self.config.secondary_word_budget,
        }
    }

    fn index_for(
        &self,
        document: &Document,
        source: ResultSource,
        segments: &Segments,
        language: LanguageMode,
    ) -> Arc<TextIndex> {
        let unit = match source {
            ResultSource::Body => UnitMode::MultiUnit,
            ResultSource::Commentary => UnitMode::SingleUnit,
        };
        let Some(cache) = &self.cache else {
            return Arc::new(TextIndex::build(segments, language, unit));
        };

        let mut hasher = DefaultHasher::new();
        segments.hash(&mut hasher);
        let key = IndexKey {
            document_id: document.id.clone(),
            source,
            language,
            fingerprint: hasher.finish(),
        };

        if let Some(index) = cache.lock().get(&key) {
            trace!(document = %document.id, ?source, "index cache hit");
            return Arc::clone(index);
        }
        trace!(document = %document.id, ?source, "index cache miss");
        let index = Arc::new(TextIndex::build(segments, language, unit));
        cache.lock().put(key, Arc::clone(&index));
        index
    }
}

impl Default for SearchOrchestrator {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// One language's share of a search.
struct Pass<'a> {
    language: Language,
    documents: Vec<&'a Document>,
    matcher: QueryMatcher,
    extractor: PassageExtractor,
}

impl Pass<'_> {
    /// Progress units: body and commentary for primary documents (counted
    /// even when a document has no commentary), body only for secondary.
    fn units(&self) -> usize {
        let per_document = match self.language {
            Language::Primary => 2,
            Language::Secondary => 1,
        };
        self.documents.len() * per_document
    }
}

struct Run<'a, F> {
    orchestrator: &'a SearchOrchestrator,
    cancel: &'a CancellationToken,
    cap: usize,
    total: usize,
    completed: AtomicUsize,
    emitted: AtomicUsize,
    stopped: AtomicBool,
    sink: Mutex<F>,
}

impl<F> Run<'_, F>
where
    F: FnMut(SearchEvent) + Send,
{
    fn interleaved(&self, passes: &[Pass<'_>]) {
        let longest = passes.iter().map(|p| p.documents.len()).max().unwrap_or(0);
        for i in 0..longest {
            for pass in passes {
                if let Some(document) = pass.documents.get(i) {
                    if !self.document(pass, document) {
                        return;
                    }
                }
            }
        }
    }

    #[cfg(feature = "parallel")]
    fn concurrent(&self, passes: &[Pass<'_>]) {
        let (first, second) = passes.split_at(1);
        rayon::join(|| self.pass(&first[0]), || self.pass(&second[0]));
    }

    #[cfg(not(feature = "parallel"))]
    fn concurrent(&self, passes: &[Pass<'_>]) {
        self.interleaved(passes);
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn pass(&self, pass: &Pass<'_>) {
        for document in &pass.documents {
            if !self.document(pass, document) {
                return;
            }
        }
    }

    /// Scan one document. Returns false once the search has stopped.
    fn document(&self, pass: &Pass<'_>, document: &Document) -> bool {
        if self.is_stopping() {
            return false;
        }

        let mode = pass.language.mode();
        self.part(pass, document, ResultSource::Body, &document.body, mode);
        if !self.advance() {
            return false;
        }

        if pass.language == Language::Primary {
            if let Some(commentary) = &document.commentary {
                self.part(pass, document, ResultSource::Commentary, commentary, mode);
            }
            if !self.advance() {
                return false;
            }
        }
        true
    }

    fn part(
        &self,
        pass: &Pass<'_>,
        document: &Document,
        source: ResultSource,
        segments: &Segments,
        mode: LanguageMode,
    ) {
        if pass.matcher.is_empty() || segments.is_empty() {
            return;
        }
        let index = self.orchestrator.index_for(document, source, segments, mode);
        let matches = pass.matcher.find_all(&index);
        debug!(
            document = %document.id,
            language = %pass.language,
            ?source,
            matches = matches.len(),
            "scanned"
        );

        let mut produced = 0;
        for span in matches {
            if produced >= self.cap || self.is_stopping() {
                break;
            }
            let passage = pass.extractor.extract(&index, span);
            let location = match resolve(&index, passage.matched) {
                Ok(location) => location,
                Err(err) => {
                    warn!(document = %document.id, ?source, error = %err, "dropping match");
                    continue;
                }
            };

            let label = match source {
                ResultSource::Body => document.label(pass.language),
                ResultSource::Commentary => document.commentary_label(pass.language),
            };
            let result = SearchResult {
                document_id: document.id.clone(),
                display_id: document.display_id(),
                label,
                language: pass.language,
                source,
                passage,
                location,
            };
            if self.emit_result(result) {
                produced += 1;
            }
        }
    }

    /// True if cancellation was requested. Latches `stopped`.
    fn is_stopping(&self) -> bool {
        if self.cancel.is_cancelled() {
            self.stopped.store(true, Ordering::SeqCst);
        }
        self.stopped.load(Ordering::SeqCst)
    }

    fn emit_result(&self, result: SearchResult) -> bool {
        // The check happens under the sink lock so a cancel issued from inside
        // the sink is seen by every later emission.
        let mut guard = self.sink.lock();
        if self.is_stopping() {
            return false;
        }
        self.emitted.fetch_add(1, Ordering::SeqCst);
        let sink = &mut *guard;
        sink(SearchEvent::Result(result));
        true
    }

    /// Count one finished sub-scan and report it.
    fn advance(&self) -> bool {
        let mut guard = self.sink.lock();
        if self.is_stopping() {
            return false;
        }
        let completed = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        let sink = &mut *guard;
        sink(SearchEvent::Progress(Progress {
            completed,
            total: self.total,
        }));
        true
    }
}
