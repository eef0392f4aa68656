// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query matching over a `TextIndex`'s normalized text.
//!
//! A `QueryMatcher` is built once per query and language mode and reused for
//! every document of that language. Matching is a left-to-right linear scan:
//!
//! - **Loose**: every non-overlapping substring occurrence. The scan resumes at
//!   the previous match's end, so `"aa"` in `"aaaa"` matches twice and
//!   adjacent repeats are reported separately, never merged.
//! - **Strict**: the loose occurrences whose neighbours are a word boundary
//!   (whitespace, `. , ! ? ; " ' ) ] } - : /`, opening brackets, curly
//!   quotes and dashes) or the edge of the text. Strict starts are
//!   therefore always a subset of loose starts.
//!
//! In `SingleUnit` indexes an occurrence that straddles two segments is not a
//! match (the scan retries one character later), and segment edges count as
//! word boundaries.
//!
//! The query is normalized exactly like the text. Only when that finds no
//! occurrence at all is the query's punctuation spacing tightened with
//! [`clean_query`] (`"self - control"` → `"self-control"`) and the scan
//! repeated. The choice depends on loose occurrences alone, so strict and
//! loose always scan for the same needle.

use crate::index::TextIndex;
use crate::normalize::{clean_query, is_word_boundary, normalize_for_search};
use crate::types::{LanguageMode, Span, UnitMode};

#[derive(Debug, Clone)]
pub struct QueryMatcher {
    needle: Vec<char>,
    /// Needle with punctuation spacing tightened, when that differs.
    tidied: Option<Vec<char>>,
    language: LanguageMode,
    strict: bool,
}

impl QueryMatcher {
    pub fn new(query: &str, language: LanguageMode, strict: bool) -> Self {
        let needle: Vec<char> = normalize_for_search(query, language).chars().collect();
        let tidied: Vec<char> = normalize_for_search(&clean_query(query), language)
            .chars()
            .collect();
        QueryMatcher {
            tidied: (!tidied.is_empty() && tidied != needle).then_some(tidied),
            needle,
            language,
            strict,
        }
    }

    /// The normalized query this matcher looks for first.
    pub fn needle(&self) -> &[char] {
        &self.needle
    }

    /// The fallback needle, tried when [`needle`](Self::needle) never occurs.
    pub fn tidied(&self) -> Option<&[char]> {
        self.tidied.as_deref()
    }

    pub fn language(&self) -> LanguageMode {
        self.language
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// True if the query normalized to nothing; such a matcher never matches.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// All matches in `index`, as normalized spans in increasing order.
    pub fn find_all(&self, index: &TextIndex) -> Vec<Span> {
        debug_assert_eq!(
            self.language,
            index.language(),
            "matcher and index disagree on language mode"
        );
        if self.needle.is_empty() {
            return Vec::new();
        }

        let mut spans = occurrences(index, &self.needle);
        if spans.is_empty() {
            if let Some(tidied) = &self.tidied {
                spans = occurrences(index, tidied);
            }
        }
        if self.strict {
            spans.retain(|&span| is_whole_word(index, span));
        }

        crate::contracts::check_matches_ordered(&spans, index.normalized().len());
        spans
    }
}

/// Loose, non-overlapping occurrences of `needle`, left to right.
fn occurrences(index: &TextIndex, needle: &[char]) -> Vec<Span> {
    let haystack = index.normalized();
    let mut spans = Vec::new();
    let mut from = 0;

    while let Some(start) = find_from(haystack, needle, from) {
        let span = Span::new(start, start + needle.len());
        if index.unit() == UnitMode::SingleUnit && crosses_segment(index, span) {
            from = start + 1;
            continue;
        }
        spans.push(span);
        from = span.end;
    }
    spans
}

/// Convenience wrapper: build a matcher for `index`'s language and run it.
pub fn find_all(index: &TextIndex, query: &str, strict: bool) -> Vec<Span> {
    QueryMatcher::new(query, index.language(), strict).find_all(index)
}

fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    let last = haystack.len() - needle.len();
    let first = needle[0];
    (from..=last).find(|&i| haystack[i] == first && haystack[i..i + needle.len()] == *needle)
}

fn crosses_segment(index: &TextIndex, span: Span) -> bool {
    let first = index.offset_map()[span.start];
    let last = index.offset_map()[span.end - 1];
    index.segment_index_at(first) != index.segment_index_at(last)
}

fn is_whole_word(index: &TextIndex, span: Span) -> bool {
    let text = index.normalized();
    let before_ok = span.start == 0
        || is_word_boundary(text[span.start - 1])
        || at_segment_start(index, span.start);
    let after_ok = span.end == text.len()
        || is_word_boundary(text[span.end])
        || at_segment_end(index, span.end - 1);
    before_ok && after_ok
}

fn at_segment_start(index: &TextIndex, normalized: usize) -> bool {
    if index.unit() != UnitMode::SingleUnit {
        return false;
    }
    let offset = index.offset_map()[normalized];
    index.find_owning_segment(offset).is_some_and(|b| b.start == offset)
}

/// Whether the normalized character at `last` is the final one of its segment.
fn at_segment_end(index: &TextIndex, last: usize) -> bool {
    if index.unit() != UnitMode::SingleUnit {
        return false;
    }
    let map = index.offset_map();
    let here = index.segment_index_at(map[last]);
    let next = map.get(last + 1).and_then(|&o| index.segment_index_at(o));
    here != next
}
