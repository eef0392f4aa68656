// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word-budgeted passages around a match.
//!
//! Given a normalized match span, the extractor works entirely in original
//! space:
//!
//! 1. Translate the match to original offsets.
//! 2. Snap outwards to whole words (whitespace delimited, so attached
//!    punctuation stays with its word).
//! 3. Grow the window word by word to roughly `word_budget` words, centred on
//!    the match. If one side runs out of text, the other side gets the surplus.
//!    A match longer than the budget becomes the whole window.
//! 4. Mark `[...] ` / ` [...]` where text was left out on that side.
//!
//! The unit a window may draw from is the whole document in `MultiUnit` mode
//! and the owning segment in `SingleUnit` mode. Both the window and the
//! ellipsis decision stay inside it.

use crate::index::TextIndex;
use crate::normalize::strip_markup;
use crate::types::{Span, UnitMode};
use serde::{Deserialize, Serialize};

pub const ELLIPSIS_START: &str = "[...] ";
pub const ELLIPSIS_END: &str = " [...]";

/// Markers wrapped around the matched text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub open: String,
    pub close: String,
}

impl Default for Highlight {
    fn default() -> Self {
        Highlight {
            open: "<b>".to_string(),
            close: "</b>".to_string(),
        }
    }
}

/// An extracted passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passage {
    /// Window text with the match highlighted and ellipses where truncated.
    pub html: String,
    /// Window in original offsets.
    pub window: Span,
    /// Matched text in original offsets.
    pub matched: Span,
    pub truncated_start: bool,
    pub truncated_end: bool,
    /// Words in the window.
    pub words: usize,
}

#[derive(Debug, Clone)]
pub struct PassageExtractor {
    word_budget: usize,
    highlight: Highlight,
}

impl PassageExtractor {
    pub fn new(word_budget: usize) -> Self {
        PassageExtractor {
            word_budget,
            highlight: Highlight::default(),
        }
    }

    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn word_budget(&self) -> usize {
        self.word_budget
    }

    /// Extract the passage for one normalized match span.
    pub fn extract(&self, index: &TextIndex, matched: Span) -> Passage {
        let mut matched = index.to_original_span(matched);
        let unit = index.unit_span_at(matched.start);
        matched.end = matched.end.min(unit.end).max(matched.start);

        let (window, words) = self.window(index, unit, matched);
        let truncated_start = index.has_text(Span::new(unit.start, window.start));
        let truncated_end = index.has_text(Span::new(window.end, unit.end));

        let mut before = index.original_slice(Span::new(window.start, matched.start));
        let mut body = index.original_slice(matched);
        let mut after = index.original_slice(Span::new(matched.end, window.end));
        if index.unit() == UnitMode::SingleUnit {
            before = strip_markup(&before);
            body = strip_markup(&body);
            after = strip_markup(&after);
        }

        let mut html = String::with_capacity(
            before.len() + body.len() + after.len() + ELLIPSIS_START.len() * 2 + 16,
        );
        if truncated_start {
            html.push_str(ELLIPSIS_START);
        }
        html.push_str(&before);
        html.push_str(&self.highlight.open);
        html.push_str(&body);
        html.push_str(&self.highlight.close);
        html.push_str(&after);
        if truncated_end {
            html.push_str(ELLIPSIS_END);
        }

        let passage = Passage {
            html,
            window,
            matched,
            truncated_start,
            truncated_end,
            words,
        };
        crate::contracts::check_passage_within_unit(&passage, unit);
        passage
    }

    /// Window around `matched` and the number of words it holds.
    fn window(&self, index: &TextIndex, unit: Span, matched: Span) -> (Span, usize) {
        let range = index.words_in(unit);
        let words = &index.words()[range];

        // Words touched by the match.
        let first = words.partition_point(|w| w.end <= matched.start);
        let last_excl = words.partition_point(|w| w.start < matched.end);
        if first >= last_excl {
            return (matched, 0);
        }
        let last = last_excl - 1;
        let match_words = last_excl - first;

        if match_words > self.word_budget {
            return (matched, match_words);
        }

        let remaining = self.word_budget - match_words;
        let available_before = first;
        let available_after = words.len() - 1 - last;
        let (take_before, take_after) = split_budget(remaining, available_before, available_after);

        let start = words[first - take_before].start.min(matched.start);
        let end = words[last + take_after].end.max(matched.end);
        (
            Span::new(start, end),
            match_words + take_before + take_after,
        )
    }
}

/// Split `remaining` words between the two sides, roughly evenly, shifting
/// what one side cannot use to the other.
fn split_budget(remaining: usize, available_before: usize, available_after: usize) -> (usize, usize) {
    let mut before = remaining / 2;
    let mut after = remaining - before;
    if before > available_before {
        after += before - available_before;
        before = available_before;
    }
    if after > available_after {
        before = (before + after - available_after).min(available_before);
        after = available_after;
    }
    (before, after)
}
