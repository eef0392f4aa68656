// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-document text index: original text, normalized text, and the map between them.
//!
//! A `TextIndex` is built once per (document part, language mode). Matching
//! happens in the normalized space; everything the reader sees (highlighting,
//! window edges, locations) happens in the original space. The offset map is
//! the bridge.
//!
//! ```text
//! original:   T h e ␣ ␣ o k ā s a
//!             0 1 2 3 4 5 6 7 8 9
//! normalized: t h e ␣ o k a s a
//! offset_map: 0 1 2 3 5 6 7 8 9
//! ```
//!
//! # Offset map invariants
//!
//! - One entry per normalized character, each a valid original offset.
//! - Non-decreasing. Strictly increasing except where folding one original
//!   character yields several normalized ones (`İ` lowercases to two chars,
//!   Hangul syllables decompose to jamo); those share an entry.
//! - `fold(original[map[i]])` contains `normalized[i]`, or `normalized[i]` is
//!   the space standing in for a whitespace run starting at `map[i]`.
//!
//! Alignment never fails. If the walk hits a character it cannot account for,
//! it skips the original character and carries on.

use crate::normalize::{fold_char, normalize_for_search, space_token_len, strip_markup};
use crate::types::{
    find_segment_at_offset, find_segment_index_at_offset, LanguageMode, SegmentBound, Segments,
    Span, UnitMode,
};
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct TextIndex {
    language: LanguageMode,
    unit: UnitMode,
    original: Vec<char>,
    normalized: Vec<char>,
    offset_map: Vec<usize>,
    bounds: Vec<SegmentBound>,
    /// Whitespace-delimited words in original space. In `SingleUnit` mode
    /// words are also cut at segment edges.
    words: Vec<Span>,
}

impl TextIndex {
    /// Build an index over `segments` in document order.
    pub fn build(segments: &Segments, language: LanguageMode, unit: UnitMode) -> Self {
        let mut original: Vec<char> = Vec::new();
        let mut bounds = Vec::with_capacity(segments.len());
        let mut ordinal = 0;

        for (key, text) in segments.iter() {
            // Numbering counts segments that have text at all; a segment whose
            // markup strips to nothing still counts.
            if !text.is_empty() {
                ordinal += 1;
            }
            let start = original.len();
            original.extend(strip_markup(text).chars());
            bounds.push(SegmentBound {
                key: key.to_string(),
                start,
                end: original.len(),
                ordinal,
            });
        }

        let original_string: String = original.iter().collect();
        let normalized: Vec<char> = normalize_for_search(&original_string, language)
            .chars()
            .collect();
        let offset_map = align_offsets(&original, &normalized, language);

        let words = match unit {
            UnitMode::MultiUnit => collect_words(&original, Span::new(0, original.len())),
            UnitMode::SingleUnit => bounds
                .iter()
                .flat_map(|b| collect_words(&original, b.span()))
                .collect(),
        };

        let index = TextIndex {
            language,
            unit,
            original,
            normalized,
            offset_map,
            bounds,
            words,
        };
        crate::contracts::check_index_well_formed(&index);
        index
    }

    pub fn language(&self) -> LanguageMode {
        self.language
    }

    pub fn unit(&self) -> UnitMode {
        self.unit
    }

    pub fn original(&self) -> &[char] {
        &self.original
    }

    pub fn normalized(&self) -> &[char] {
        &self.normalized
    }

    pub fn offset_map(&self) -> &[usize] {
        &self.offset_map
    }

    pub fn bounds(&self) -> &[SegmentBound] {
        &self.bounds
    }

    pub fn words(&self) -> &[Span] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Original text in `span` as a string.
    pub fn original_slice(&self, span: Span) -> String {
        self.original[span.start..span.end].iter().collect()
    }

    /// Map a normalized span to the original characters it came from.
    ///
    /// The start is the original offset of the first matched character. The
    /// end runs up to the next mapped character, so trailing characters that
    /// folded to nothing (a decomposed combining mark) stay with the match,
    /// but never past the end of the segment owning the last matched
    /// character, and never into a whitespace token.
    pub fn to_original_span(&self, span: Span) -> Span {
        let len = self.original.len();
        if span.is_empty() || span.start >= self.offset_map.len() {
            let at = self.offset_map.get(span.start).copied().unwrap_or(len);
            return Span::new(at, at);
        }

        let start = self.offset_map[span.start];
        let last = self.offset_map[span.end.min(self.offset_map.len()) - 1];
        let mut limit = self.offset_map.get(span.end).copied().unwrap_or(len);
        if let Some(owner) = find_segment_at_offset(&self.bounds, last) {
            limit = limit.min(owner.end);
        }

        let mut end = last + 1;
        while end < limit && space_token_len(&self.original, end) == 0 {
            end += 1;
        }

        Span::new(start, end)
    }

    /// First normalized offset whose original offset is at or after `offset`.
    pub fn to_normalized_offset(&self, offset: usize) -> usize {
        self.offset_map.partition_point(|&o| o < offset)
    }

    /// The segment owning an original offset.
    pub fn find_owning_segment(&self, offset: usize) -> Option<&SegmentBound> {
        find_segment_at_offset(&self.bounds, offset)
    }

    pub fn segment_index_at(&self, offset: usize) -> Option<usize> {
        find_segment_index_at_offset(&self.bounds, offset)
    }

    /// 1-based count of non-empty segments up to and including `key`.
    pub fn ordinal_of(&self, key: &str) -> Option<usize> {
        self.bounds.iter().find(|b| b.key == key).map(|b| b.ordinal)
    }

    /// The span a passage around `offset` may draw from: the whole text in
    /// `MultiUnit` mode, the owning segment in `SingleUnit` mode.
    pub fn unit_span_at(&self, offset: usize) -> Span {
        let whole = Span::new(0, self.original.len());
        match self.unit {
            UnitMode::MultiUnit => whole,
            UnitMode::SingleUnit => self.find_owning_segment(offset).map_or(whole, |b| b.span()),
        }
    }

    /// Indices into `words()` of the words lying inside `unit`.
    pub fn words_in(&self, unit: Span) -> Range<usize> {
        let first = self.words.partition_point(|w| w.start < unit.start);
        let last = self.words.partition_point(|w| w.end <= unit.end);
        first..last.max(first)
    }

    /// True if `span` holds anything other than whitespace tokens.
    pub fn has_text(&self, span: Span) -> bool {
        let mut i = span.start;
        while i < span.end {
            let token = space_token_len(&self.original, i);
            if token == 0 {
                return true;
            }
            i += token;
        }
        false
    }
}

/// Two-pointer walk pairing each normalized character with its original offset.
fn align_offsets(original: &[char], normalized: &[char], language: LanguageMode) -> Vec<usize> {
    let mut map = Vec::with_capacity(normalized.len());
    let mut folded = String::new();
    let mut o = 0;
    let mut n = 0;

    while n < normalized.len() {
        if o >= original.len() {
            // Original exhausted with normalized text left over: pin the rest
            // to the last original character.
            map.push(original.len().saturating_sub(1));
            n += 1;
            continue;
        }

        let token = space_token_len(original, o);
        if token > 0 {
            if normalized[n] == ' ' {
                map.push(o);
                n += 1;
                o += token;
                loop {
                    let next = space_token_len(original, o);
                    if next == 0 {
                        break;
                    }
                    o += next;
                }
            } else {
                // Leading whitespace trimmed away by collapsing.
                o += token;
            }
            continue;
        }

        folded.clear();
        fold_char(original[o], language, &mut folded);
        let width = folded.chars().count();
        if width > 0
            && n + width <= normalized.len()
            && folded.chars().zip(&normalized[n..]).all(|(a, &b)| a == b)
        {
            map.extend(std::iter::repeat(o).take(width));
            n += width;
        }
        // Either consumed, folded to nothing, or drift: move on.
        o += 1;
    }

    map
}

/// Words in `within`: maximal runs of non-whitespace characters.
fn collect_words(original: &[char], within: Span) -> Vec<Span> {
    let mut words = Vec::new();
    let mut i = within.start;
    let mut word_start: Option<usize> = None;

    while i < within.end {
        let token = space_token_len(original, i);
        if token > 0 {
            if let Some(start) = word_start.take() {
                words.push(Span::new(start, i));
            }
            i = (i + token).min(within.end);
        } else {
            word_start.get_or_insert(i);
            i += 1;
        }
    }
    if let Some(start) = word_start {
        words.push(Span::new(start, within.end));
    }
    words
}
