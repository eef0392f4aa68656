// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the index, the matcher and the extractor.
//!
//! Debug-mode assertions over the invariants everything else leans on. They
//! are **zero-cost in release builds** (`debug_assert!`) and fail loudly in
//! tests and development.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract function            | Invariant                                            |
//! |------------------------------|------------------------------------------------------|
//! | `check_offset_map`           | one entry per normalized char, in range, non-decreasing |
//! | `check_segment_partition`    | segment bounds partition the original text           |
//! | `check_index_well_formed`    | both of the above, plus words inside their units     |
//! | `check_matches_ordered`      | match spans in range, increasing, non-overlapping    |
//! | `check_passage_within_unit`  | match inside window, window inside unit              |

use crate::index::TextIndex;
use crate::passage::Passage;
use crate::types::{validate_segment_bounds, SegmentBound, Span, UnitMode};

// ============================================================================
// INDEX CONTRACTS
// ============================================================================

/// Check the normalized → original offset map.
///
/// # Panics (debug builds only)
/// Panics if the map length differs from the normalized length, if an entry
/// points past the original text, or if the map ever decreases.
#[inline]
pub fn check_offset_map(map: &[usize], normalized_len: usize, original_len: usize) {
    debug_assert_eq!(
        map.len(),
        normalized_len,
        "Contract violation: offset map has {} entries for {} normalized chars",
        map.len(),
        normalized_len
    );

    for (i, &offset) in map.iter().enumerate() {
        debug_assert!(
            offset < original_len,
            "Contract violation: offset_map[{}] = {} >= original length {}",
            i,
            offset,
            original_len
        );
    }

    for i in 1..map.len() {
        debug_assert!(
            map[i - 1] <= map[i],
            "Contract violation: offset map decreases at {}: {} > {}",
            i,
            map[i - 1],
            map[i]
        );
    }
}

/// Check that segment bounds partition `[0, original_len)` and that ordinals
/// never decrease.
#[inline]
pub fn check_segment_partition(bounds: &[SegmentBound], original_len: usize) {
    let partition = validate_segment_bounds(bounds, original_len);
    debug_assert!(
        partition.is_ok(),
        "Contract violation: {}",
        partition.clone().err().unwrap_or_default()
    );
    for i in 1..bounds.len() {
        debug_assert!(
            bounds[i - 1].ordinal <= bounds[i].ordinal,
            "Contract violation: ordinal of '{}' ({}) below ordinal of '{}' ({})",
            bounds[i].key,
            bounds[i].ordinal,
            bounds[i - 1].key,
            bounds[i - 1].ordinal
        );
    }
}

/// Check every structural invariant of a built index.
#[inline]
pub fn check_index_well_formed(index: &TextIndex) {
    let original_len = index.original().len();
    check_offset_map(index.offset_map(), index.normalized().len(), original_len);
    check_segment_partition(index.bounds(), original_len);

    for (i, word) in index.words().iter().enumerate() {
        debug_assert!(
            !word.is_empty() && word.end <= original_len,
            "Contract violation: word {} {:?} is empty or out of range",
            i,
            word
        );
        if index.unit() == UnitMode::SingleUnit && !word.is_empty() {
            let unit = index.unit_span_at(word.start);
            debug_assert!(
                unit.encloses(word),
                "Contract violation: word {:?} crosses its segment {:?}",
                word,
                unit
            );
        }
    }
}

// ============================================================================
// MATCH CONTRACTS
// ============================================================================

/// Check that match spans are non-empty, in range, strictly increasing and
/// non-overlapping.
#[inline]
pub fn check_matches_ordered(spans: &[Span], normalized_len: usize) {
    for (i, span) in spans.iter().enumerate() {
        debug_assert!(
            !span.is_empty() && span.end <= normalized_len,
            "Contract violation: match {} {:?} empty or past normalized length {}",
            i,
            span,
            normalized_len
        );
    }
    for i in 1..spans.len() {
        debug_assert!(
            spans[i - 1].end <= spans[i].start,
            "Contract violation: matches {:?} and {:?} overlap or are out of order",
            spans[i - 1],
            spans[i]
        );
    }
}

// ============================================================================
// PASSAGE CONTRACTS
// ============================================================================

/// Check that a passage's match sits inside its window and its window inside
/// the unit it was drawn from.
#[inline]
pub fn check_passage_within_unit(passage: &Passage, unit: Span) {
    debug_assert!(
        passage.window.encloses(&passage.matched),
        "Contract violation: match {:?} outside window {:?}",
        passage.matched,
        passage.window
    );
    debug_assert!(
        unit.encloses(&passage.window),
        "Contract violation: window {:?} outside unit {:?}",
        passage.window,
        unit
    );
}
