// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for offset alignment.
//!
//! Arbitrary segment text (markup, entities, combining marks, whatever the
//! fuzzer finds) must always produce a well-formed index: one offset per
//! normalized character, non-decreasing, in range, and segment bounds that
//! partition the original text.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use passim::{validate_segment_bounds, LanguageMode, Segments, Span, TextIndex, UnitMode};

#[derive(Debug, Arbitrary)]
struct IndexInput {
    segments: Vec<String>,
    source_language: bool,
    single_unit: bool,
}

fuzz_target!(|input: IndexInput| {
    let segments: Segments = input
        .segments
        .iter()
        .take(32)
        .enumerate()
        .map(|(i, text)| (format!("s{}", i), text.clone()))
        .collect();
    let language = if input.source_language {
        LanguageMode::DiacriticSensitiveSource
    } else {
        LanguageMode::Standard
    };
    let unit = if input.single_unit {
        UnitMode::SingleUnit
    } else {
        UnitMode::MultiUnit
    };

    let index = TextIndex::build(&segments, language, unit);
    let original_len = index.original().len();
    let map = index.offset_map();

    assert_eq!(map.len(), index.normalized().len());
    assert!(map.windows(2).all(|w| w[0] <= w[1]), "offset map decreases");
    assert!(map.iter().all(|&o| o < original_len), "offset out of range");
    assert!(validate_segment_bounds(index.bounds(), original_len).is_ok());

    // Every single-character span maps back onto its own original offset.
    for i in 0..map.len() {
        let span = index.to_original_span(Span::new(i, i + 1));
        assert!(span.contains(map[i]), "{:?} misses {}", span, map[i]);
        assert!(span.end <= original_len);
    }
});
