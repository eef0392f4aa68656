// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for matching and passage extraction.
//!
//! For any text and query: matches are ordered and disjoint, every passage
//! window encloses its match and stays inside its unit, and every match
//! resolves to a location.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use passim::{resolve, LanguageMode, PassageExtractor, QueryMatcher, Segments, TextIndex, UnitMode};

#[derive(Debug, Arbitrary)]
struct SearchInput {
    segments: Vec<String>,
    query: String,
    budget: u8,
    strict: bool,
    source_language: bool,
    single_unit: bool,
}

fuzz_target!(|input: SearchInput| {
    let segments: Segments = input
        .segments
        .iter()
        .take(16)
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
    let matcher = QueryMatcher::new(&input.query, language, input.strict);
    let spans = matcher.find_all(&index);
    assert!(spans.windows(2).all(|w| w[0].end <= w[1].start));

    let extractor = PassageExtractor::new(input.budget as usize);
    for span in spans.into_iter().take(64) {
        let passage = extractor.extract(&index, span);
        let unit_span = index.unit_span_at(passage.matched.start);
        assert!(passage.window.encloses(&passage.matched));
        assert!(unit_span.encloses(&passage.window));
        assert!(resolve(&index, passage.matched).is_ok());
    }
});
