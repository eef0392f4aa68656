//! Matching properties: ordering, strictness, and unit boundaries.

use super::common::build;
use super::{query_strategy, segments_strategy};
use passim::normalize::is_word_boundary;
use passim::{LanguageMode, QueryMatcher, UnitMode};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Matches are the needle, in increasing order, never overlapping.
    #[test]
    fn prop_matches_ordered_and_disjoint(
        texts in segments_strategy(),
        query in query_strategy(),
        strict in any::<bool>(),
    ) {
        let index = build(&texts, LanguageMode::Standard, UnitMode::MultiUnit);
        let matcher = QueryMatcher::new(&query, LanguageMode::Standard, strict);
        let spans = matcher.find_all(&index);

        let needle = if spans.iter().all(|s| &index.normalized()[s.start..s.end] == matcher.needle()) {
            matcher.needle()
        } else {
            matcher.tidied().unwrap_or(matcher.needle())
        };
        for span in &spans {
            prop_assert_eq!(&index.normalized()[span.start..span.end], needle);
        }
        for pair in spans.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start, "overlap: {:?}", pair);
        }
    }

    /// Strict matching keeps a subset of the loose matches, never new ones.
    #[test]
    fn prop_strict_subset_of_loose(
        texts in segments_strategy(),
        query in query_strategy(),
        single in any::<bool>(),
    ) {
        let unit = if single { UnitMode::SingleUnit } else { UnitMode::MultiUnit };
        let index = build(&texts, LanguageMode::Standard, unit);
        let loose = QueryMatcher::new(&query, LanguageMode::Standard, false).find_all(&index);
        let strict = QueryMatcher::new(&query, LanguageMode::Standard, true).find_all(&index);

        prop_assert!(strict.len() <= loose.len());
        for span in &strict {
            prop_assert!(loose.contains(span), "{:?} is strict but not loose", span);
        }
    }

    /// Strict matches sit between word boundaries or text edges.
    #[test]
    fn prop_strict_matches_are_whole_words(
        texts in segments_strategy(),
        query in query_strategy(),
    ) {
        let index = build(&texts, LanguageMode::Standard, UnitMode::MultiUnit);
        let text = index.normalized();
        for span in passim::find_all(&index, &query, true) {
            prop_assert!(span.start == 0 || is_word_boundary(text[span.start - 1]));
            prop_assert!(span.end == text.len() || is_word_boundary(text[span.end]));
        }
    }

    /// In single-unit indexes a match never straddles two segments.
    #[test]
    fn prop_single_unit_matches_stay_in_segment(
        texts in segments_strategy(),
        query in query_strategy(),
        strict in any::<bool>(),
    ) {
        let index = build(&texts, LanguageMode::Standard, UnitMode::SingleUnit);
        let map = index.offset_map();
        for span in passim::find_all(&index, &query, strict) {
            let first = index.segment_index_at(map[span.start]);
            let last = index.segment_index_at(map[span.end - 1]);
            prop_assert!(first.is_some());
            prop_assert_eq!(first, last);
        }
    }

    /// Leftmost non-overlapping matching is maximal, so rejecting seam
    /// matches can only lose results.
    #[test]
    fn prop_single_unit_finds_no_more_than_multi_unit(
        texts in segments_strategy(),
        query in query_strategy(),
    ) {
        let multi = build(&texts, LanguageMode::Standard, UnitMode::MultiUnit);
        let single = build(&texts, LanguageMode::Standard, UnitMode::SingleUnit);
        let multi_count = passim::find_all(&multi, &query, false).len();
        let single_count = passim::find_all(&single, &query, false).len();
        prop_assert!(single_count <= multi_count);
    }
}

#[cfg(feature = "unicode-normalization")]
proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// In the source-language mode a query finds the same places whether or
    /// not it is typed with diacritics.
    #[test]
    fn prop_diacritics_do_not_change_source_matches(
        texts in segments_strategy(),
        query in prop::sample::select(vec!["okāsa", "satiṃ", "ñāṇa", "bhikkhū", "ā"]),
    ) {
        let index = build(&texts, LanguageMode::DiacriticSensitiveSource, UnitMode::MultiUnit);
        let bare = passim::strip_diacritics(query);
        let with = passim::find_all(&index, query, false);
        let without = passim::find_all(&index, &bare, false);
        prop_assert_eq!(with, without);
    }
}
