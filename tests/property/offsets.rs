//! Offset map properties: the bridge between normalized and original text.

use super::common::build;
use super::{query_strategy, segments_strategy};
use passim::normalize::{fold_char, space_token_len};
use passim::{normalize_for_search, LanguageMode, QueryMatcher, Span, UnitMode};
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = LanguageMode> {
    prop_oneof![
        Just(LanguageMode::Standard),
        Just(LanguageMode::DiacriticSensitiveSource),
    ]
}

fn unit_strategy() -> impl Strategy<Value = UnitMode> {
    prop_oneof![Just(UnitMode::MultiUnit), Just(UnitMode::SingleUnit)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// One entry per normalized character, non-decreasing, all in range.
    #[test]
    fn prop_offset_map_shape(
        texts in segments_strategy(),
        mode in mode_strategy(),
        unit in unit_strategy(),
    ) {
        let index = build(&texts, mode, unit);
        let map = index.offset_map();
        prop_assert_eq!(map.len(), index.normalized().len());
        for pair in map.windows(2) {
            prop_assert!(pair[0] <= pair[1], "map decreases: {:?}", pair);
        }
        for &o in map {
            prop_assert!(o < index.original().len());
        }
    }

    /// Every normalized character comes from the original character it maps
    /// to: either its fold, or the space standing in for a whitespace token.
    #[test]
    fn prop_offset_map_points_at_source(
        texts in segments_strategy(),
        mode in mode_strategy(),
    ) {
        let index = build(&texts, mode, UnitMode::MultiUnit);
        let mut folded = String::new();
        for (i, (&n, &o)) in index.normalized().iter().zip(index.offset_map()).enumerate() {
            if n == ' ' {
                prop_assert!(
                    space_token_len(index.original(), o) > 0,
                    "space at {} maps to {:?}", i, index.original()[o]
                );
            } else {
                folded.clear();
                fold_char(index.original()[o], mode, &mut folded);
                prop_assert!(
                    folded.contains(n),
                    "{:?} at {} does not come from {:?}", n, i, index.original()[o]
                );
            }
        }
    }

    /// Normalized text is exactly the normalization of the original.
    #[test]
    fn prop_normalized_matches_normalize_for_search(
        texts in segments_strategy(),
        mode in mode_strategy(),
    ) {
        let index = build(&texts, mode, UnitMode::MultiUnit);
        let original: String = index.original().iter().collect();
        let normalized: String = index.normalized().iter().collect();
        prop_assert_eq!(normalized, normalize_for_search(&original, mode));
    }

    #[test]
    fn prop_normalization_is_idempotent(
        texts in segments_strategy(),
        mode in mode_strategy(),
    ) {
        let text = texts.concat();
        let once = normalize_for_search(&text, mode);
        prop_assert_eq!(normalize_for_search(&once, mode), once);
    }

    /// Mapping a single normalized character out and back lands on the first
    /// normalized character sharing its original offset.
    #[test]
    fn prop_offsets_round_trip(
        texts in segments_strategy(),
        mode in mode_strategy(),
    ) {
        let index = build(&texts, mode, UnitMode::MultiUnit);
        let map = index.offset_map();
        for i in 0..map.len() {
            let back = index.to_normalized_offset(map[i]);
            prop_assert!(back <= i);
            prop_assert_eq!(map[back], map[i]);

            let span = index.to_original_span(Span::new(i, i + 1));
            prop_assert!(span.contains(map[i]), "{:?} misses {}", span, map[i]);
        }
    }

    /// Original spans of matches are non-empty, never start or end on
    /// whitespace, and normalize back to text containing the query.
    #[test]
    fn prop_match_spans_trimmed(
        texts in segments_strategy(),
        query in query_strategy(),
        mode in mode_strategy(),
        unit in unit_strategy(),
    ) {
        let index = build(&texts, mode, unit);
        let matcher = QueryMatcher::new(&query, mode, false);
        let spans = matcher.find_all(&index);
        let literal = spans
            .iter()
            .all(|s| &index.normalized()[s.start..s.end] == matcher.needle());
        let needle: String = if literal {
            matcher.needle().iter().collect()
        } else {
            matcher.tidied().unwrap_or(matcher.needle()).iter().collect()
        };
        for span in spans {
            let original = index.to_original_span(span);
            prop_assert!(!original.is_empty());
            prop_assert!(original.end <= index.original().len());
            prop_assert_eq!(space_token_len(index.original(), original.start), 0);
            prop_assert!(!index.original()[original.end - 1].is_whitespace());
            let slice = index.original_slice(original);
            prop_assert!(
                normalize_for_search(&slice, mode).contains(&needle),
                "{:?} does not cover {:?}", slice, needle
            );
        }
    }
}
