//! End-to-end scenarios: one corpus, one query, one expected result list.

use super::common::{long_verse, sample_commentary, sample_verses, search, segments, single_document};
use passim::{Language, Location, ResultSource, SearchConfig, SearchOptions, SearchOrchestrator};

fn primary_only() -> SearchOptions {
    SearchOptions {
        languages: [Language::Primary].into_iter().collect(),
        ..SearchOptions::default()
    }
}

#[test]
fn test_one_result_per_verse() {
    let corpus = single_document("doc1", sample_verses(), None);
    let found = search(&corpus, "training", &SearchOptions::default());

    assert_eq!(found.len(), 2);
    assert_eq!(
        found[0].location,
        Location::VerseRange {
            start: "v1".to_string(),
            end: "v1".to_string()
        }
    );
    assert_eq!(found[1].location.to_string(), "v2-v2");
    for result in &found {
        assert!(result.passage.html.contains("<b>training</b>"));
        assert_eq!(result.source, ResultSource::Body);
        assert_eq!(result.language, Language::Primary);
    }
}

#[test]
fn test_strict_partial_word_finds_nothing() {
    let corpus = single_document("doc1", sample_verses(), None);
    let options = SearchOptions {
        strict: true,
        ..SearchOptions::default()
    };
    assert!(search(&corpus, "train", &options).is_empty());
    assert_eq!(search(&corpus, "training", &options).len(), 2);
    assert_eq!(search(&corpus, "train", &SearchOptions::default()).len(), 2);
}

#[cfg(feature = "unicode-normalization")]
#[test]
fn test_source_language_ignores_diacritics() {
    use passim::{Corpus, Document};

    let mut doc = Document::new("mn1", segments(&[("mn1:1.1", "Idha bhikkhu okāsa labhati.")]));
    doc.secondary_title = Some("Mūlapariyāyasutta".to_string());
    let corpus = Corpus {
        primary: vec![],
        secondary: vec![doc],
    };

    let found = search(&corpus, "okasa", &SearchOptions::default());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].language, Language::Secondary);
    assert!(found[0].passage.html.contains("<b>okāsa</b>"));
    assert_eq!(found[0].label, "Mūlapariyāyasutta");

    // Typing the diacritic finds the same place.
    assert_eq!(search(&corpus, "okāsa", &SearchOptions::default()), found);
}

#[test]
fn test_primary_language_keeps_diacritics() {
    let corpus = single_document("doc1", segments(&[("v1", "The word okāsa means room.")]), None);
    assert!(search(&corpus, "okasa", &SearchOptions::default()).is_empty());
    assert_eq!(search(&corpus, "okāsa", &SearchOptions::default()).len(), 1);
}

#[test]
fn test_commentary_single_result() {
    let corpus = single_document(
        "doc1",
        segments(&[("v1", "Nothing to see in the body.")]),
        Some(sample_commentary()),
    );
    let options = SearchOptions {
        single_result_per_document: true,
        ..primary_only()
    };

    let found = search(&corpus, "comment", &options);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].source, ResultSource::Commentary);
    assert_eq!(found[0].location, Location::Comment { ordinal: 1 });
    assert_eq!(found[0].label, "Unknown Title - Comments");
    assert_eq!(found[0].anchor(), "doc1#comment1");
    assert_eq!(found[0].passage.html, "first <b>comment</b>");
}

#[test]
fn test_commentary_passage_stays_in_its_comment() {
    let corpus = single_document("doc1", sample_verses(), Some(sample_commentary()));
    let found = search(&corpus, "about", &primary_only());

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location, Location::Comment { ordinal: 2 });
    assert_eq!(found[0].passage.html, "second comment <b>about</b> training");
}

#[test]
fn test_body_results_come_before_commentary() {
    let corpus = single_document("doc1", sample_verses(), Some(sample_commentary()));
    let found = search(&corpus, "training", &primary_only());

    let sources: Vec<ResultSource> = found.iter().map(|r| r.source).collect();
    assert_eq!(
        sources,
        vec![
            ResultSource::Body,
            ResultSource::Body,
            ResultSource::Commentary
        ]
    );
}

#[test]
fn test_query_longer_than_budget_is_exact() {
    let corpus = single_document("doc1", long_verse(), None);
    let mut orchestrator = SearchOrchestrator::new(SearchConfig {
        primary_word_budget: 2,
        ..SearchConfig::default()
    });

    let found = orchestrator.search_all(&corpus, "four five six", &primary_only());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].passage.html, "[...] <b>four five six</b> [...]");
    assert_eq!(found[0].passage.window, found[0].passage.matched);
    assert_eq!(found[0].location.to_string(), "v1-v2");
}

#[test]
fn test_match_spanning_verses_reports_range() {
    let corpus = single_document("doc1", long_verse(), None);
    let found = search(&corpus, "eight nine", &SearchOptions::default());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location.to_string(), "v2-v3");
    assert_eq!(found[0].anchor(), "doc1#v2-v3");
}

#[test]
fn test_query_with_line_breaks_and_spacing() {
    let corpus = single_document("doc1", sample_verses(), None);
    let found = search(&corpus, "  training \n is   hard . ", &SearchOptions::default());
    assert_eq!(found.len(), 1);
    assert!(found[0].passage.html.contains("<b>training is hard.</b>"));
}

#[test]
fn test_spaced_punctuation_found_as_written() {
    let verses = segments(&[
        ("v1", "the practice of self - control is hard"),
        ("v2", " he said , thus"),
    ]);
    let corpus = single_document("doc1", verses, None);

    let found = search(&corpus, "self - control", &SearchOptions::default());
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].passage.html,
        "the practice of <b>self - control</b> is hard he said , thus"
    );

    let found = search(&corpus, "said , thus", &SearchOptions::default());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location.to_string(), "v2-v2");
}

#[test]
fn test_repeated_word_reported_separately() {
    let corpus = single_document("doc1", segments(&[("v1", "go go go")]), None);
    let found = search(&corpus, "go", &SearchOptions::default());
    assert_eq!(found.len(), 3);
    assert_eq!(found[0].passage.html, "<b>go</b> go go");
    assert_eq!(found[2].passage.html, "go go <b>go</b>");
}
