//! Result metadata: labels, ids, anchors, filters, and the JSON shape.

use super::common::{sample_corpus, search};
use passim::{Category, CategoryFilter, Language, SearchEvent, SearchOptions, SearchResult};
use serde_json::json;

fn only(categories: &[Category]) -> SearchOptions {
    SearchOptions {
        categories: CategoryFilter::only(categories.iter().copied()),
        ..SearchOptions::default()
    }
}

#[test]
fn test_primary_label_includes_heading() {
    let found = search(&sample_corpus(), "mindfulness", &SearchOptions::default());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].document_id, "mn10");
    assert_eq!(found[0].display_id, "MN10");
    assert_eq!(found[0].label, "Mindfulness Meditation (Satipaṭṭhāna)");
    assert_eq!(found[0].anchor(), "mn10#mn10:3.1-mn10:3.1");
}

#[test]
fn test_secondary_label_is_secondary_title() {
    let options = SearchOptions {
        languages: [Language::Secondary].into_iter().collect(),
        ..SearchOptions::default()
    };
    let found = search(&sample_corpus(), "bhagava", &options);
    let labels: Vec<&str> = found.iter().map(|r| r.label.as_str()).collect();
    #[cfg(feature = "unicode-normalization")]
    assert_eq!(labels, vec!["Brahmajālasutta", "Satipaṭṭhānasutta"]);
    #[cfg(not(feature = "unicode-normalization"))]
    assert!(labels.is_empty());
}

#[test]
fn test_commentary_label_and_markup() {
    let found = search(&sample_corpus(), "net of", &SearchOptions::default());
    assert_eq!(found.len(), 1);
    let result = &found[0];
    assert_eq!(result.label, "The Prime Net - Comments");
    // Empty comment lines are skipped when numbering.
    assert_eq!(result.anchor(), "dn1#comment2");
    assert_eq!(
        result.passage.html,
        "Brahmajāla means the <b>net of</b> Brahmā."
    );
}

#[test]
fn test_category_filter() {
    let corpus = sample_corpus();
    let everything = search(&corpus, "so i have heard", &SearchOptions::default());
    let ids: Vec<&str> = everything.iter().map(|r| r.document_id.as_str()).collect();
    assert_eq!(ids, vec!["dn1", "mn10"]);

    let mn = search(&corpus, "so i have heard", &only(&[Category::Mn]));
    assert_eq!(mn.len(), 1);
    assert_eq!(mn[0].document_id, "mn10");

    assert!(search(&corpus, "so i have heard", &only(&[Category::An, Category::Kn])).is_empty());
}

#[test]
fn test_empty_filter_means_every_category() {
    let corpus = sample_corpus();
    let all = search(&corpus, "the", &only(&[]));
    assert_eq!(all, search(&corpus, "the", &SearchOptions::default()));
}

#[test]
fn test_documents_in_canonical_order() {
    let found = search(&sample_corpus(), "the", &SearchOptions::default());
    let mut ids: Vec<&str> = found.iter().map(|r| r.document_id.as_str()).collect();
    ids.dedup();
    assert_eq!(ids, vec!["dn1", "mn10", "sn1.1"]);
}

#[test]
fn test_result_json_shape() {
    let found = search(&sample_corpus(), "flood", &SearchOptions::default());
    assert_eq!(found.len(), 1);
    let value = serde_json::to_value(SearchEvent::Result(found[0].clone())).unwrap();

    assert_eq!(value["event"], "result");
    assert_eq!(value["documentId"], "sn1.1");
    assert_eq!(value["displayId"], "SN1.1");
    assert_eq!(value["language"], "primary");
    assert_eq!(value["source"], "body");
    assert_eq!(
        value["location"],
        json!({"kind": "verseRange", "start": "sn1.1:1.1", "end": "sn1.1:1.1"})
    );
    assert_eq!(value["passage"]["html"], "Crossing the <b>flood</b>.");
    assert_eq!(value["passage"]["truncatedStart"], false);

    let back: SearchEvent = serde_json::from_value(value).unwrap();
    assert_eq!(back, SearchEvent::Result(found[0].clone()));
}

#[test]
fn test_comment_location_json() {
    let found: Vec<SearchResult> = search(&sample_corpus(), "road between", &SearchOptions::default());
    assert_eq!(found.len(), 1);
    let value = serde_json::to_value(&found[0].location).unwrap();
    assert_eq!(value, json!({"kind": "comment", "ordinal": 1}));
}
