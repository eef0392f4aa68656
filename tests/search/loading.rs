//! Searching corpora and configs loaded from disk.

use passim::{Corpus, PassimError, SearchConfig, SearchOptions, SearchOrchestrator};
use std::io::Write;
use tempfile::NamedTempFile;

const CORPUS: &str = r#"{
    "primary": [
        {
            "id": "an3.65",
            "title": "With the Kālāmas",
            "body": {
                "an3.65:3.2": "Please, Kālāmas, don't go by oral transmission, ",
                "an3.65:3.1": "It is fitting for you to doubt. ",
                "an3.65:3.3": null,
                "an3.65:3.4": "don't go by lineage."
            },
            "commentary": {
                "c1": "",
                "c2": "See [the Kesaputta sutta](https://example.org/an3.65) again."
            }
        }
    ]
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_segment_order_follows_file() {
    let file = write_temp(CORPUS);
    let corpus = Corpus::from_path(file.path()).unwrap();
    let found = SearchOrchestrator::default().search_all(
        &corpus,
        "don't go by",
        &SearchOptions::default(),
    );

    let anchors: Vec<String> = found.iter().map(|r| r.anchor()).collect();
    assert_eq!(
        anchors,
        vec!["an3.65#an3.65:3.2-an3.65:3.2", "an3.65#an3.65:3.4-an3.65:3.4"]
    );
}

#[test]
fn test_link_markup_is_searchable_text() {
    let file = write_temp(CORPUS);
    let corpus = Corpus::from_path(file.path()).unwrap();
    let found =
        SearchOrchestrator::default().search_all(&corpus, "kesaputta", &SearchOptions::default());

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].anchor(), "an3.65#comment1");
    assert_eq!(found[0].label, "With the Kālāmas - Comments");
    assert_eq!(
        found[0].passage.html,
        "See the <b>Kesaputta</b> sutta again."
    );
}

#[test]
fn test_config_file_drives_passages() {
    let corpus = Corpus::from_json_str(CORPUS).unwrap();
    let config_file = write_temp(
        r#"{"primaryWordBudget": 3, "highlightOpen": "<mark>", "highlightClose": "</mark>"}"#,
    );
    let config = SearchConfig::from_path(config_file.path()).unwrap();
    let mut orchestrator = SearchOrchestrator::new(config);

    let found = orchestrator.search_all(&corpus, "doubt", &SearchOptions::default());
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].passage.html,
        "[...] to <mark>doubt</mark>. don't [...]"
    );
}

#[test]
fn test_load_with_explicit_path() {
    let config_file = write_temp(r#"{"maxResultsPerDocument": 1}"#);
    let config = SearchConfig::load(Some(config_file.path())).unwrap();
    assert_eq!(config.max_results_per_document, 1);

    let corpus = Corpus::from_json_str(CORPUS).unwrap();
    let found = SearchOrchestrator::new(config).search_all(&corpus, "go", &SearchOptions::default());
    assert_eq!(found.len(), 1);
}

#[test]
fn test_bad_inputs_are_errors() {
    let corpus = write_temp(r#"{"primary": [{"body": {}}]}"#);
    assert!(matches!(
        Corpus::from_path(corpus.path()),
        Err(PassimError::Json(_))
    ));

    let config = write_temp(r#"{"primaryWordBudget": "many"}"#);
    assert!(matches!(
        SearchConfig::from_path(config.path()),
        Err(PassimError::Config(_))
    ));
}
