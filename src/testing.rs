//! Test fixtures shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::corpus::{Corpus, Document};
use crate::types::Segments;

/// Build segments from `(key, text)` pairs.
pub fn segments(pairs: &[(&str, &str)]) -> Segments {
    pairs.iter().copied().collect()
}

/// Two short verses, `v1` and `v2`, each containing "training" once.
pub fn sample_verses() -> Segments {
    segments(&[
        ("v1", "The training is hard."),
        ("v2", "He continues training daily."),
    ])
}

/// Two comment lines, `c1` and `c2`, both containing "comment".
pub fn sample_commentary() -> Segments {
    segments(&[
        ("c1", "first comment"),
        ("c2", "second comment about training"),
    ])
}

/// Twelve number words over three verses: "one two ... twelve".
pub fn long_verse() -> Segments {
    segments(&[
        ("v1", "one two three four"),
        ("v2", " five six seven eight"),
        ("v3", " nine ten eleven twelve"),
    ])
}

/// A verse document of `verses` segments cycling through `words`.
pub fn synthetic_document(id: &str, verses: usize, words: &[&str]) -> Document {
    let body = (0..verses)
        .map(|i| {
            let text: Vec<&str> = (0..12).map(|j| words[(i * 7 + j) % words.len()]).collect();
            (format!("{}:{}", id, i + 1), format!("{} ", text.join(" ")))
        })
        .collect();
    Document::new(id, body).with_title(format!("Synthetic {}", id))
}

/// Corpus with a single primary document whose body is `sample_verses`.
pub fn scenario_corpus() -> Corpus {
    Corpus {
        primary: vec![Document::new("doc1", sample_verses()).with_title("Training")],
        secondary: vec![],
    }
}

/// A small two-language corpus in the shape of a real sutta collection.
pub fn sample_corpus() -> Corpus {
    let dn1 = Document::new(
        "dn1",
        segments(&[
            ("dn1:1.1", "So I have heard. "),
            (
                "dn1:1.2",
                "At one time the Buddha was travelling along the main road. ",
            ),
        ]),
    )
    .with_title("The Prime Net")
    .with_commentary(segments(&[
        ("c1", "The main road between Rājagaha and Nālandā."),
        ("c2", ""),
        ("c3", "*Brahmajāla* means the net of Brahmā."),
    ]));

    let mn10 = Document::new(
        "mn10",
        segments(&[
            ("mn10:1.1", "So I have heard. "),
            (
                "mn10:2.1",
                "There the Buddha addressed the mendicants: “Mendicants!” ",
            ),
            (
                "mn10:3.1",
                "A mendicant sits down, sets up mindfulness in their presence. ",
            ),
        ]),
    )
    .with_title("Mindfulness Meditation")
    .with_heading("Satipaṭṭhāna");

    let sn1 = Document::new("sn1.1", segments(&[("sn1.1:1.1", "Crossing the flood. ")]))
        .with_title("Crossing the Flood");

    let mut dn1_source = Document::new(
        "dn1",
        segments(&[(
            "dn1:1.1",
            "Evaṃ me sutaṃ—ekaṃ samayaṃ bhagavā antarā ca rājagahaṃ antarā ca nāḷandaṃ addhānamaggappaṭipanno hoti. ",
        )]),
    );
    dn1_source.secondary_title = Some("Brahmajālasutta".to_string());

    let mut mn10_source = Document::new(
        "mn10",
        segments(&[
            ("mn10:1.1", "Evaṃ me sutaṃ—"),
            ("mn10:2.1", "tatra kho bhagavā bhikkhū āmantesi: “bhikkhavo”ti. "),
        ]),
    );
    mn10_source.secondary_title = Some("Satipaṭṭhānasutta".to_string());

    Corpus {
        primary: vec![sn1, mn10, dn1],
        secondary: vec![mn10_source, dn1_source],
    }
}
