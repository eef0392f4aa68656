// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text normalization for search.
//!
//! Three separate concerns live here, and they are applied at different times:
//!
//! - **Markup** (`strip_markup`): applied once per segment when building the
//!   original text. Emphasis wrappers and `[label](target)` links become plain
//!   text, runs of line breaks collapse to one. Everything downstream,
//!   highlighting included, sees this cleaned text as "the original".
//! - **Whitespace** (`collapse_whitespace`): whitespace characters, no-break
//!   spaces, HTML space entities and `<br>` tags are all one kind of gap. Runs
//!   collapse to a single ASCII space, ends are trimmed.
//! - **Folding** (`fold_char`): lowercase, and for source-language corpora
//!   strip diacritics:
//!   - "okāsa" → "okasa"
//!   - "satiṃ" → "satim"
//!   - "Ñāṇa" → "nana"
//!
//! `normalize_for_search` composes whitespace collapsing and folding. It is
//! applied to the whole original text and to the query, so both sides agree.

use crate::types::LanguageMode;
use regex::{Captures, Regex};
use std::sync::LazyLock;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::char::{decompose_canonical, is_combining_mark};
#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Punctuation that terminates a word for strict matching.
pub const WORD_BOUNDARY_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', '"', '\'', ')', ']', '}', '-', ':', '/', '(', '[', '{', '“', '”',
    '‘', '’', '—', '–',
];

/// HTML entities that render as a space.
const SPACE_ENTITIES: &[&str] = &[
    "&nbsp;", "&#160;", "&#xa0;", "&ensp;", "&emsp;", "&thinsp;", "&#32;",
];

/// Whitespace or boundary punctuation.
#[inline]
pub fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || WORD_BOUNDARY_PUNCTUATION.contains(&c)
}

/// Length in characters of the whitespace token starting at `at`, or 0.
///
/// A token is a single whitespace character (no-break space included), an
/// HTML space entity such as `&nbsp;`, or a line-break tag (`<br>`, `<br/>`,
/// `<br />`, any case).
pub fn space_token_len(chars: &[char], at: usize) -> usize {
    let Some(&c) = chars.get(at) else {
        return 0;
    };
    if c.is_whitespace() {
        return 1;
    }
    match c {
        '&' => SPACE_ENTITIES
            .iter()
            .find(|entity| starts_with_ignore_ascii_case(&chars[at..], entity))
            .map_or(0, |entity| entity.len()),
        '<' => line_break_len(&chars[at..]),
        _ => 0,
    }
}

fn starts_with_ignore_ascii_case(chars: &[char], pattern: &str) -> bool {
    let mut i = 0;
    for p in pattern.chars() {
        match chars.get(i) {
            Some(c) if c.eq_ignore_ascii_case(&p) => i += 1,
            _ => return false,
        }
    }
    true
}

/// Length of a `<br>` / `<br/>` / `<br />` tag at the start of `chars`, or 0.
fn line_break_len(chars: &[char]) -> usize {
    if chars.len() < 4
        || chars[0] != '<'
        || !chars[1].eq_ignore_ascii_case(&'b')
        || !chars[2].eq_ignore_ascii_case(&'r')
    {
        return 0;
    }
    let mut i = 3;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if chars.get(i) == Some(&'/') {
        i += 1;
    }
    if chars.get(i) == Some(&'>') {
        i + 1
    } else {
        0
    }
}

/// Map every whitespace token to one ASCII space, collapse runs, trim ends.
pub fn collapse_whitespace(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut pending_space = false;
    let mut i = 0;
    while i < chars.len() {
        let token = space_token_len(&chars, i);
        if token > 0 {
            pending_space = true;
            i += token;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Remove diacritics: canonical decomposition, then drop combining marks.
///
/// The result stays decomposed; it is only ever compared, never displayed.
#[cfg(feature = "unicode-normalization")]
pub fn strip_diacritics(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Without unicode-normalization there is nothing to decompose with.
/// Assumes input is ASCII or pre-normalized.
#[cfg(not(feature = "unicode-normalization"))]
pub fn strip_diacritics(value: &str) -> String {
    value.to_string()
}

/// Fold one original character into its search form, appending to `out`.
///
/// Usually one character in, one out. Zero when the character is a bare
/// combining mark being stripped, more than one when lowercasing expands
/// (`İ` → `i̇`).
#[cfg(feature = "unicode-normalization")]
pub fn fold_char(c: char, language: LanguageMode, out: &mut String) {
    if language.strips_diacritics() {
        decompose_canonical(c, |d| {
            if !is_combining_mark(d) {
                out.extend(d.to_lowercase());
            }
        });
    } else {
        out.extend(c.to_lowercase());
    }
}

#[cfg(not(feature = "unicode-normalization"))]
pub fn fold_char(c: char, _language: LanguageMode, out: &mut String) {
    out.extend(c.to_lowercase());
}

/// Normalize text into the search space: collapse whitespace, then fold.
pub fn normalize_for_search(value: &str, language: LanguageMode) -> String {
    let collapsed = collapse_whitespace(value);
    let mut out = String::with_capacity(collapsed.len());
    for c in collapsed.chars() {
        fold_char(c, language, &mut out);
    }
    out
}

static LINE_BREAK_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>\s*(?:<br\s*/?>\s*)+").expect("line break pattern is valid")
});

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));

// The leading group stands in for a lookbehind: emphasis only opens after a
// non-alphanumeric character, so `snake_case_name` survives.
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(^|[^\p{L}\p{N}])(?:\*\*([^*]+)\*\*|__([^_]+)__|\*([^*\s][^*]*)\*|_([^_\s][^_]*)_)",
    )
    .expect("emphasis pattern is valid")
});

/// Remove inline markup the reader never sees.
///
/// - `<br><br/>` (any run of line breaks) → `<br/>`
/// - `[label](target)` → `label`
/// - `*text*`, `_text_`, `**text**`, `__text__` → `text`
pub fn strip_markup(value: &str) -> String {
    let text = LINE_BREAK_RUN.replace_all(value, "<br/>");
    let text = LINK.replace_all(&text, "$1");
    let text = EMPHASIS.replace_all(&text, |caps: &Captures| {
        let inner = (2..=5)
            .find_map(|i| caps.get(i))
            .map_or("", |m| m.as_str());
        format!("{}{}", &caps[1], inner)
    });
    text.into_owned()
}

static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.!?])").expect("punctuation pattern is valid"));

static HYPHEN_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-\s*").expect("hyphen pattern is valid"));

/// Tidy a user query so it fits on one line and hugs its punctuation.
///
/// Line breaks and whitespace runs become single spaces, ends are trimmed,
/// spaces before `, . ! ?` are dropped and hyphens lose their surrounding
/// spaces (`"self - control"` → `"self-control"`).
pub fn clean_query(query: &str) -> String {
    let collapsed = query.split_whitespace().collect::<Vec<_>>().join(" ");
    let text = SPACE_BEFORE_PUNCTUATION.replace_all(&collapsed, "$1");
    HYPHEN_SPACING.replace_all(&text, "-").into_owned()
}
