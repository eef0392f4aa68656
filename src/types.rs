// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a passage search.
//!
//! These types describe how a document's segments, their offsets in the
//! concatenated text, and the locations we hand back to callers fit together.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Span**: `start <= end`. Spans are half-open and measured in characters
//!   (Unicode scalar values), never bytes.
//!
//! - **SegmentBound**: `start <= end`. Empty segments are allowed and have
//!   `start == end`; they own no offsets.
//!
//! - **Segment bounds list**: sorted by `start`, contiguous, first starts at 0
//!   and last ends at the text length. Every offset in `[0, len)` is owned by
//!   exactly one non-empty segment.
//!
//! Use `validate_segment_bounds` (or the debug checks in `contracts`) rather
//! than trusting yourself to remember these.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

// =============================================================================
// MODES
// =============================================================================

/// How text is folded before comparison.
///
/// `DiacriticSensitiveSource` is for source-language corpora (Pali and friends)
/// where users routinely type `okasa` for `okāsa`. Diacritics are stripped from
/// both sides for matching; highlighting still works on the original text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LanguageMode {
    #[default]
    Standard,
    DiacriticSensitiveSource,
}

impl LanguageMode {
    /// Whether diacritics are removed before comparison.
    #[inline]
    pub fn strips_diacritics(self) -> bool {
        matches!(self, LanguageMode::DiacriticSensitiveSource)
    }
}

/// Whether passages may flow across segment boundaries.
///
/// Verse-style bodies are `MultiUnit`: the whole document is one search space.
/// Commentary is `SingleUnit`: a match and its window stay inside one comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitMode {
    #[default]
    MultiUnit,
    SingleUnit,
}

// =============================================================================
// SPANS
// =============================================================================

/// A half-open character range `[start, end)`.
///
/// Used for both normalized-space and original-space ranges; which space a span
/// lives in is always clear from the function returning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} > end {}", start, end);
        Span { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// True if `other` lies entirely inside this span.
    #[inline]
    pub fn encloses(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// =============================================================================
// SEGMENTS
// =============================================================================

/// An ordered collection of named segments (verse id → text, comment id → text).
///
/// Order is insertion order, which is document order. Keys are unique: pushing
/// an existing key replaces its text in place, the same way assigning to an
/// existing key of a JSON object keeps its position.
///
/// Serializes as a JSON object. Deserialization keeps the object's key order.
#[derive(Debug, Clone, Default)]
pub struct Segments {
    entries: Vec<(String, String)>,
    /// Key to its index in `entries`.
    positions: HashMap<String, usize>,
}

impl Segments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a segment.
    pub fn push(&mut self, key: impl Into<String>, text: impl Into<String>) {
        let key = key.into();
        let text = text.into();
        match self.positions.get(&key) {
            Some(&i) => self.entries[i].1 = text,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, text));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.positions
            .get(key)
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Equality and hashing follow the ordered entries; `positions` is derived.
impl PartialEq for Segments {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Segments {}

impl Hash for Segments {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entries.hash(state);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Segments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut segments = Segments::new();
        for (key, text) in iter {
            segments.push(key, text);
        }
        segments
    }
}

impl Serialize for Segments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, text) in &self.entries {
            map.serialize_entry(key, text)?;
        }
        map.end()
    }
}

struct SegmentsVisitor;

impl<'de> Visitor<'de> for SegmentsVisitor {
    type Value = Segments;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of segment keys to segment text")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Segments, A::Error> {
        let mut segments = Segments::new();
        while let Some((key, text)) = access.next_entry::<String, Option<String>>()? {
            // Null text is an empty segment, not a missing one: it still counts
            // as a position in the document.
            segments.push(key, text.unwrap_or_default());
        }
        Ok(segments)
    }
}

impl<'de> Deserialize<'de> for Segments {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SegmentsVisitor)
    }
}

/// Where one segment sits inside the concatenated original text.
///
/// `ordinal` is the 1-based count of non-empty segments up to and including
/// this one. For an empty segment it equals the previous non-empty ordinal
/// (0 if none), since empty segments are skipped when numbering comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentBound {
    pub key: String,
    /// Starting character offset in the original text (inclusive)
    pub start: usize,
    /// Ending character offset (exclusive)
    pub end: usize,
    pub ordinal: usize,
}

impl SegmentBound {
    /// Check if an offset falls within this segment.
    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// Validate that segment bounds partition `[0, text_len)`.
///
/// - Every bound has `start <= end`
/// - Bounds are contiguous: each starts where the previous one ended
/// - The first starts at 0 and the last ends at `text_len`
pub fn validate_segment_bounds(bounds: &[SegmentBound], text_len: usize) -> Result<(), String> {
    for (i, bound) in bounds.iter().enumerate() {
        if bound.start > bound.end {
            return Err(format!(
                "Segment {} ('{}') is inverted: start={} > end={}",
                i, bound.key, bound.start, bound.end
            ));
        }
    }

    for i in 1..bounds.len() {
        if bounds[i - 1].end != bounds[i].start {
            return Err(format!(
                "Segments not contiguous: segment {} ends at {} but segment {} starts at {}",
                i - 1,
                bounds[i - 1].end,
                i,
                bounds[i].start
            ));
        }
    }

    match (bounds.first(), bounds.last()) {
        (Some(first), Some(last)) => {
            if first.start != 0 {
                return Err(format!(
                    "First segment doesn't start at 0: starts at {}",
                    first.start
                ));
            }
            if last.end != text_len {
                return Err(format!(
                    "Last segment doesn't end at text length: ends at {} but text length is {}",
                    last.end, text_len
                ));
            }
        }
        _ if text_len != 0 => {
            return Err(format!("No segments cover {} characters of text", text_len));
        }
        _ => {}
    }

    Ok(())
}

/// Find the index of the segment owning a given original offset.
///
/// Returns the last segment whose start is `<= offset`, provided it actually
/// contains the offset. Empty segments share their start with the following
/// segment, so they are never the last candidate for an in-range offset.
pub fn find_segment_index_at_offset(bounds: &[SegmentBound], offset: usize) -> Option<usize> {
    // Binary search since bounds are sorted by start
    let idx = bounds.partition_point(|b| b.start <= offset);
    if idx > 0 && bounds[idx - 1].contains(offset) {
        Some(idx - 1)
    } else {
        None
    }
}

/// Find the segment owning a given original offset.
pub fn find_segment_at_offset(bounds: &[SegmentBound], offset: usize) -> Option<&SegmentBound> {
    find_segment_index_at_offset(bounds, offset).map(|i| &bounds[i])
}

// =============================================================================
// LOCATIONS
// =============================================================================

/// A stable, deep-linkable location for a result.
///
/// Verse bodies resolve to a key range; commentary resolves to the 1-based
/// number of the owning non-empty comment line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Location {
    VerseRange { start: String, end: String },
    Comment { ordinal: usize },
}

impl Location {
    /// The URL fragment for this location (`mn10:1.1-mn10:1.3`, `comment4`).
    pub fn anchor(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::VerseRange { start, end } => write!(f, "{}-{}", start, end),
            Location::Comment { ordinal } => write!(f, "comment{}", ordinal),
        }
    }
}
