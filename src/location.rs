// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Resolve an original-space span to a deep-linkable location.

use crate::error::{PassimError, Result};
use crate::index::TextIndex;
use crate::types::{Location, Span, UnitMode};

/// Location of `span` (original offsets) within `index`.
///
/// `MultiUnit` gives the key range from the segment owning the first
/// character to the segment owning the last one. `SingleUnit` gives the
/// ordinal of the segment owning the first character.
pub fn resolve(index: &TextIndex, span: Span) -> Result<Location> {
    let owner = |offset: usize| {
        index
            .find_owning_segment(offset)
            .ok_or(PassimError::LocationNotFound { offset })
    };

    match index.unit() {
        UnitMode::MultiUnit => {
            let first = owner(span.start)?;
            let last = owner(span.end.saturating_sub(1).max(span.start))?;
            Ok(Location::VerseRange {
                start: first.key.clone(),
                end: last.key.clone(),
            })
        }
        UnitMode::SingleUnit => Ok(Location::Comment {
            ordinal: owner(span.start)?.ordinal,
        }),
    }
}
