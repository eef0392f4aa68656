// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use super::Language;
use crate::types::Segments;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const COMMENTARY_SUFFIX: &str = " - Comments";

/// One document: a body of segments and optional commentary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_id: Option<String>,
    #[serde(default)]
    pub body: Segments,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<Segments>,
}

impl Document {
    pub fn new(id: impl Into<String>, body: Segments) -> Self {
        Document {
            id: id.into(),
            body,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn with_commentary(mut self, commentary: Segments) -> Self {
        self.commentary = Some(commentary);
        self
    }

    /// Id shown to readers: the explicit display id, else the id upper-cased.
    pub fn display_id(&self) -> String {
        self.display_id
            .clone()
            .unwrap_or_else(|| self.id.to_uppercase())
    }

    /// Title shown for results from this document.
    ///
    /// Primary results use the title with its heading in parentheses.
    /// Secondary results use the secondary title alone.
    pub fn label(&self, language: Language) -> String {
        match language {
            Language::Primary => {
                let title = self.title.as_deref().unwrap_or(UNKNOWN_TITLE);
                match self.heading.as_deref() {
                    Some(heading) if !heading.is_empty() => format!("{} ({})", title, heading),
                    _ => title.to_string(),
                }
            }
            Language::Secondary => self
                .secondary_title
                .clone()
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        }
    }

    pub fn commentary_label(&self, language: Language) -> String {
        format!("{}{}", self.label(language), COMMENTARY_SUFFIX)
    }

    pub fn has_commentary(&self) -> bool {
        self.commentary.as_ref().is_some_and(|c| !c.is_empty())
    }
}
