// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Documents to search, grouped by language.
//!
//! A corpus file is JSON:
//!
//! ```json
//! {
//!   "primary":   [{ "id": "mn10", "title": "...", "body": {...}, "commentary": {...} }],
//!   "secondary": [{ "id": "mn10", "secondaryTitle": "...", "body": {...} }]
//! }
//! ```
//!
//! The primary corpus is a translation searched as written. The secondary
//! corpus is the source text, searched without diacritics.

pub mod catalog;
pub mod document;

pub use catalog::{sort_key, Category, CategoryFilter};
pub use document::Document;

use crate::error::{PassimError, Result};
use crate::types::LanguageMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Primary,
    Secondary,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Primary, Language::Secondary];

    pub fn mode(self) -> LanguageMode {
        match self {
            Language::Primary => LanguageMode::Standard,
            Language::Secondary => LanguageMode::DiacriticSensitiveSource,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Primary => "primary",
            Language::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = PassimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" | "en" => Ok(Language::Primary),
            "secondary" | "pl" | "pli" => Ok(Language::Secondary),
            _ => Err(PassimError::UnknownLanguage(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub primary: Vec<Document>,
    #[serde(default)]
    pub secondary: Vec<Document>,
}

impl Corpus {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn documents(&self, language: Language) -> &[Document] {
        match language {
            Language::Primary => &self.primary,
            Language::Secondary => &self.secondary,
        }
    }

    /// Documents of `language` admitted by `filter`, in canonical order.
    pub fn select(&self, language: Language, filter: &CategoryFilter) -> Vec<&Document> {
        let mut selected: Vec<(String, &Document)> = self
            .documents(language)
            .iter()
            .filter(|doc| filter.allows(&doc.id))
            .map(|doc| (sort_key(&doc.id), doc))
            .collect();
        selected.sort_by(|a, b| a.0.cmp(&b.0));
        selected.into_iter().map(|(_, doc)| doc).collect()
    }
}
