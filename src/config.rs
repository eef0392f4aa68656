// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search configuration.
//!
//! JSON on disk (camelCase keys, every key optional), then a handful of
//! environment overrides on top:
//!
//! | Variable                        | Field                   |
//! |---------------------------------|-------------------------|
//! | `PASSIM_CONFIG`                 | config file path        |
//! | `PASSIM_PRIMARY_WORD_BUDGET`    | `primary_word_budget`   |
//! | `PASSIM_SECONDARY_WORD_BUDGET`  | `secondary_word_budget` |
//! | `PASSIM_MAX_RESULTS`            | `max_results_per_document` |

use crate::error::{PassimError, Result};
use crate::passage::Highlight;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "PASSIM_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    /// Passage word budget for the standard-language corpus
    pub primary_word_budget: usize,

    /// Passage word budget for the diacritic-sensitive corpus, whose words run long
    pub secondary_word_budget: usize,

    /// Results per document part when single-result mode is off
    pub max_results_per_document: usize,

    pub highlight_open: String,
    pub highlight_close: String,

    /// Built indexes kept between searches. 0 disables the cache.
    pub index_cache_capacity: usize,

    /// Scan the two language corpora on separate threads
    pub concurrent_languages: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            primary_word_budget: 150,
            secondary_word_budget: 100,
            max_results_per_document: 10,
            highlight_open: "<b>".to_string(),
            highlight_close: "</b>".to_string(),
            index_cache_capacity: 16,
            concurrent_languages: false,
        }
    }
}

impl SearchConfig {
    /// Load from `path`, else from `$PASSIM_CONFIG`, else defaults; then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| PassimError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Apply numeric overrides looked up through `lookup`. Values that do not
    /// parse are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let overrides: [(&str, &mut usize); 3] = [
            ("PASSIM_PRIMARY_WORD_BUDGET", &mut self.primary_word_budget),
            ("PASSIM_SECONDARY_WORD_BUDGET", &mut self.secondary_word_budget),
            ("PASSIM_MAX_RESULTS", &mut self.max_results_per_document),
        ];
        for (key, field) in overrides {
            let Some(raw) = lookup(key) else { continue };
            match raw.trim().parse::<usize>() {
                Ok(value) => *field = value,
                Err(_) => tracing::warn!(key, value = %raw, "ignoring invalid number"),
            }
        }
    }

    pub fn highlight(&self) -> Highlight {
        Highlight {
            open: self.highlight_open.clone(),
            close: self.highlight_close.clone(),
        }
    }
}
