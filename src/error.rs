// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for passim.
//!
//! Text content never produces an error: malformed markup or normalization
//! drift degrades to best-effort offsets. What remains is the one internal
//! invariant the search loop can trip over (`LocationNotFound`) and the I/O
//! around loading corpora and configuration.

use thiserror::Error;

/// Result type alias using PassimError
pub type Result<T> = std::result::Result<T, PassimError>;

/// Main error type for passim
#[derive(Debug, Error)]
pub enum PassimError {
    /// No segment owns the given original-text offset.
    ///
    /// Unreachable while segment bounds partition the text; the orchestrator
    /// drops the offending match instead of emitting a broken link.
    #[error("No segment owns original offset {offset}")]
    LocationNotFound { offset: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}
