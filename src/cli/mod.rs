// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the passim command-line interface.
//!
//! Two subcommands: `search` to stream highlighted passages out of a corpus
//! file, and `inspect` to summarize what a corpus file holds.

pub mod display;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "passim",
    about = "Passage search with highlighted snippets and verse-range locations",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a corpus file and print each passage as it is found
    Search {
        /// Path to corpus JSON ({"primary": [...], "secondary": [...]})
        corpus: PathBuf,

        /// Search query
        query: String,

        /// Whole-word matching (punctuation counts as a word boundary)
        #[arg(long)]
        strict: bool,

        /// At most one result per document part
        #[arg(long)]
        single: bool,

        /// Languages to search: primary, secondary (repeatable; default both)
        #[arg(short, long = "lang", value_name = "LANG")]
        languages: Vec<String>,

        /// Book categories: dn, mn, sn, an, kn (repeatable; default all)
        #[arg(short, long = "category", value_name = "CATEGORY")]
        categories: Vec<String>,

        /// Config file (JSON). Falls back to $PASSIM_CONFIG
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit one JSON object per result instead of formatted output
        #[arg(long)]
        json: bool,

        /// Stop the search after this many milliseconds
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,
    },

    /// Summarize a corpus file
    Inspect {
        /// Path to corpus JSON
        corpus: PathBuf,
    },
}
