// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Book categories and canonical ordering.
//!
//! Document ids start with their book (`dn1`, `mn10`, `sn12.3`, `an4.159`,
//! `dhp1-20`, `snp1.8`). Categories group books; sort keys put documents in
//! canonical reading order:
//!
//! ```text
//! mn10     → 2mn0010
//! sn12.3   → 3sn0012.0003
//! snp1.8   → 5snp0001.0008
//! ```

use crate::error::PassimError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dn,
    Mn,
    Sn,
    An,
    Kn,
}

/// Id prefixes of the minor collection. Checked before the main books so
/// `snp` never reads as `sn`.
const KN_BOOKS: &[&str] = &["kn", "snp", "dhp", "iti", "thag", "thig", "ud", "kp"];

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Dn,
        Category::Mn,
        Category::Sn,
        Category::An,
        Category::Kn,
    ];

    /// Category of a document, from its id prefix.
    pub fn of(id: &str) -> Option<Category> {
        let id = id.to_ascii_lowercase();
        if KN_BOOKS.iter().any(|book| id.starts_with(book)) {
            return Some(Category::Kn);
        }
        [Category::Dn, Category::Mn, Category::Sn, Category::An]
            .into_iter()
            .find(|c| id.starts_with(c.prefix()))
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Category::Dn => "dn",
            Category::Mn => "mn",
            Category::Sn => "sn",
            Category::An => "an",
            Category::Kn => "kn",
        }
    }

    /// Position in canonical book order, 1-based.
    pub fn rank(self) -> u8 {
        match self {
            Category::Dn => 1,
            Category::Mn => 2,
            Category::Sn => 3,
            Category::An => 4,
            Category::Kn => 5,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Category {
    type Err = PassimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.prefix().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PassimError::UnknownCategory(s.to_string()))
    }
}

/// Rank digit, then the id with each run of digits zero-padded to four.
///
/// Ids outside the known categories rank 9 and sort last.
pub fn sort_key(id: &str) -> String {
    let rank = Category::of(id).map_or(9, Category::rank);
    let mut key = String::with_capacity(id.len() + 8);
    key.push(char::from(b'0' + rank));

    let mut digits = String::new();
    for c in id.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if !digits.is_empty() {
            key.push_str(&format!("{:0>4}", digits));
            digits.clear();
        }
        key.push(c);
    }
    if !digits.is_empty() {
        key.push_str(&format!("{:0>4}", digits));
    }
    key
}

/// Which categories a search covers. Empty means all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    categories: BTreeSet<Category>,
}

impl CategoryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only(categories: impl IntoIterator<Item = Category>) -> Self {
        CategoryFilter {
            categories: categories.into_iter().collect(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn allows(&self, id: &str) -> bool {
        self.is_all() || Category::of(id).is_some_and(|c| self.categories.contains(&c))
    }
}
