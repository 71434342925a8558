// verificador - a static checker for a small teaching language.
// Copyright (C) 2026 The verificador authors.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! The token ledger.

use enum_map::EnumMap;
use indexmap::IndexMap;
use serde::Serialize;

use crate::lex::{Category, Token};

/// A unique lexeme, its category, and how many times it occurred.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub lexeme: String,
    pub category: Category,
    pub count: usize,
}

/// Unique tokens seen during one analysis run, in first-seen order.
///
/// Serializes as a map from lexeme to [LedgerEntry].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Ledger(IndexMap<String, LedgerEntry>);

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts `token`.  Unknown tokens are not recorded.
    pub fn record(&mut self, token: &Token) {
        if token.category == Category::Unknown {
            return;
        }
        self.0
            .entry(token.lexeme.clone())
            .and_modify(|entry| entry.count += 1)
            .or_insert_with(|| LedgerEntry {
                lexeme: token.lexeme.clone(),
                category: token.category,
                count: 1,
            });
    }

    pub fn get(&self, lexeme: &str) -> Option<&LedgerEntry> {
        self.0.get(lexeme)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Entries in the order their lexemes were first seen.
    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.0.values()
    }

    /// Entries sorted by category name, then by lexeme.
    pub fn snapshot(&self) -> Vec<LedgerEntry> {
        let mut entries: Vec<LedgerEntry> = self.0.values().cloned().collect();
        entries.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| a.lexeme.cmp(&b.lexeme))
        });
        entries
    }

    /// The total number of tokens counted.
    pub fn total(&self) -> usize {
        self.0.values().map(|entry| entry.count).sum()
    }

    /// Token occurrences per category.
    pub fn totals_by_category(&self) -> EnumMap<Category, usize> {
        let mut totals = EnumMap::default();
        for entry in self.0.values() {
            totals[entry.category] += entry.count;
        }
        totals
    }
}
