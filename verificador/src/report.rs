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

//! The result of analyzing a program.

use enum_map::EnumMap;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::{
    grammar::DataType,
    ledger::{Ledger, LedgerEntry},
    lex::Category,
    message::{Diagnostic, Severity},
};

/// Everything one analysis run found out about a program.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Errors, in source order.
    pub errors: Vec<Diagnostic>,

    /// Warnings, in source order.
    pub warnings: Vec<Diagnostic>,

    pub ledger: Ledger,

    /// Declared variables and their types, in declaration order.
    pub variables: IndexMap<String, DataType>,

    /// Declared or called functions, in the order first seen.
    pub functions: IndexSet<String>,
}

impl AnalysisReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn diagnostics(&self, severity: Severity) -> &[Diagnostic] {
        match severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
        }
    }

    /// All the findings, merged into line order.  Findings on the same line
    /// keep their relative order, with errors first.
    pub fn findings(&self) -> Vec<&Diagnostic> {
        let mut findings: Vec<&Diagnostic> =
            self.errors.iter().chain(self.warnings.iter()).collect();
        findings.sort_by_key(|diagnostic| diagnostic.line());
        findings
    }

    /// The ledger sorted by category, then by lexeme.
    pub fn ledger_snapshot(&self) -> Vec<LedgerEntry> {
        self.ledger.snapshot()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            errors: self.errors.len(),
            warnings: self.warnings.len(),
            unique_tokens: self.ledger.len(),
            total_tokens: self.ledger.total(),
            variables: self.variables.len(),
            functions: self.functions.len(),
            tokens_by_category: self.ledger.totals_by_category(),
        }
    }
}

/// Counts derived from an [AnalysisReport].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,

    /// Number of distinct lexemes in the ledger.
    pub unique_tokens: usize,

    /// Number of tokens counted in the ledger.  Unknown tokens are not
    /// included.
    pub total_tokens: usize,

    pub variables: usize,
    pub functions: usize,
    pub tokens_by_category: EnumMap<Category, usize>,
}

#[cfg(test)]
mod tests {
    use crate::{
        lex::{Category, Token},
        message::{Category as FindingCategory, Diagnostic, Point},
    };

    use super::AnalysisReport;

    #[test]
    fn summary() {
        let mut report = AnalysisReport::default();
        for (lexeme, category) in [
            ("entero", Category::Reserved),
            ("x", Category::Identifier),
            ("x", Category::Identifier),
            ("5", Category::Number),
        ] {
            report.ledger.record(&Token::new(lexeme, category, 1, 1));
        }
        report.errors.push(Diagnostic::error(
            FindingCategory::Lexical,
            Point::new(1),
            "Token desconocido '@'",
        ));
        let summary = report.summary();
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 0);
        assert_eq!(summary.unique_tokens, 3);
        assert_eq!(summary.total_tokens, 4);
        assert_eq!(summary.tokens_by_category[Category::Identifier], 2);
        assert_eq!(summary.tokens_by_category[Category::Operator], 0);
    }

    #[test]
    fn findings_are_merged_by_line() {
        let mut report = AnalysisReport::default();
        report.errors.push(Diagnostic::error(
            FindingCategory::Syntax,
            Point::new(2),
            "b",
        ));
        report.errors.push(Diagnostic::error(
            FindingCategory::Structure,
            Point::new(9),
            "d",
        ));
        report.warnings.push(Diagnostic::warning(
            FindingCategory::Syntax,
            Point::new(1),
            "a",
        ));
        report.warnings.push(Diagnostic::warning(
            FindingCategory::Ambiguity,
            Point::new(2),
            "c",
        ));
        let texts = report
            .findings()
            .into_iter()
            .map(|diagnostic| diagnostic.text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(texts, ["a", "b", "c", "d"]);
    }
}
