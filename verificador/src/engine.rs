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

//! Analysis of whole programs.

use std::sync::Arc;

use log::{debug, trace};

use crate::{
    grammar::Validator,
    ledger::Ledger,
    lex::{
        Category, Token,
        scan::{lines, scan_line},
        segment::Segmenter,
    },
    message::{Category as FindingCategory, Diagnostic, Diagnostics},
    pda::Automaton,
    report::AnalysisReport,
    taxonomy::Taxonomy,
};

/// Analyzes programs against a fixed [Taxonomy].
///
/// An engine may analyze any number of programs, one at a time.  Each call to
/// [Engine::analyze] starts from scratch, so that results never depend on
/// earlier runs.  The taxonomy is shared and never modified, so engines for
/// concurrent analyses can be built from one `Arc<Taxonomy>`.
pub struct Engine {
    taxonomy: Arc<Taxonomy>,
    segmenter: Segmenter,
    ledger: Ledger,
    validator: Validator,
    automaton: Automaton,
}

impl Engine {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            segmenter: Segmenter::for_taxonomy(&taxonomy),
            taxonomy,
            ledger: Ledger::new(),
            validator: Validator::new(),
            automaton: Automaton::new(),
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    fn reset(&mut self) {
        self.ledger.clear();
        self.validator.reset();
        self.automaton.reset();
    }

    /// Analyzes `source`, a whole program.
    pub fn analyze(&mut self, source: &str) -> AnalysisReport {
        self.reset();

        let mut diagnostics = Diagnostics::new();
        let mut n_lines = 0;
        for line in lines(source) {
            n_lines += 1;
            let tokens = scan_line(line, &self.segmenter, &self.taxonomy);
            trace!("line {}: {} tokens", line.number, tokens.len());
            self.push_line(&tokens, &mut diagnostics);
        }
        self.automaton.finish(&mut diagnostics);

        let (errors, warnings) = diagnostics.into_split();
        debug!(
            "analyzed {n_lines} lines: {} errors, {} warnings",
            errors.len(),
            warnings.len()
        );
        let (variables, functions) = std::mem::take(&mut self.validator).into_parts();
        AnalysisReport {
            errors,
            warnings,
            ledger: std::mem::take(&mut self.ledger),
            variables,
            functions,
        }
    }

    fn push_line(&mut self, tokens: &[Token], diagnostics: &mut Diagnostics) {
        for token in tokens {
            if token.category == Category::Unknown {
                diagnostics.push(
                    Diagnostic::error(
                        FindingCategory::Lexical,
                        token.location(),
                        format!("Token desconocido '{token}'"),
                    )
                    .with_width(token.width()),
                );
            } else {
                self.ledger.record(token);
            }
        }
        self.validator.validate_line(tokens, diagnostics);
        self.automaton.push_line(tokens, diagnostics);
    }
}

/// Analyzes `source` against `taxonomy` with a freshly constructed [Engine].
pub fn analyze(source: &str, taxonomy: &Taxonomy) -> AnalysisReport {
    Engine::new(Arc::new(taxonomy.clone())).analyze(source)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        grammar::DataType,
        lex::Category,
        message::Category as FindingCategory,
        taxonomy::Taxonomy,
    };

    use super::Engine;

    fn engine() -> Engine {
        Engine::new(Arc::new(Taxonomy::default()))
    }

    #[test]
    fn unknown_tokens() {
        let report = engine().analyze("entero x = 5 @ 3;\ncadena s = \"a\" # $;");
        assert_eq!(
            report
                .errors
                .iter()
                .map(|diagnostic| (diagnostic.to_string(), diagnostic.category))
                .collect::<Vec<_>>(),
            [
                (
                    String::from("1.14: error: Token desconocido '@'"),
                    FindingCategory::Lexical
                ),
                (
                    String::from("2.16: error: Token desconocido '#'"),
                    FindingCategory::Lexical
                ),
                (
                    String::from("2.18: error: Token desconocido '$'"),
                    FindingCategory::Lexical
                ),
            ]
        );
        assert!(report.ledger.get("@").is_none());
        assert_eq!(report.ledger.get("5").map(|entry| entry.count), Some(1));
    }

    #[test]
    fn findings_in_source_order() {
        let report = engine().analyze(
            "si (x > 0) siguiente
    y = 1;
    entero z;
    z = 1 @ 2;",
        );
        assert_eq!(
            report
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            [
                "2.5: error: Variable 'y' no declarada",
                "4.11: error: Token desconocido '@'",
                "1.1: error: 'si' sin 'finaliza' correspondiente",
            ]
        );
        assert_eq!(
            report
                .warnings
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            ["3.12: warning: Variable 'z' declarada pero no inicializada"]
        );
    }

    #[test]
    fn reuse() {
        let mut engine = engine();
        let first = engine.analyze("entero x = 5;\nfunc f() siguiente\nsi (");
        assert!(first.has_errors());
        assert_eq!(first.variables.get("x"), Some(&DataType::Entero));

        let second = engine.analyze("x = 1;");
        assert_eq!(second.variables.len(), 0);
        assert_eq!(second.functions.len(), 0);
        assert_eq!(
            second
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            ["1.1: error: Variable 'x' no declarada"]
        );
        assert_eq!(second.ledger.len(), 4);
        assert_eq!(
            second.ledger.get("x").map(|entry| entry.category),
            Some(Category::Identifier)
        );
    }
}
