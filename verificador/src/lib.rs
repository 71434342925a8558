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

//! Static checking for a small teaching language with Spanish keywords.
//!
//! [engine::analyze] reads a whole program and returns an
//! [report::AnalysisReport] listing lexical errors, malformed declarations,
//! assignments, and control headers, undeclared variables, type-incompatible
//! literals, unbalanced brackets and blocks, and suspicious constructs, along
//! with a tally of every token.

pub mod engine;
pub mod grammar;
pub mod ledger;
pub mod lex;
pub mod message;
pub mod output;
pub mod pda;
pub mod report;
pub mod settings;
pub mod source;
pub mod taxonomy;

pub use engine::{Engine, analyze};
pub use report::AnalysisReport;
pub use taxonomy::Taxonomy;
