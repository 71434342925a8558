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

//! Lexical analysis.
//!
//! Lexical analysis happens in three small steps:
//!
//! 1. "Segmentation", implemented in the [segment] module, labels each prefix
//!    of a line as a quoted string, a word, a symbol, white space, a comment,
//!    or the end of the line.
//!
//! 2. "Classification", implemented in the [classify] module, assigns each
//!    lexeme a [Category] using the [Taxonomy](crate::taxonomy::Taxonomy) and
//!    the shapes of literals and identifiers.
//!
//! 3. "Scanning", implemented in the [scan] module, splits source text into
//!    numbered lines and combines the first two steps to produce [Token]s.

pub mod classify;
pub mod scan;
pub mod segment;
mod token;
pub use token::{Category, Token};
