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

//! Lexeme classification.
//!
//! Classification is an ordered list of predicates.  Each predicate either
//! names a [Category] or declines, and the first one that names a category
//! wins.  A lexeme that every predicate declines is [Category::Unknown].

use crate::taxonomy::Taxonomy;

use super::Category;

type Rule = fn(&Taxonomy, &str) -> Option<Category>;

const RULES: &[Rule] = &[
    string_literal_rule,
    reserved_rule,
    operator_rule,
    punctuation_rule,
    number_rule,
    identifier_rule,
];

fn string_literal_rule(_: &Taxonomy, s: &str) -> Option<Category> {
    is_string_literal(s).then_some(Category::StringLiteral)
}

fn reserved_rule(taxonomy: &Taxonomy, s: &str) -> Option<Category> {
    taxonomy.is_reserved(s).then_some(Category::Reserved)
}

fn operator_rule(taxonomy: &Taxonomy, s: &str) -> Option<Category> {
    taxonomy.is_operator(s).then_some(Category::Operator)
}

fn punctuation_rule(taxonomy: &Taxonomy, s: &str) -> Option<Category> {
    taxonomy.is_punctuation(s).then_some(Category::Punctuation)
}

fn number_rule(_: &Taxonomy, s: &str) -> Option<Category> {
    is_number(s).then_some(Category::Number)
}

fn identifier_rule(_: &Taxonomy, s: &str) -> Option<Category> {
    is_identifier(s).then_some(Category::Identifier)
}

/// Returns the category of `lexeme` according to `taxonomy`.
pub fn classify(taxonomy: &Taxonomy, lexeme: &str) -> Category {
    RULES
        .iter()
        .find_map(|rule| rule(taxonomy, lexeme))
        .unwrap_or(Category::Unknown)
}

/// Returns true if `s` begins and ends with a double quote.
pub fn is_string_literal(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// Returns true if `s` has the form `\d+` or `\d+\.\d+`.
pub fn is_number(s: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match s.split_once('.') {
        Some((integer, fraction)) => digits(integer) && digits(fraction),
        None => digits(s),
    }
}

/// Returns true if `s` is all ASCII digits, that is, an integer literal.
pub fn is_integer(s: &str) -> bool {
    is_number(s) && !s.contains('.')
}

/// Returns true if `s` has the form `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
