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

//! Line segmentation.
//!
//! Segmentation is the lowest level of lexical analysis.  It accepts a string
//! and labels a prefix of it with a [Segment] type.  Calling
//! [Segmenter::push] repeatedly on what remains divides the entire string into
//! segments.
//!
//! Alternatives are tried in priority order, because longer and more specific
//! shapes must win over generic ones:
//!
//! 1. A double-quoted string, in which `\` escapes the following character.
//!    An unterminated quote is a one-character [Segment::Symbol].
//!
//! 2. A run of word characters.  A run of ASCII digits may absorb one decimal
//!    point when a digit follows it, so `3.14` is one segment but `3.` is two.
//!
//! 3. A compound symbol such as `==` or `++`, longest first.
//!
//! 4. Any other single character.
//!
//! White space, `//` comments, and line ends get segments of their own, which
//! the scanner discards or turns into an end-of-line marker.

use crate::taxonomy::Taxonomy;

/// Two-character symbols that are always recognized as one segment, whatever
/// the taxonomy says.
pub const FIXED_COMPOUND_SYMBOLS: &[&str] = &["==", "!=", "<=", ">=", "++", "--"];

/// The type of a segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// A double-quoted string, including its quotes.
    QuotedString,

    /// A run of word characters, possibly a decimal number.
    Word,

    /// A compound symbol or any other single character.
    Symbol,

    /// White space other than a new-line.
    Spaces,

    /// `//` through the end of the line, not including the new-line.
    Comment,

    /// `\n`.
    EndOfLine,
}

/// Labels prefixes of input with segment types.
#[derive(Clone, Debug)]
pub struct Segmenter {
    /// Multi-character symbols, longest first.
    compound_symbols: Vec<String>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

impl Segmenter {
    /// Returns a segmenter that recognizes [FIXED_COMPOUND_SYMBOLS] plus
    /// `compound_symbols`.
    pub fn new<'a, I>(compound_symbols: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut symbols: Vec<String> = FIXED_COMPOUND_SYMBOLS
            .iter()
            .copied()
            .chain(compound_symbols)
            .filter(|symbol| symbol.chars().count() > 1)
            .map(String::from)
            .collect();
        symbols.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        symbols.dedup();
        Self {
            compound_symbols: symbols,
        }
    }

    /// Returns a segmenter for the compound symbols in `taxonomy`.
    pub fn for_taxonomy(taxonomy: &Taxonomy) -> Self {
        Self::new(taxonomy.compound_symbols())
    }

    /// Labels a prefix of `input`.  Returns `None` if `input` is empty,
    /// otherwise `Some((n, segment))`, where `n` is the nonzero length in bytes
    /// of the prefix.
    pub fn push(&self, input: &str) -> Option<(usize, Segment)> {
        let c = input.chars().next()?;
        let (len, segment) = match c {
            '\n' => (1, Segment::EndOfLine),
            '"' => match quoted_string_len(input) {
                Some(len) => (len, Segment::QuotedString),
                None => (1, Segment::Symbol),
            },
            '/' if input.starts_with("//") => (
                input.find('\n').unwrap_or(input.len()),
                Segment::Comment,
            ),
            _ if c.is_whitespace() => (
                input
                    .find(|c: char| c == '\n' || !c.is_whitespace())
                    .unwrap_or(input.len()),
                Segment::Spaces,
            ),
            _ if is_word_char(c) => (word_len(input), Segment::Word),
            _ => match self
                .compound_symbols
                .iter()
                .find(|symbol| input.starts_with(symbol.as_str()))
            {
                Some(symbol) => (symbol.len(), Segment::Symbol),
                None => (c.len_utf8(), Segment::Symbol),
            },
        };
        Some((len, segment))
    }
}

/// Returns true if `c` may appear in a run of word characters.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns the length of the quoted string at the start of `input`, which must
/// begin with `"`, or `None` if it is unterminated.
fn quoted_string_len(input: &str) -> Option<usize> {
    let mut chars = input.char_indices().skip(1);
    while let Some((ofs, c)) = chars.next() {
        match c {
            '"' => return Some(ofs + 1),
            '\\' => {
                chars.next()?;
            }
            '\n' => return None,
            _ => (),
        }
    }
    None
}

fn word_len(input: &str) -> usize {
    let run = |s: &str| s.find(|c: char| !is_word_char(c)).unwrap_or(s.len());
    let len = run(input);
    let word = &input[..len];
    let rest = &input[len..];
    if word.bytes().all(|b| b.is_ascii_digit())
        && let Some(fraction) = rest.strip_prefix('.')
        && fraction.starts_with(|c: char| c.is_ascii_digit())
    {
        len + 1 + run(fraction)
    } else {
        len
    }
}

#[cfg(test)]
mod tests {
    use super::{Segment, Segmenter};

    #[track_caller]
    fn check_segmentation(input: &str, expected: &[(&str, Segment)]) {
        let segmenter = Segmenter::default();
        let mut segments = Vec::new();
        let mut rest = input;
        while let Some((len, segment)) = segmenter.push(rest) {
            assert!(len > 0);
            segments.push((&rest[..len], segment));
            rest = &rest[len..];
        }
        if segments != expected {
            eprintln!("segments differ from expected:");
            for result in diff::slice(expected, &segments) {
                match result {
                    diff::Result::Left(left) => eprintln!("-{left:?}"),
                    diff::Result::Both(left, _right) => eprintln!(" {left:?}"),
                    diff::Result::Right(right) => eprintln!("+{right:?}"),
                }
            }
            panic!();
        }
    }

    #[test]
    fn declaration() {
        use Segment::*;
        check_segmentation(
            "entero x = 5;\n",
            &[
                ("entero", Word),
                (" ", Spaces),
                ("x", Word),
                (" ", Spaces),
                ("=", Symbol),
                (" ", Spaces),
                ("5", Word),
                (";", Symbol),
                ("\n", EndOfLine),
            ],
        );
    }

    #[test]
    fn compound_symbols() {
        use Segment::*;
        check_segmentation(
            "a==b!=c<=d>=e++--f=g",
            &[
                ("a", Word),
                ("==", Symbol),
                ("b", Word),
                ("!=", Symbol),
                ("c", Word),
                ("<=", Symbol),
                ("d", Word),
                (">=", Symbol),
                ("e", Word),
                ("++", Symbol),
                ("--", Symbol),
                ("f", Word),
                ("=", Symbol),
                ("g", Word),
            ],
        );
    }

    #[test]
    fn taxonomy_compound_symbols() {
        let segmenter = Segmenter::new(["&&", "->>", "->"]);
        assert_eq!(segmenter.push("->>x"), Some((3, Segment::Symbol)));
        assert_eq!(segmenter.push("->x"), Some((2, Segment::Symbol)));
        assert_eq!(segmenter.push("&&"), Some((2, Segment::Symbol)));
        assert_eq!(segmenter.push("&x"), Some((1, Segment::Symbol)));
    }

    #[test]
    fn numbers() {
        use Segment::*;
        check_segmentation(
            "3.14 3. 1.2.3 42abc",
            &[
                ("3.14", Word),
                (" ", Spaces),
                ("3", Word),
                (".", Symbol),
                (" ", Spaces),
                ("1.2", Word),
                (".", Symbol),
                ("3", Word),
                (" ", Spaces),
                ("42abc", Word),
            ],
        );
    }

    #[test]
    fn strings() {
        use Segment::*;
        check_segmentation(
            r#"s = "a; b(" + "dijo \"hola\"" "sin cierre"#,
            &[
                ("s", Word),
                (" ", Spaces),
                ("=", Symbol),
                (" ", Spaces),
                (r#""a; b(""#, QuotedString),
                (" ", Spaces),
                ("+", Symbol),
                (" ", Spaces),
                (r#""dijo \"hola\"""#, QuotedString),
                (" ", Spaces),
                ("\"", Symbol),
                ("sin", Word),
                (" ", Spaces),
                ("cierre", Word),
            ],
        );
    }

    #[test]
    fn comments() {
        use Segment::*;
        check_segmentation(
            "x = \"http://a\"; // nota // otra\ny",
            &[
                ("x", Word),
                (" ", Spaces),
                ("=", Symbol),
                (" ", Spaces),
                ("\"http://a\"", QuotedString),
                (";", Symbol),
                (" ", Spaces),
                ("// nota // otra", Comment),
                ("\n", EndOfLine),
                ("y", Word),
            ],
        );
    }

    #[test]
    fn unexpected_characters() {
        use Segment::*;
        check_segmentation(
            "a@#ñb \t\r\n",
            &[
                ("a", Word),
                ("@", Symbol),
                ("#", Symbol),
                ("ñb", Word),
                (" \t\r", Spaces),
                ("\n", EndOfLine),
            ],
        );
    }
}
