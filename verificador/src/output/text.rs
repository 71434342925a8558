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

use std::{
    borrow::Cow,
    fmt::{Result as FmtResult, Write as FmtWrite},
    io::{BufWriter, Result as IoResult, Write as IoWrite},
};

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::{
    lex::scan::lines,
    message::Severity,
    report::AnalysisReport,
};

use super::Driver;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Boxes {
    Ascii,
    #[default]
    Unicode,
}

impl Boxes {
    fn box_chars(&self) -> &'static BoxChars {
        match self {
            Boxes::Ascii => &ASCII_BOX,
            Boxes::Unicode => &UNICODE_BOX,
        }
    }
}

/// Characters for drawing a table.  `corners` is indexed first by row (top,
/// between heading and body, bottom) and then by column (left, between
/// columns, right).
struct BoxChars {
    horizontal: char,
    vertical: char,
    corners: [[char; 3]; 3],
}

static ASCII_BOX: BoxChars = BoxChars {
    horizontal: '-',
    vertical: '|',
    corners: [['+', '+', '+'], ['+', '+', '+'], ['+', '+', '+']],
};

static UNICODE_BOX: BoxChars = BoxChars {
    horizontal: '─',
    vertical: '│',
    corners: [['┌', '┬', '┐'], ['├', '┼', '┤'], ['└', '┴', '┘']],
};

#[derive(Clone, Debug)]
pub struct TextOptions {
    /// ASCII or Unicode.
    pub boxes: Boxes,

    /// Whether to show errors and warnings.
    pub findings: bool,

    /// Maximum number of findings of each severity to show.
    pub max_messages: EnumMap<Severity, usize>,

    /// Whether to show the summary.
    pub summary: bool,

    /// Whether to show the token table.
    pub tokens: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            boxes: Boxes::default(),
            findings: true,
            max_messages: EnumMap::from_fn(|_| 100),
            summary: true,
            tokens: true,
        }
    }
}

pub struct TextDriver {
    writer: BufWriter<Box<dyn IoWrite>>,
    options: TextOptions,
}

impl TextDriver {
    pub fn new(writer: Box<dyn IoWrite>, options: &TextOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options: options.clone(),
        }
    }
}

impl Driver for TextDriver {
    fn name(&self) -> Cow<'static, str> {
        Cow::from("text")
    }

    fn write(&mut self, report: &AnalysisReport, source: &str) -> IoResult<()> {
        let mut output = String::new();
        // Writing to a `String` cannot fail.
        let _ = render(&self.options, report, source, &mut output);
        self.writer.write_all(output.as_bytes())
    }

    fn flush(&mut self) -> IoResult<()> {
        self.writer.flush()
    }
}

/// Renders `report` as text into `output`.
pub fn render<W>(
    options: &TextOptions,
    report: &AnalysisReport,
    source: &str,
    output: &mut W,
) -> FmtResult
where
    W: FmtWrite,
{
    let source_lines: Vec<&str> = lines(source).map(|line| line.text).collect();

    if options.findings {
        if !report.has_errors() && !report.has_warnings() {
            writeln!(output, "Sin errores ni advertencias.")?;
        }
        for severity in [Severity::Error, Severity::Warning] {
            let diagnostics = report.diagnostics(severity);
            if diagnostics.is_empty() {
                continue;
            }
            writeln!(output, "{} ({}):", severity.as_title_str(), diagnostics.len())?;
            let max = options.max_messages[severity];
            for diagnostic in diagnostics.iter().take(max) {
                match source_lines.get(diagnostic.line().wrapping_sub(1)) {
                    Some(line) => writeln!(output, "{}", diagnostic.with_source(line))?,
                    None => writeln!(output, "{diagnostic}")?,
                }
            }
            if diagnostics.len() > max {
                writeln!(output, "({} más sin mostrar)", diagnostics.len() - max)?;
            }
            writeln!(output)?;
        }
    }

    if options.summary {
        let summary = report.summary();
        writeln!(output, "Resumen:")?;
        for (name, value) in [
            ("errores", summary.errors),
            ("advertencias", summary.warnings),
            ("tokens únicos", summary.unique_tokens),
            ("tokens totales", summary.total_tokens),
            ("variables", summary.variables),
            ("funciones", summary.functions),
        ] {
            writeln!(output, "  {name}: {value}")?;
        }
    }

    if options.tokens && !report.ledger.is_empty() {
        if options.summary {
            writeln!(output)?;
        }
        let rows = report
            .ledger_snapshot()
            .into_iter()
            .map(|entry| {
                [
                    entry.lexeme,
                    entry.category.to_string(),
                    entry.count.to_string(),
                ]
            })
            .collect::<Vec<_>>();
        write_table(
            options.boxes.box_chars(),
            ["Token", "Categoría", "Total"],
            &rows,
            output,
        )?;
    }
    Ok(())
}

/// Writes a table with `headings` and `rows`.  The last column is aligned to
/// the right.
fn write_table<W, const N: usize>(
    box_chars: &BoxChars,
    headings: [&str; N],
    rows: &[[String; N]],
    output: &mut W,
) -> FmtResult
where
    W: FmtWrite,
{
    let mut widths = headings.map(|heading| heading.width());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let rule = |output: &mut W, corners: &[char; 3]| -> FmtResult {
        output.write_char(corners[0])?;
        for (index, width) in widths.iter().enumerate() {
            if index > 0 {
                output.write_char(corners[1])?;
            }
            for _ in 0..width + 2 {
                output.write_char(box_chars.horizontal)?;
            }
        }
        output.write_char(corners[2])?;
        writeln!(output)
    };
    let row = |output: &mut W, cells: [&str; N]| -> FmtResult {
        for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
            let pad = width - cell.width();
            write!(output, "{} ", box_chars.vertical)?;
            if index == N - 1 {
                write!(output, "{:pad$}{cell}", "")?;
            } else {
                write!(output, "{cell}{:pad$}", "")?;
            }
            output.write_char(' ')?;
        }
        writeln!(output, "{}", box_chars.vertical)
    };

    rule(output, &box_chars.corners[0])?;
    row(output, headings)?;
    rule(output, &box_chars.corners[1])?;
    for cells in rows {
        row(output, cells.each_ref().map(String::as_str))?;
    }
    rule(output, &box_chars.corners[2])
}

#[cfg(test)]
mod tests {
    use enum_map::enum_map;

    use crate::{engine::analyze, message::Severity, taxonomy::Taxonomy};

    use super::{Boxes, TextOptions, render};

    #[track_caller]
    fn check(options: &TextOptions, source: &str, expected: &str) {
        let report = analyze(source, &Taxonomy::default());
        let mut actual = String::new();
        render(options, &report, source, &mut actual).unwrap();
        if actual != expected {
            eprintln!("output differs from expected:");
            for result in diff::lines(expected, &actual) {
                match result {
                    diff::Result::Left(left) => eprintln!("-{left}"),
                    diff::Result::Both(left, _right) => eprintln!(" {left}"),
                    diff::Result::Right(right) => eprintln!("+{right}"),
                }
            }
            panic!();
        }
    }

    #[test]
    fn clean() {
        check(
            &TextOptions {
                boxes: Boxes::Ascii,
                ..TextOptions::default()
            },
            "entero x = 5;",
            "\
Sin errores ni advertencias.
Resumen:
  errores: 0
  advertencias: 0
  tokens únicos: 5
  tokens totales: 5
  variables: 1
  funciones: 0

+--------+-------------+-------+
| Token  | Categoría   | Total |
+--------+-------------+-------+
| x      | identifier  |     1 |
| 5      | number      |     1 |
| =      | operator    |     1 |
| ;      | punctuation |     1 |
| entero | reserved    |     1 |
+--------+-------------+-------+
",
        );
    }

    #[test]
    fn findings() {
        check(
            &TextOptions {
                summary: false,
                tokens: false,
                ..TextOptions::default()
            },
            "entero x = \"a\";\ny = 1;\ncadena s;",
            r#"Errores (2):
1.12: error: Tipo incompatible: el valor "a" no es compatible con el tipo 'entero'
    1 | entero x = "a";
      |            ^~~
2.1: error: Variable 'y' no declarada
    2 | y = 1;
      | ^

Advertencias (1):
3.8: warning: Variable 's' declarada pero no inicializada
    3 | cadena s;
      |        ^

"#,
        );
    }

    #[test]
    fn max_messages() {
        check(
            &TextOptions {
                max_messages: enum_map! {
                    Severity::Error => 1,
                    Severity::Warning => 0,
                },
                summary: false,
                tokens: false,
                ..TextOptions::default()
            },
            "a = 1;\nb = 2;\nc = 3;\nentero d;",
            "\
Errores (3):
1.1: error: Variable 'a' no declarada
    1 | a = 1;
      | ^
(2 más sin mostrar)

Advertencias (1):
(1 más sin mostrar)

",
        );
    }

    #[test]
    fn tokens_only() {
        check(
            &TextOptions {
                boxes: Boxes::Ascii,
                findings: false,
                summary: false,
                ..TextOptions::default()
            },
            "y = @;",
            "\
+-------+-------------+-------+
| Token | Categoría   | Total |
+-------+-------------+-------+
| y     | identifier  |     1 |
| =     | operator    |     1 |
| ;     | punctuation |     1 |
+-------+-------------+-------+
",
        );
    }

    #[test]
    fn unicode_table() {
        check(
            &TextOptions {
                summary: false,
                ..TextOptions::default()
            },
            "x++",
            "\
Sin errores ni advertencias.
┌───────┬────────────┬───────┐
│ Token │ Categoría  │ Total │
├───────┼────────────┼───────┤
│ x     │ identifier │     1 │
│ ++    │ operator   │     1 │
└───────┴────────────┴───────┘
",
        );
    }
}
