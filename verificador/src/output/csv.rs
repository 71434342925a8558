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
    io::{Result as IoResult, Write},
};

use crate::report::AnalysisReport;

use super::Driver;

/// Writes the token table of each report as CSV, with a heading row.
pub struct CsvDriver {
    writer: ::csv::Writer<Box<dyn Write>>,
}

impl CsvDriver {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer: ::csv::WriterBuilder::new()
                .delimiter(b',')
                .quote(b'"')
                .from_writer(writer),
        }
    }
}

/// Writes the ledger of `report` to `output`, in snapshot order.
pub fn write_ledger<W>(report: &AnalysisReport, output: &mut ::csv::Writer<W>) -> ::csv::Result<()>
where
    W: Write,
{
    output.write_record(["token", "category", "count"])?;
    for entry in report.ledger_snapshot() {
        output.write_record([
            entry.lexeme.as_str(),
            entry.category.as_str(),
            &entry.count.to_string(),
        ])?;
    }
    Ok(())
}

impl Driver for CsvDriver {
    fn name(&self) -> Cow<'static, str> {
        Cow::from("csv")
    }

    fn write(&mut self, report: &AnalysisReport, _source: &str) -> IoResult<()> {
        Ok(write_ledger(report, &mut self.writer)?)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use crate::{engine::analyze, taxonomy::Taxonomy};

    use super::write_ledger;

    #[test]
    fn ledger() {
        let report = analyze(
            "cadena s = \"a, \\\"b\\\"\";\nimprimir(s);",
            &Taxonomy::default(),
        );
        let mut output = ::csv::Writer::from_writer(Vec::new());
        write_ledger(&report, &mut output).unwrap();
        let output = String::from_utf8(output.into_inner().unwrap()).unwrap();
        assert_eq!(
            output,
            r#"token,category,count
s,identifier,2
=,operator,1
(,punctuation,1
),punctuation,1
;,punctuation,2
cadena,reserved,1
imprimir,reserved,1
"""a, \""b\""""",string_literal,1
"#
        );
    }
}
