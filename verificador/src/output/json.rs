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
    io::{BufWriter, Result as IoResult, Write},
};

use serde::Serialize;

use crate::report::{AnalysisReport, Summary};

use super::Driver;

/// A report together with its summary.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    #[serde(flatten)]
    pub report: &'a AnalysisReport,
    pub summary: Summary,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self {
            report,
            summary: report.summary(),
        }
    }
}

pub struct JsonDriver {
    writer: BufWriter<Box<dyn Write>>,

    /// Pretty-print the whole report, instead of writing one finding per
    /// line?
    pretty: bool,
}

impl JsonDriver {
    pub fn new(writer: Box<dyn Write>, pretty: bool) -> Self {
        Self {
            writer: BufWriter::new(writer),
            pretty,
        }
    }
}

/// Writes each of the findings in `report` as a JSON object on a line of its
/// own, errors first.
pub fn write_ndjson<W>(report: &AnalysisReport, mut writer: W) -> IoResult<()>
where
    W: Write,
{
    for diagnostic in report.errors.iter().chain(&report.warnings) {
        serde_json::to_writer(&mut writer, diagnostic)?;
        writeln!(writer)?;
    }
    Ok(())
}

impl Driver for JsonDriver {
    fn name(&self) -> Cow<'static, str> {
        Cow::from(if self.pretty { "json" } else { "ndjson" })
    }

    fn write(&mut self, report: &AnalysisReport, _source: &str) -> IoResult<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &JsonReport::new(report))?;
            writeln!(self.writer)
        } else {
            write_ndjson(report, &mut self.writer)
        }
    }

    fn flush(&mut self) -> IoResult<()> {
        self.writer.flush()
    }
}
