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

use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Args, ValueEnum};
use verificador::{
    engine::analyze,
    output::{
        Config, Driver, Format,
        text::{Boxes, TextOptions},
    },
};

use crate::{Input, create_output};

/// Print the table of tokens in a program, with their categories and counts.
#[derive(Args, Clone, Debug)]
pub struct Tokens {
    #[command(flatten)]
    input: Input,

    /// Output file name (if omitted, output is written to stdout).
    #[arg(short = 'o', long, help_heading = "Output options")]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long, default_value_t, value_enum, help_heading = "Output options")]
    format: TableFormat,

    /// Draw the table with ASCII instead of Unicode box characters.
    #[arg(long, help_heading = "Output options")]
    ascii: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum TableFormat {
    /// A table drawn with box characters.
    #[default]
    Text,

    /// Comma-separated values.
    Csv,
}

impl Tokens {
    pub fn run(self) -> Result<ExitCode> {
        let (_settings, taxonomy, source) = self.input.load()?;
        let report = analyze(&source.contents, &taxonomy);

        let config = Config {
            format: match self.format {
                TableFormat::Text => Format::Text,
                TableFormat::Csv => Format::Csv,
            },
            text: TextOptions {
                boxes: if self.ascii {
                    Boxes::Ascii
                } else {
                    Boxes::Unicode
                },
                findings: false,
                summary: false,
                ..TextOptions::default()
            },
        };
        let mut driver = <dyn Driver>::new(&config, create_output(self.output.as_deref())?);
        driver.write(&report, &source.contents)?;
        driver.flush()?;
        Ok(ExitCode::SUCCESS)
    }
}
