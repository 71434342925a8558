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

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::Args;
use log::info;
use verificador::{
    engine::Engine,
    message::Severity,
    output::{
        Config, Driver, Format,
        text::{Boxes, TextOptions},
    },
};

use crate::{Input, create_output};

/// Check a program and report errors, warnings, and token counts.
///
/// Exits with a failure status if the program has errors, or with
/// `--deny-warnings`, if it has warnings.
#[derive(Args, Clone, Debug)]
pub struct Check {
    #[command(flatten)]
    input: Input,

    /// Output file name (if omitted, output is written to stdout).
    #[arg(short = 'o', long, help_heading = "Output options")]
    output: Option<PathBuf>,

    /// Output format (if omitted, it is inferred from the output file name's
    /// extension, defaulting to text).
    #[arg(short = 'f', long, help_heading = "Output options")]
    format: Option<Format>,

    /// Maximum number of errors to display.
    #[arg(long, help_heading = "Output options")]
    max_errors: Option<usize>,

    /// Maximum number of warnings to display.
    #[arg(long, help_heading = "Output options")]
    max_warnings: Option<usize>,

    /// Draw tables with ASCII instead of Unicode box characters.
    #[arg(long, help_heading = "Output options")]
    ascii: bool,

    /// Fail if there are warnings, even without errors.
    #[arg(long)]
    deny_warnings: bool,
}

impl Check {
    pub fn run(self) -> Result<ExitCode> {
        let (mut settings, taxonomy, source) = self.input.load()?;
        if let Some(max_errors) = self.max_errors {
            settings.max_messages[Severity::Error] = max_errors;
        }
        if let Some(max_warnings) = self.max_warnings {
            settings.max_messages[Severity::Warning] = max_warnings;
        }
        settings.deny_warnings |= self.deny_warnings;

        let report = Engine::new(Arc::new(taxonomy)).analyze(&source.contents);
        info!(
            "{}: {} errors, {} warnings",
            source.name(),
            report.errors.len(),
            report.warnings.len()
        );

        let format = self
            .format
            .or_else(|| self.output.as_deref().and_then(Format::from_path))
            .unwrap_or_default();
        let config = Config {
            format,
            text: TextOptions {
                boxes: if self.ascii {
                    Boxes::Ascii
                } else {
                    Boxes::Unicode
                },
                max_messages: settings.max_messages,
                ..TextOptions::default()
            },
        };
        let mut driver = <dyn Driver>::new(&config, create_output(self.output.as_deref())?);
        driver.write(&report, &source.contents)?;
        driver.flush()?;

        Ok(
            if settings.fails(report.errors.len(), report.warnings.len()) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            },
        )
    }
}
