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

use std::{io::Write, path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Args, ValueEnum};
use verificador::taxonomy::Taxonomy;

use crate::create_output;

/// Write the built-in taxonomy, as a starting point for a custom one.
#[derive(Args, Clone, Debug)]
pub struct ShowTaxonomy {
    /// Output file name (if omitted, output is written to stdout).
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format (if omitted, it is inferred from the output file name's
    /// extension, defaulting to JSON).
    #[arg(short = 'f', long)]
    format: Option<TaxonomyFormat>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum TaxonomyFormat {
    #[default]
    Json,
    Toml,
}

impl ShowTaxonomy {
    pub fn run(self) -> Result<ExitCode> {
        let format = self.format.unwrap_or_else(|| {
            match self
                .output
                .as_ref()
                .and_then(|path| path.extension())
                .and_then(|extension| extension.to_str())
            {
                Some("toml") => TaxonomyFormat::Toml,
                _ => TaxonomyFormat::Json,
            }
        });
        let taxonomy = Taxonomy::default();
        let text = match format {
            TaxonomyFormat::Json => serde_json::to_string_pretty(&taxonomy)?,
            TaxonomyFormat::Toml => toml::to_string_pretty(&taxonomy)?,
        };
        let mut output = create_output(self.output.as_deref())?;
        writeln!(output, "{text}")?;
        output.flush()?;
        Ok(ExitCode::SUCCESS)
    }
}
