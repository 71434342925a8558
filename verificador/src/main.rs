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
    fs::File,
    io::{Write, stdout},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use encoding_rs::Encoding;
use log::{LevelFilter, warn};
use thiserror::Error as ThisError;
use verificador::{settings::Settings, source::SourceFile, taxonomy::Taxonomy};

use crate::{check::Check, show_taxonomy::ShowTaxonomy, tokens::Tokens};

mod check;
mod show_taxonomy;
mod tokens;

/// Static checker for programs in a small teaching language with Spanish
/// keywords.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more details.  Repeat for even more.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Debug)]
enum Command {
    Check(Check),
    Tokens(Tokens),
    Taxonomy(ShowTaxonomy),
}

impl Command {
    fn run(self) -> Result<ExitCode> {
        match self {
            Command::Check(check) => check.run(),
            Command::Tokens(tokens) => tokens.run(),
            Command::Taxonomy(show_taxonomy) => show_taxonomy.run(),
        }
    }
}

#[derive(ThisError, Debug)]
#[error("{0}: unknown encoding")]
struct UnknownEncodingError(String);

fn parse_encoding(arg: &str) -> Result<&'static Encoding, UnknownEncodingError> {
    match Encoding::for_label_no_replacement(arg.as_bytes()) {
        Some(encoding) => Ok(encoding),
        None => Err(UnknownEncodingError(arg.to_string())),
    }
}

/// Options for reading a program and configuring its analysis.
#[derive(Args, Clone, Debug)]
struct Input {
    /// Program to check.
    input: PathBuf,

    /// The encoding to use for reading the program (if omitted, it is
    /// detected).
    #[arg(short = 'e', long, value_parser = parse_encoding, help_heading = "Input options")]
    encoding: Option<&'static Encoding>,

    /// Taxonomy file (`.json` or `.toml`) to use instead of the built-in one.
    #[arg(short = 't', long, help_heading = "Input options")]
    taxonomy: Option<PathBuf>,

    /// Configuration file (by default, `verificador.toml` if it exists).
    #[arg(short = 'c', long, help_heading = "Input options")]
    config: Option<PathBuf>,
}

impl Input {
    /// Reads the configuration, the taxonomy, and the program.
    fn load(&self) -> Result<(Settings, Taxonomy, SourceFile)> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(taxonomy) = &self.taxonomy {
            settings.taxonomy = Some(taxonomy.clone());
        }
        let taxonomy = match &settings.taxonomy {
            Some(path) => Taxonomy::from_file(path)?,
            None => Taxonomy::default(),
        };
        let source = SourceFile::for_file(&self.input, self.encoding)
            .with_context(|| format!("{}: could not read program", self.input.display()))?;
        if source.malformed {
            warn!(
                "{}: input is not valid {}; malformed sequences were replaced",
                source.name(),
                source.encoding.name()
            );
        }
        Ok((settings, taxonomy, source))
    }
}

/// Opens `path` for writing, or stdout if it is `None`.
fn create_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("{}: could not create", path.display()))?,
        ),
        None => Box::new(stdout()),
    })
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .init();
    cli.command.run()
}
