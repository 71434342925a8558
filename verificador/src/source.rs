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

//! Program text and where it came from.

use std::{fs, io::Result as IoResult, path::Path};

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use log::debug;

/// A program's text, decoded into UTF-8.
#[derive(Clone, Debug)]
pub struct SourceFile {
    /// `None` if this text is not associated with a file.
    pub file_name: Option<String>,

    /// Original encoding.
    pub encoding: &'static Encoding,

    /// Whether decoding replaced malformed input.
    pub malformed: bool,

    pub contents: String,
}

impl SourceFile {
    /// Reads `path` and decodes it from `encoding`.
    ///
    /// If `encoding` is `None`, a byte order mark decides the encoding, or
    /// failing that, the encoding is guessed from the contents.
    pub fn for_file<P>(path: P, encoding: Option<&'static Encoding>) -> IoResult<Self>
    where
        P: AsRef<Path>,
    {
        let bytes = fs::read(path.as_ref())?;
        let mut source = Self::for_bytes(&bytes, encoding);
        source.file_name = Some(path.as_ref().to_string_lossy().to_string());
        Ok(source)
    }

    /// Decodes `bytes` as [Self::for_file] does.
    pub fn for_bytes(bytes: &[u8], encoding: Option<&'static Encoding>) -> Self {
        let encoding = encoding
            .or_else(|| Encoding::for_bom(bytes).map(|(encoding, _)| encoding))
            .unwrap_or_else(|| {
                let mut encoding_detector = EncodingDetector::new();
                encoding_detector.feed(bytes, true);
                encoding_detector.guess(None, true)
            });
        let (contents, malformed) = encoding.decode_with_bom_removal(bytes);
        debug!("decoded {} bytes as {}", bytes.len(), encoding.name());
        Self {
            file_name: None,
            encoding,
            malformed,
            contents: contents.into_owned(),
        }
    }

    /// Returns a `SourceFile` for `contents`.
    pub fn for_string(contents: String) -> Self {
        Self {
            file_name: None,
            encoding: UTF_8,
            malformed: false,
            contents,
        }
    }

    /// The name to use for this text in messages.
    pub fn name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("<entrada>")
    }
}
