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

#![no_main]

use libfuzzer_sys::fuzz_target;
use verificador::{
    lex::{
        scan::{lines, scan_line},
        segment::Segmenter,
    },
    taxonomy::Taxonomy,
};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let taxonomy = Taxonomy::default();
        let segmenter = Segmenter::for_taxonomy(&taxonomy);
        for line in lines(input) {
            let tokens = scan_line(line, &segmenter, &taxonomy);
            let mut column = 1;
            for token in &tokens {
                assert!(!token.lexeme.is_empty());
                assert!(token.column >= column);
                column = token.end_column();
            }
        }
        let _ = verificador::analyze(input, &taxonomy);
    }
});
