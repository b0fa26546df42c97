//! Import directive scanning.
//!
//! Copyright (c) 2025 stylepack contributors
//!
//! Imports sit at statement boundaries, so a line-anchored pattern is enough:
//!
//! ```text
//! @import "variables";
//!   @import 'mixins/buttons';
//! @import "components/*";
//! ```
//!
//! Directives that begin inside a `/* ... */` block comment are skipped.

use once_cell::sync::Lazy;
use regex::{CaptureMatches, Regex};
use std::ops::Range;

use crate::types::{AssetId, ImportKind, ImportReference};

/// Standard and glob imports, one per line, leading whitespace ignored.
///
/// Group 1 is the whole directive (the substitution span), group 2 the path.
static IMPORT_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[ \t]*(@import[ \t]*['"]([^'"\r\n]+)['"][ \t]*;)"#).unwrap()
});

/// Wildcard metacharacters that turn an import into a glob import.
static GLOB_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*|\[.+\]").unwrap());

/// Whether an import path is a glob.
pub fn is_glob(path: &str) -> bool {
    GLOB_PATTERN.is_match(path)
}

/// Scanner for import directives.
///
/// Stateless; every call to [`ImportScanner::scan`] starts a fresh pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImportScanner;

impl ImportScanner {
    pub fn new() -> Self {
        Self
    }

    /// Lazily iterate the import directives in `source`.
    pub fn scan<'a>(&self, source: &'a str, source_file: &'a AssetId) -> Imports<'a> {
        Imports {
            matches: IMPORT_DIRECTIVE.captures_iter(source),
            comments: block_comment_ranges(source),
            source_file,
        }
    }
}

/// Iterator returned by [`ImportScanner::scan`].
pub struct Imports<'a> {
    matches: CaptureMatches<'static, 'a>,
    comments: Vec<Range<usize>>,
    source_file: &'a AssetId,
}

impl<'a> Iterator for Imports<'a> {
    type Item = ImportReference<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for captures in self.matches.by_ref() {
            let (Some(directive), Some(path)) = (captures.get(1), captures.get(2)) else {
                continue;
            };
            if self.comments.iter().any(|c| c.contains(&directive.start())) {
                continue;
            }
            let raw_path = path.as_str();
            return Some(ImportReference {
                raw_path,
                kind: if is_glob(raw_path) {
                    ImportKind::Glob
                } else {
                    ImportKind::Standard
                },
                span: directive.range(),
                source_file: self.source_file,
            });
        }
        None
    }
}

/// Byte ranges covered by `/* ... */` comments, ignoring comment markers
/// inside quoted strings and `//` line comments.
fn block_comment_ranges(source: &str) -> Vec<Range<usize>> {
    let bytes = source.as_bytes();
    let mut ranges = Vec::new();
    let mut i = 0;
    let mut quote: Option<u8> = None;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q || b == b'\n' {
                quote = None;
            }
            i += 1;
            continue;
        }
        match (b, bytes.get(i + 1)) {
            (b'"' | b'\'', _) => {
                quote = Some(b);
                i += 1;
            }
            (b'/', Some(b'*')) => {
                let end = source[i + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |offset| i + 2 + offset + 2);
                ranges.push(i..end);
                i = end;
            }
            (b'/', Some(b'/')) => {
                i = source[i..].find('\n').map_or(bytes.len(), |offset| i + offset);
            }
            _ => i += 1,
        }
    }
    ranges
}
