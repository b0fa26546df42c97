/*
 * compiler.rs
 * Copyright (c) 2025 stylepack contributors
 *
 * The narrow interface the import engine uses to reach a stylesheet compiler.
 */

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

/// Output formatting requested from the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// Human readable, one declaration per line
    #[default]
    Expanded,
    /// Minified
    Compressed,
}

/// Input handed to a [`StylesheetCompiler`].
///
/// `source` is fully expanded: every resolvable import has already been
/// spliced in, so only passthrough `@import` directives remain.
#[derive(Debug, Clone)]
pub struct CompileRequest<'a> {
    /// Expanded source text
    pub source: &'a str,
    /// Root file the source was expanded from (for diagnostics)
    pub filename: &'a Path,
    /// Directories the compiler may search for its own module system
    pub load_paths: &'a [PathBuf],
    /// Requested output style
    pub style: OutputStyle,
}

/// A compiler failure, usually a syntax error in the expanded source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerError {
    /// Message as reported by the compiler
    pub message: String,
    /// 1-based line in the expanded source, when reported
    pub line: Option<usize>,
    /// 1-based column, when reported
    pub column: Option<usize>,
}

/// Trailing location line in compiler diagnostics, e.g. `  input.scss 3:14  root stylesheet`.
static LOCATION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)\b(\d+):(\d+)\s+root stylesheet\s*$").unwrap());

impl CompilerError {
    /// Create an error without location information.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Attach a location.
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Build an error from a rendered diagnostic, picking up the
    /// `line:column  root stylesheet` trailer when present.
    pub fn from_diagnostic(diagnostic: impl Into<String>) -> Self {
        let message = diagnostic.into();
        let location = LOCATION_LINE.captures(&message).and_then(|caps| {
            let line = caps.get(1)?.as_str().parse().ok()?;
            let column = caps.get(2)?.as_str().parse().ok()?;
            Some((line, column))
        });
        match location {
            Some((line, column)) => Self::new(message).at(line, column),
            None => Self::new(message),
        }
    }
}

impl std::fmt::Display for CompilerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{} (line {}, column {})", self.message, line, column),
            _ => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for CompilerError {}

/// A stylesheet compiler: expanded source in, CSS out.
///
/// Implementations must be pure with respect to the request: the same
/// request always yields the same output. The engine relies on that when it
/// caches results keyed by `name()` and `version()`.
pub trait StylesheetCompiler: Send + Sync {
    /// Backend name (part of the cache key)
    fn name(&self) -> &str;

    /// Backend version (part of the cache key)
    fn version(&self) -> &str;

    /// Compile expanded source to CSS.
    fn compile(&self, request: &CompileRequest<'_>) -> Result<String, CompilerError>;
}
