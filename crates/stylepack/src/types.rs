//! Core types shared by the scanner, resolver, lookup and walker.
//!
//! Copyright (c) 2025 stylepack contributors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

use stylepack_host::normalize_path;

/// Identity of a resolvable asset: its normalized absolute path in the host tree.
///
/// Two identities are equal iff their normalized paths are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(PathBuf);

impl AssetId {
    /// Create an identity from a path, normalizing `.` and `..` lexically.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(normalize_path(path.as_ref()))
    }

    /// The asset's path.
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Directory containing the asset.
    pub fn dir(&self) -> &Path {
        self.0.parent().unwrap_or(Path::new("/"))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for AssetId {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// How the engine treats an asset's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    /// Dialect source: its own imports are expanded before splicing
    Stylesheet,
    /// Plain CSS: spliced verbatim, never scanned
    Css,
    /// Anything else (images, scripts): never requirable
    Other,
}

impl ContentType {
    /// Whether an asset of this type may satisfy an import.
    pub fn is_requirable(self) -> bool {
        matches!(self, ContentType::Stylesheet | ContentType::Css)
    }
}

/// The two directive forms recognized by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `@import "path";`
    Standard,
    /// `@import "dir/*";` or a bracket character class
    Glob,
}

/// One import directive found in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference<'a> {
    /// Path text between the quotes
    pub raw_path: &'a str,
    /// Standard or glob
    pub kind: ImportKind,
    /// Byte range of the whole directive (`@import` through `;`)
    pub span: Range<usize>,
    /// File the directive appears in
    pub source_file: &'a AssetId,
}

/// An import target that resolved to a requirable asset.
#[derive(Debug, Clone)]
pub struct ResolvedImport {
    pub identity: AssetId,
    pub content_type: ContentType,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_normalizes() {
        let a = AssetId::new("/app/styles/./sub/../dep.less");
        let b = AssetId::new("/app/styles/dep.less");
        assert_eq!(a, b);
        assert_eq!(a.dir(), Path::new("/app/styles"));
        assert_eq!(a.to_string(), "/app/styles/dep.less");
    }

    #[test]
    fn test_requirable_content_types() {
        assert!(ContentType::Stylesheet.is_requirable());
        assert!(ContentType::Css.is_requirable());
        assert!(!ContentType::Other.is_requirable());
    }

    #[test]
    fn test_asset_id_serializes_as_path() {
        let id = AssetId::new("/app/a.less");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"/app/a.less\"");
    }
}
