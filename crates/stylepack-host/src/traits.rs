/*
 * traits.rs
 * Copyright (c) 2025 stylepack contributors
 *
 * Defines the AssetHost trait and supporting types for the host abstraction layer.
 *
 * This abstraction allows the import engine to run against different asset trees:
 * - NativeHost: the real filesystem, rooted at one or more search paths
 * - MemoryHost: an in-memory virtual tree (tests, embedding, sandboxed builds)
 */

use std::io;
use std::path::{Path, PathBuf};

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;

/// Errors that can occur during host operations
#[derive(Debug)]
pub enum HostError {
    /// Standard I/O error
    Io(io::Error),

    /// Path does not exist in the asset tree
    NotFound(PathBuf),

    /// Operation not supported by this host
    NotSupported(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::Io(e) => write!(f, "I/O error: {}", e),
            HostError::NotFound(path) => write!(f, "Path not found: {}", path.display()),
            HostError::NotSupported(msg) => write!(f, "Operation not supported: {}", msg),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for HostError {
    fn from(e: io::Error) -> Self {
        HostError::Io(e)
    }
}

/// Type of path in the asset tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

/// Trait defining the host primitives the import engine needs.
///
/// Implementations provide the actual asset access. The engine never caches
/// through this trait; every call reflects the current state of the tree.
///
/// # Search paths
///
/// `search_paths` is the ordered list of load paths. Logical (non-absolute,
/// non-`./`) import candidates are tried under each of them in order, and
/// the first hit wins.
///
/// # Processed content
///
/// `file_read` returns the content the engine should see. Hosts that run
/// their own preprocessors (for example template evaluation of `.erb`
/// assets) do so before returning.
pub trait AssetHost: Send + Sync {
    // ═══════════════════════════════════════════════════════════════════════
    // FILE OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════

    /// Read entire file contents as bytes.
    fn file_read(&self, path: &Path) -> HostResult<Vec<u8>>;

    /// Read file as string with UTF-8 encoding.
    ///
    /// Default implementation reads bytes and converts to string.
    fn file_read_string(&self, path: &Path) -> HostResult<String> {
        let bytes = self.file_read(path)?;
        String::from_utf8(bytes).map_err(|e| {
            HostError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid UTF-8 in file: {}", e),
            ))
        })
    }

    /// Check if path exists, optionally filtering by type.
    fn path_exists(&self, path: &Path, kind: Option<PathKind>) -> HostResult<bool>;

    /// Check if path exists and is a file.
    ///
    /// Convenience method that calls `path_exists` with `PathKind::File`.
    fn is_file(&self, path: &Path) -> HostResult<bool> {
        self.path_exists(path, Some(PathKind::File))
    }

    /// Check if path exists and is a directory.
    ///
    /// Convenience method that calls `path_exists` with `PathKind::Directory`.
    fn is_dir(&self, path: &Path) -> HostResult<bool> {
        self.path_exists(path, Some(PathKind::Directory))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // DIRECTORY OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════

    /// List directory entries (excluding . and ..) as full paths.
    ///
    /// Order is unspecified; callers sort when they need determinism.
    fn dir_list(&self, path: &Path) -> HostResult<Vec<PathBuf>>;

    /// Get current working directory.
    fn cwd(&self) -> HostResult<PathBuf>;

    // ═══════════════════════════════════════════════════════════════════════
    // LOAD PATHS
    // ═══════════════════════════════════════════════════════════════════════

    /// Ordered search paths used to resolve logical asset paths.
    fn search_paths(&self) -> &[PathBuf];
}
