/*
 * native.rs
 * Copyright (c) 2025 stylepack contributors
 *
 * NativeHost implementation backed by std::fs.
 */

use std::path::{Path, PathBuf};

use crate::paths::normalize_path;
use crate::traits::{AssetHost, HostError, HostResult, PathKind};

/// Host with full filesystem access.
///
/// Search paths are made absolute against the working directory at
/// construction time, so later `chdir` calls don't change resolution.
#[derive(Debug, Clone, Default)]
pub struct NativeHost {
    search_paths: Vec<PathBuf>,
}

impl NativeHost {
    /// Create a host with no search paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host with the given ordered search paths.
    pub fn with_search_paths<I, P>(paths: I) -> HostResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let cwd = std::env::current_dir()?;
        let search_paths = paths
            .into_iter()
            .map(|p| normalize_path(&cwd.join(p.as_ref())))
            .collect();
        Ok(Self { search_paths })
    }
}

impl AssetHost for NativeHost {
    fn file_read(&self, path: &Path) -> HostResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => HostError::NotFound(path.to_path_buf()),
            _ => HostError::Io(e),
        })
    }

    fn path_exists(&self, path: &Path, kind: Option<PathKind>) -> HostResult<bool> {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(HostError::Io(e)),
        };
        Ok(match kind {
            None => true,
            Some(PathKind::File) => metadata.is_file(),
            Some(PathKind::Directory) => metadata.is_dir(),
        })
    }

    fn dir_list(&self, path: &Path) -> HostResult<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            entries.push(entry?.path());
        }
        Ok(entries)
    }

    fn cwd(&self) -> HostResult<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}
