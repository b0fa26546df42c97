//! Candidate path generation for import targets.
//!
//! Copyright (c) 2025 stylepack contributors
//!
//! For `@import "mixins/buttons";` inside `/app/styles/admin/site.less`
//! (root `/app/styles`) the candidates start with the root-relative forms
//! and fall back to the path as written. Within each group the extension
//! variants come first and the bare path last:
//!
//! ```text
//! admin/mixins/buttons.less    admin/mixins/_buttons.less
//! admin/mixins/buttons.css     admin/mixins/_buttons.css
//! ...
//! admin/mixins/buttons         admin/mixins/_buttons
//! mixins/buttons.less          mixins/_buttons.less
//! ...
//! mixins/buttons               mixins/_buttons
//! ```

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use stylepack_host::normalize_path;

use crate::config::EngineConfig;

/// Generates ordered candidate paths for an import.
#[derive(Debug, Clone)]
pub struct PathResolver {
    partial_prefix: String,
    extensions: Vec<String>,
}

impl PathResolver {
    pub fn new(partial_prefix: impl Into<String>, extensions: Vec<String>) -> Self {
        Self {
            partial_prefix: partial_prefix.into(),
            extensions,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.partial_prefix.clone(), config.import_extensions())
    }

    /// Candidate paths for `raw_path` imported from the file `base_path`,
    /// highest priority first, without duplicates.
    pub fn candidates(&self, raw_path: &str, base_path: &Path, root_path: &Path) -> Vec<PathBuf> {
        let path = PathBuf::from(raw_path);
        let mut candidates = Vec::new();

        if let Some(root_relative) = self.root_relative(&path, base_path, root_path) {
            self.push_variants(&mut candidates, &root_relative);
        }
        self.push_variants(&mut candidates, &path);

        let mut seen = std::collections::HashSet::new();
        candidates.retain(|candidate| seen.insert(candidate.clone()));
        candidates
    }

    /// The partialized form of `path`, or `None` when it already names a partial.
    pub fn partialize(&self, path: &Path) -> Option<PathBuf> {
        let name = path.file_name()?.to_str()?;
        if name.starts_with(&self.partial_prefix) {
            return None;
        }
        Some(path.with_file_name(format!("{}{}", self.partial_prefix, name)))
    }

    /// `path` expressed relative to the root, when the importer lives below it.
    fn root_relative(&self, path: &Path, base_path: &Path, root_path: &Path) -> Option<PathBuf> {
        if !path.is_relative() || path.components().next() == Some(Component::CurDir) {
            return None;
        }
        let base_dir = base_path.parent()?;
        if base_dir == root_path {
            return None;
        }
        let relative_dir = base_dir.strip_prefix(root_path).ok()?;
        let joined = normalize_path(&relative_dir.join(path));
        // Escaping the root would turn a logical path into a `../` one
        if joined.components().next() == Some(Component::ParentDir) {
            return None;
        }
        Some(joined)
    }

    fn push_variants(&self, candidates: &mut Vec<PathBuf>, path: &Path) {
        let mut forms = vec![path.to_path_buf()];
        forms.extend(self.partialize(path));

        for extension in &self.extensions {
            for form in &forms {
                candidates.push(with_extension_appended(form, extension));
            }
        }
        // The path as written goes last, after every extension variant
        candidates.extend(forms);
    }
}

fn with_extension_appended(path: &Path, extension: &str) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(extension);
    PathBuf::from(s)
}
