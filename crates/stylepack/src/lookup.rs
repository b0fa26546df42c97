//! Uniform access to the host asset tree.
//!
//! Copyright (c) 2025 stylepack contributors
//!
//! `AssetLookup` turns candidate paths into [`AssetId`]s, classifies assets
//! by content type and reads them. It never caches: every call goes to the
//! host, so edits to the tree are visible to the next compile.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use stylepack_host::{AssetHost, normalize_path};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::types::{AssetId, ContentType};

/// Content types keyed by file-name suffix; the longest matching suffix wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimeTable {
    entries: Vec<(String, ContentType)>,
}

impl MimeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `suffix` (including the leading dot). Re-registering replaces.
    pub fn register(&mut self, suffix: &str, content_type: ContentType) {
        self.entries.retain(|(s, _)| s != suffix);
        self.entries.push((suffix.to_string(), content_type));
        self.entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Content type of a file name.
    pub fn content_type(&self, file_name: &str) -> ContentType {
        self.entries
            .iter()
            .find(|(suffix, _)| file_name.len() > suffix.len() && file_name.ends_with(suffix))
            .map_or(ContentType::Other, |(_, content_type)| *content_type)
    }
}

/// Host-backed asset lookup.
#[derive(Clone)]
pub struct AssetLookup {
    host: Arc<dyn AssetHost>,
    mime: MimeTable,
    root: Option<PathBuf>,
}

impl std::fmt::Debug for AssetLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetLookup")
            .field("host", &"<AssetHost>")
            .field("search_paths", &self.host.search_paths())
            .field("root", &self.root)
            .finish()
    }
}

impl AssetLookup {
    /// `root` overrides the default root (the first search path).
    pub fn new(host: Arc<dyn AssetHost>, mime: MimeTable, root: Option<PathBuf>) -> Self {
        Self { host, mime, root }
    }

    /// The underlying host.
    pub fn host(&self) -> &Arc<dyn AssetHost> {
        &self.host
    }

    /// Resolve a candidate path for an import written in a file under `base_dir`.
    ///
    /// - absolute candidates are checked as-is
    /// - `./` and `../` candidates are joined to `base_dir`
    /// - anything else is tried under each search path in order
    ///
    /// Returns `None` when nothing exists; that is a normal outcome.
    pub fn resolve(&self, candidate: &Path, base_dir: &Path) -> Option<AssetId> {
        if candidate.is_absolute() {
            return self.existing(candidate);
        }
        if stylepack_host::is_explicitly_relative(candidate) {
            return self.existing(&base_dir.join(candidate));
        }
        self.host
            .search_paths()
            .iter()
            .find_map(|search_path| self.existing(&search_path.join(candidate)))
    }

    /// Resolve a relative candidate against `dir` only, ignoring search paths.
    pub fn resolve_in(&self, candidate: &Path, dir: &Path) -> Option<AssetId> {
        if candidate.is_absolute() {
            return None;
        }
        self.existing(&dir.join(candidate))
    }

    /// Identity of an existing file given by absolute or cwd-relative path.
    pub fn identify(&self, path: &Path) -> Option<AssetId> {
        if path.is_absolute() {
            return self.existing(path);
        }
        let cwd = self.host.cwd().ok()?;
        self.existing(&cwd.join(path))
    }

    pub fn content_type(&self, id: &AssetId) -> ContentType {
        id.path()
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(ContentType::Other, |name| self.mime.content_type(name))
    }

    pub fn is_requirable(&self, id: &AssetId) -> bool {
        self.content_type(id).is_requirable()
    }

    /// Read an asset as text.
    pub fn read(&self, id: &AssetId) -> Result<String> {
        self.host
            .file_read_string(id.path())
            .map_err(|source| EngineError::Host {
                path: id.clone(),
                source,
            })
    }

    /// Entries of a directory; missing directories list as empty.
    pub fn list_dir(&self, dir: &Path) -> Vec<PathBuf> {
        match self.host.dir_list(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot list {}: {}", dir.display(), e);
                Vec::new()
            }
        }
    }

    pub fn is_file(&self, path: &Path) -> bool {
        self.host.is_file(path).unwrap_or(false)
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.host.is_dir(path).unwrap_or(false)
    }

    /// Root that root-relative imports are computed against for `path`:
    /// the first search path containing it, else the configured root, else
    /// the file's own directory.
    pub fn root_for(&self, path: &Path) -> PathBuf {
        if let Some(search_path) = self
            .host
            .search_paths()
            .iter()
            .find(|search_path| path.starts_with(search_path))
        {
            return search_path.clone();
        }
        if let Some(root) = &self.root {
            return root.clone();
        }
        path.parent().map_or_else(|| PathBuf::from("/"), Path::to_path_buf)
    }

    fn existing(&self, path: &Path) -> Option<AssetId> {
        let normalized = normalize_path(path);
        self.is_file(&normalized).then(|| AssetId::new(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use stylepack_host::MemoryHost;

    fn lookup(host: MemoryHost) -> AssetLookup {
        AssetLookup::new(Arc::new(host), EngineConfig::default().mime_table(), None)
    }

    #[test]
    fn test_mime_table_longest_suffix_wins() {
        let table = EngineConfig::default().mime_table();
        assert_eq!(table.content_type("site.less"), ContentType::Stylesheet);
        assert_eq!(table.content_type("site.css"), ContentType::Css);
        assert_eq!(table.content_type("site.css.less"), ContentType::Stylesheet);
        assert_eq!(
            table.content_type("site.css.less.erb"),
            ContentType::Stylesheet
        );
        assert_eq!(table.content_type("logo.png"), ContentType::Other);
        assert_eq!(table.content_type(".less"), ContentType::Other);
    }

    #[test]
    fn test_resolve_logical_path_in_search_order() {
        let host = MemoryHost::new("/app")
            .with_search_paths(["/app/styles", "/app/vendor"])
            .with_file("vendor/dep.less", "vendor")
            .with_file("styles/dep.less", "app");
        let lookup = lookup(host);

        let id = lookup
            .resolve(Path::new("dep.less"), Path::new("/app/styles/sub"))
            .unwrap();
        assert_eq!(id, AssetId::new("/app/styles/dep.less"));
    }

    #[test]
    fn test_resolve_explicit_relative_uses_base_dir() {
        let host = MemoryHost::new("/app").with_file("styles/sub/dep.less", "");
        let lookup = lookup(host);

        assert_eq!(
            lookup.resolve(Path::new("./dep.less"), Path::new("/app/styles/sub")),
            Some(AssetId::new("/app/styles/sub/dep.less"))
        );
        assert_eq!(
            lookup.resolve(Path::new("../sub/dep.less"), Path::new("/app/styles/other")),
            Some(AssetId::new("/app/styles/sub/dep.less"))
        );
        assert_eq!(
            lookup.resolve(Path::new("./dep.less"), Path::new("/app")),
            None
        );
    }

    #[test]
    fn test_resolve_in_skips_search_paths() {
        let host = MemoryHost::new("/app")
            .with_search_paths(["/app/vendor"])
            .with_file("styles/dep.less", "")
            .with_file("vendor/dep.less", "");
        let lookup = lookup(host);

        assert_eq!(
            lookup.resolve_in(Path::new("dep.less"), Path::new("/app/styles")),
            Some(AssetId::new("/app/styles/dep.less"))
        );
        assert_eq!(
            lookup.resolve_in(Path::new("/app/vendor/dep.less"), Path::new("/app/styles")),
            None
        );
    }

    #[test]
    fn test_resolve_ignores_directories() {
        let host = MemoryHost::new("/app").with_file("dep/inner.less", "");
        let lookup = lookup(host);
        assert_eq!(lookup.resolve(Path::new("dep"), Path::new("/app")), None);
    }

    #[test]
    fn test_requirable_and_read() {
        let host = MemoryHost::new("/app")
            .with_file("a.less", "@a: 1;")
            .with_file("logo.png", "png");
        let lookup = lookup(host);

        let a = AssetId::new("/app/a.less");
        assert!(lookup.is_requirable(&a));
        assert_eq!(lookup.read(&a).unwrap(), "@a: 1;");
        assert!(!lookup.is_requirable(&AssetId::new("/app/logo.png")));

        let err = lookup.read(&AssetId::new("/app/missing.less")).unwrap_err();
        assert!(matches!(err, EngineError::Host { .. }));
    }

    #[test]
    fn test_root_for() {
        let host = MemoryHost::new("/app").with_search_paths(["/app/styles", "/app/vendor"]);
        let lookup = lookup(host);

        assert_eq!(
            lookup.root_for(Path::new("/app/vendor/lib/x.less")),
            PathBuf::from("/app/vendor")
        );
        assert_eq!(
            lookup.root_for(Path::new("/elsewhere/x.less")),
            PathBuf::from("/elsewhere")
        );

        let rooted = AssetLookup::new(
            lookup.host().clone(),
            MimeTable::new(),
            Some(PathBuf::from("/app")),
        );
        assert_eq!(
            rooted.root_for(Path::new("/elsewhere/x.less")),
            PathBuf::from("/app")
        );
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let lookup = lookup(MemoryHost::new("/app"));
        assert!(lookup.list_dir(Path::new("/app/nope")).is_empty());
    }
}
