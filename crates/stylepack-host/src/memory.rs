/*
 * memory.rs
 * Copyright (c) 2025 stylepack contributors
 *
 * MemoryHost implementation: an in-memory virtual asset tree.
 */

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::paths::normalize_path;
use crate::traits::{AssetHost, HostError, HostResult, PathKind};

/// Virtual file tree.
///
/// The tree supports:
/// - Files with arbitrary byte content
/// - Directory structure (automatically created when files are added)
/// - Read, update, remove and list
#[derive(Debug, Default)]
pub struct VirtualTree {
    /// File contents, keyed by normalized absolute path
    files: HashMap<PathBuf, Vec<u8>>,
    /// Directory entries (automatically includes parents of all files)
    directories: HashSet<PathBuf>,
    /// Base directory for relative paths
    root: PathBuf,
}

impl VirtualTree {
    /// Create a new empty tree rooted at `/`.
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/"))
    }

    /// Create a tree with a custom root for relative paths.
    pub fn with_root(root: PathBuf) -> Self {
        let mut tree = Self {
            files: HashMap::new(),
            directories: HashSet::new(),
            root: normalize_path(&Path::new("/").join(root)),
        };
        tree.directories.insert(PathBuf::from("/"));
        let root = tree.root.clone();
        tree.add_directory_and_parents(&root);
        tree
    }

    /// Add a file to the tree.
    ///
    /// This will automatically create all parent directories.
    pub fn add_file(&mut self, path: &Path, contents: Vec<u8>) {
        let normalized = self.absolute(path);
        if let Some(parent) = normalized.parent() {
            self.add_directory_and_parents(parent);
        }
        self.files.insert(normalized, contents);
    }

    /// Remove a file from the tree.
    ///
    /// Returns true if the file existed and was removed.
    pub fn remove_file(&mut self, path: &Path) -> bool {
        let normalized = self.absolute(path);
        self.files.remove(&normalized).is_some()
    }

    /// List all files in the tree.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.files.keys().cloned().collect()
    }

    /// List direct children of a directory.
    pub fn list_directory(&self, path: &Path) -> HostResult<Vec<PathBuf>> {
        let normalized = self.absolute(path);

        if !self.directories.contains(&normalized) {
            return Err(HostError::NotFound(normalized));
        }

        let files = self
            .files
            .keys()
            .filter(|p| p.parent() == Some(normalized.as_path()));
        let dirs = self
            .directories
            .iter()
            .filter(|p| p.parent() == Some(normalized.as_path()) && **p != normalized);

        Ok(files.chain(dirs).cloned().collect())
    }

    /// Check if a path is a file.
    pub fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(&self.absolute(path))
    }

    /// Check if a path is a directory.
    pub fn is_directory(&self, path: &Path) -> bool {
        self.directories.contains(&self.absolute(path))
    }

    /// Read file contents.
    pub fn read_file(&self, path: &Path) -> HostResult<Vec<u8>> {
        let normalized = self.absolute(path);
        match self.files.get(&normalized) {
            Some(contents) => Ok(contents.clone()),
            None => Err(HostError::NotFound(normalized)),
        }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        normalize_path(&self.root.join(path))
    }

    fn add_directory_and_parents(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

/// Host over a [`VirtualTree`].
///
/// Uses RwLock so files can be changed while engines hold a shared
/// reference, which is how tests exercise cache invalidation.
#[derive(Debug)]
pub struct MemoryHost {
    tree: RwLock<VirtualTree>,
    search_paths: Vec<PathBuf>,
}

impl MemoryHost {
    /// Create an empty host whose only search path is `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let tree = VirtualTree::with_root(root.into());
        let search_paths = vec![tree.root().to_path_buf()];
        Self {
            tree: RwLock::new(tree),
            search_paths,
        }
    }

    /// Replace the search paths (relative entries are taken from the tree root).
    pub fn with_search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let tree = self.read();
        let search_paths = paths
            .into_iter()
            .map(|p| normalize_path(&tree.root().join(p.as_ref())))
            .collect();
        drop(tree);
        self.search_paths = search_paths;
        self
    }

    /// Builder-style variant of [`MemoryHost::add_file`].
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Add or replace a file.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        self.write()
            .add_file(path.as_ref(), contents.as_ref().to_vec());
    }

    /// Remove a file, returning whether it existed.
    pub fn remove_file(&self, path: impl AsRef<Path>) -> bool {
        self.write().remove_file(path.as_ref())
    }

    /// List every file in the tree.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read().list_files()
    }

    fn read(&self) -> RwLockReadGuard<'_, VirtualTree> {
        self.tree.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VirtualTree> {
        self.tree.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AssetHost for MemoryHost {
    fn file_read(&self, path: &Path) -> HostResult<Vec<u8>> {
        self.read().read_file(path)
    }

    fn path_exists(&self, path: &Path, kind: Option<PathKind>) -> HostResult<bool> {
        let tree = self.read();
        Ok(match kind {
            None => tree.is_file(path) || tree.is_directory(path),
            Some(PathKind::File) => tree.is_file(path),
            Some(PathKind::Directory) => tree.is_directory(path),
        })
    }

    fn dir_list(&self, path: &Path) -> HostResult<Vec<PathBuf>> {
        self.read().list_directory(path)
    }

    fn cwd(&self) -> HostResult<PathBuf> {
        Ok(self.read().root().to_path_buf())
    }

    fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_creates_parent_directories() {
        let mut tree = VirtualTree::with_root(PathBuf::from("/assets"));
        tree.add_file(Path::new("stylesheets/nested/_dep.less"), b"x".to_vec());

        assert!(tree.is_directory(Path::new("/assets/stylesheets")));
        assert!(tree.is_directory(Path::new("/assets/stylesheets/nested")));
        assert!(tree.is_file(Path::new("/assets/stylesheets/nested/_dep.less")));
        assert!(tree.is_file(Path::new("stylesheets/./nested/../nested/_dep.less")));
    }

    #[test]
    fn test_tree_list_directory() {
        let mut tree = VirtualTree::new();
        tree.add_file(Path::new("/s/a.less"), Vec::new());
        tree.add_file(Path::new("/s/b.less"), Vec::new());
        tree.add_file(Path::new("/s/sub/c.less"), Vec::new());

        let mut entries = tree.list_directory(Path::new("/s")).unwrap();
        entries.sort();
        assert_eq!(
            entries,
            vec![
                PathBuf::from("/s/a.less"),
                PathBuf::from("/s/b.less"),
                PathBuf::from("/s/sub"),
            ]
        );

        assert!(matches!(
            tree.list_directory(Path::new("/nowhere")),
            Err(HostError::NotFound(_))
        ));
    }

    #[test]
    fn test_tree_remove_file() {
        let mut tree = VirtualTree::new();
        tree.add_file(Path::new("/a.less"), Vec::new());
        assert!(tree.remove_file(Path::new("/a.less")));
        assert!(!tree.remove_file(Path::new("/a.less")));
        assert!(tree.read_file(Path::new("/a.less")).is_err());
    }

    #[test]
    fn test_memory_host_roundtrip() {
        let host = MemoryHost::new("/app").with_file("styles/site.less", "body {}");
        let path = Path::new("/app/styles/site.less");

        assert!(host.is_file(path).unwrap());
        assert!(host.is_dir(Path::new("/app/styles")).unwrap());
        assert_eq!(host.file_read_string(path).unwrap(), "body {}");
        assert_eq!(host.search_paths(), &[PathBuf::from("/app")]);
        assert_eq!(host.cwd().unwrap(), PathBuf::from("/app"));
    }

    #[test]
    fn test_memory_host_updates_visible_through_shared_reference() {
        let host = std::sync::Arc::new(MemoryHost::new("/app").with_file("a.less", "one"));
        let shared = std::sync::Arc::clone(&host);

        host.add_file("a.less", "two");
        assert_eq!(
            shared.file_read_string(Path::new("/app/a.less")).unwrap(),
            "two"
        );
    }

    #[test]
    fn test_memory_host_search_paths() {
        let host = MemoryHost::new("/app").with_search_paths(["vendor", "/shared/styles"]);
        assert_eq!(
            host.search_paths(),
            &[PathBuf::from("/app/vendor"), PathBuf::from("/shared/styles")]
        );
    }
}
