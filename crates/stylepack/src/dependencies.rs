//! The set of assets a compiled stylesheet depends on.
//!
//! Copyright (c) 2025 stylepack contributors

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

use crate::digest::ContentDigest;
use crate::types::AssetId;

/// A dependency and the digest of the content the walker saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub path: AssetId,
    pub digest: ContentDigest,
}

/// Insertion-ordered, identity-unique set of dependencies.
///
/// Every asset whose content influenced the output is recorded exactly
/// once, in the order it was first reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    entries: LinkedHashMap<AssetId, ContentDigest>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an asset. Returns `false` when it was already present, in
    /// which case the first recorded digest is kept.
    pub fn insert(&mut self, id: AssetId, digest: ContentDigest) -> bool {
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, digest);
        true
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.entries.contains_key(id)
    }

    /// Digest recorded for `id`.
    pub fn digest(&self, id: &AssetId) -> Option<&ContentDigest> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identities in first-reached order.
    pub fn iter(&self) -> impl Iterator<Item = &AssetId> {
        self.entries.keys()
    }

    /// Add every member of `other` not already present.
    pub fn extend(&mut self, other: DependencySet) {
        for (id, digest) in other.entries {
            self.insert(id, digest);
        }
    }

    /// `file-digest://` URIs the host can register freshness watches on.
    pub fn digest_uris(&self) -> Vec<String> {
        self.iter()
            .map(|id| format!("file-digest://{}", id.path().display()))
            .collect()
    }

    /// Owned list form, as stored in cache entries.
    pub fn to_vec(&self) -> Vec<Dependency> {
        self.entries
            .iter()
            .map(|(path, digest)| Dependency {
                path: path.clone(),
                digest: *digest,
            })
            .collect()
    }
}

impl FromIterator<Dependency> for DependencySet {
    fn from_iter<I: IntoIterator<Item = Dependency>>(iter: I) -> Self {
        let mut set = DependencySet::new();
        for dependency in iter {
            set.insert(dependency.path, dependency.digest);
        }
        set
    }
}
