//! Pluggable import resolution.
//!
//! Copyright (c) 2025 stylepack contributors
//!
//! The walker asks an [`Importer`] which asset a standard `@import` names.
//! [`PathImporter`] is the built-in strategy; callers can install their own
//! with [`crate::Engine::with_importer`], usually by wrapping it.

use std::path::PathBuf;

use stylepack_host::is_explicitly_relative;
use tracing::debug;

use crate::config::EngineConfig;
use crate::lookup::AssetLookup;
use crate::resolver::PathResolver;
use crate::types::AssetId;

/// Maps an import path written in `importer` to the asset it names.
pub trait Importer: Send + Sync {
    /// Candidate paths for `raw_path`, highest priority first.
    fn candidates(&self, raw_path: &str, importer: &AssetId, lookup: &AssetLookup) -> Vec<PathBuf>;

    /// First requirable asset named by `raw_path`, or `None`.
    ///
    /// Candidates are tried against the search paths first; plain relative
    /// candidates then fall back to the importing file's directory, so a
    /// sibling import works even when the importer is outside every search
    /// path.
    fn resolve(&self, raw_path: &str, importer: &AssetId, lookup: &AssetLookup) -> Option<AssetId> {
        let candidates = self.candidates(raw_path, importer, lookup);

        let found = candidates
            .iter()
            .filter_map(|candidate| lookup.resolve(candidate, importer.dir()))
            .find(|id| lookup.is_requirable(id));
        if found.is_some() {
            return found;
        }

        let sibling = candidates
            .iter()
            .filter(|candidate| !is_explicitly_relative(candidate))
            .filter_map(|candidate| lookup.resolve_in(candidate, importer.dir()))
            .find(|id| lookup.is_requirable(id));
        if sibling.is_some() {
            debug!("Resolved {:?} next to {} outside the search paths", raw_path, importer);
        }
        sibling
    }
}

/// Default importer: partials, extensions and root-relative forms from a
/// [`PathResolver`].
#[derive(Debug, Clone)]
pub struct PathImporter {
    resolver: PathResolver,
}

impl PathImporter {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(PathResolver::from_config(config))
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }
}

impl Importer for PathImporter {
    fn candidates(&self, raw_path: &str, importer: &AssetId, lookup: &AssetLookup) -> Vec<PathBuf> {
        let root = lookup.root_for(importer.path());
        self.resolver.candidates(raw_path, importer.path(), &root)
    }
}
