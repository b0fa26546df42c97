//! The compile entry point.
//!
//! Copyright (c) 2025 stylepack contributors
//!
//! An [`Engine`] is built once from an [`EngineConfig`], a host and a
//! compiler, and then shared: every method takes `&self`, so independent
//! stylesheets can be compiled from several threads at once.

use std::path::Path;
use std::sync::Arc;

use stylepack_host::{AssetHost, CompileRequest, StylesheetCompiler};
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CacheStore, CompileCache};
use crate::config::EngineConfig;
use crate::dependencies::{Dependency, DependencySet};
use crate::digest::ContentDigest;
use crate::error::{EngineError, Result};
use crate::importer::{Importer, PathImporter};
use crate::lookup::AssetLookup;
use crate::options::CompileOptions;
use crate::types::AssetId;
use crate::walker::{Expansion, ImportGraphWalker};

/// Output of [`Engine::compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledStylesheet {
    /// Compiled CSS
    pub css: String,
    /// Root file first, then every imported asset in first-reached order
    pub dependencies: Vec<Dependency>,
    /// Whether the output came from the cache
    pub cache_hit: bool,
}

impl CompiledStylesheet {
    pub fn dependency_paths(&self) -> impl Iterator<Item = &AssetId> {
        self.dependencies.iter().map(|dependency| &dependency.path)
    }
}

/// Import resolution, compilation and caching for one asset tree.
pub struct Engine {
    config: EngineConfig,
    lookup: AssetLookup,
    importer: Arc<dyn Importer>,
    compiler: Arc<dyn StylesheetCompiler>,
    cache: CompileCache,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("dialect", &self.config.dialect)
            .field("compiler", &self.compiler.name())
            .field("lookup", &self.lookup)
            .field("cache", &self.cache)
            .finish()
    }
}

impl Engine {
    /// Engine without a cache store; see [`Engine::with_cache_store`].
    pub fn new(
        config: EngineConfig,
        host: Arc<dyn AssetHost>,
        compiler: Arc<dyn StylesheetCompiler>,
    ) -> Self {
        let lookup = AssetLookup::new(host, config.mime_table(), config.root.clone());
        let importer = Arc::new(PathImporter::from_config(&config));
        Self {
            config,
            lookup,
            importer,
            compiler,
            cache: CompileCache::disabled(),
        }
    }

    /// Attach a cache store. Ignored when the configuration disables caching.
    pub fn with_cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        if self.config.cache {
            self.cache = CompileCache::new(Some(store), self.config.dialect.clone());
        } else {
            debug!("Caching disabled by configuration; ignoring cache store");
        }
        self
    }

    /// Replace the import resolution strategy.
    pub fn with_importer(mut self, importer: Arc<dyn Importer>) -> Self {
        self.importer = importer;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lookup(&self) -> &AssetLookup {
        &self.lookup
    }

    pub fn cache(&self) -> &CompileCache {
        &self.cache
    }

    pub fn walker(&self) -> ImportGraphWalker<'_> {
        ImportGraphWalker::new(&self.lookup, self.importer.as_ref())
    }

    /// Identity of a root file given by absolute or cwd-relative path.
    pub fn locate(&self, root: &Path) -> Result<AssetId> {
        self.lookup
            .identify(root)
            .ok_or_else(|| EngineError::RootNotFound(root.to_path_buf()))
    }

    /// Expand every import below `root` without compiling.
    ///
    /// The dependency set starts with the root itself.
    pub fn expand(&self, root: &Path) -> Result<Expansion> {
        let id = self.locate(root)?;
        let source = self.lookup.read(&id)?;
        let (text, dependencies) = self.expand_source(&id, &source)?;
        Ok(Expansion { text, dependencies })
    }

    /// Dependency set of `root`, root first.
    pub fn dependencies(&self, root: &Path) -> Result<DependencySet> {
        Ok(self.expand(root)?.dependencies)
    }

    /// Compile `root`, serving from the cache when a fresh entry exists.
    ///
    /// `options` are overlaid on the configured default options.
    pub fn compile(&self, root: &Path, options: &CompileOptions) -> Result<CompiledStylesheet> {
        let id = self.locate(root)?;
        let source = self.lookup.read(&id)?;
        let source_digest = ContentDigest::of_str(&source);
        let options = self.config.options.merged_with(options);

        let key = self.cache_key(&options, &source_digest);
        let cached = key
            .as_ref()
            .and_then(|key| self.cache.get(key, &source_digest));
        if let Some(entry) = cached {
            if self.is_fresh(&entry.dependencies) {
                debug!("Serving {} from cache", id);
                return Ok(CompiledStylesheet {
                    css: entry.output,
                    dependencies: entry.dependencies,
                    cache_hit: true,
                });
            }
            debug!("Cached output for {} is stale", id);
        }

        let (expanded, dependencies) = self.expand_source(&id, &source)?;
        let request = CompileRequest {
            source: &expanded,
            filename: id.path(),
            load_paths: self.lookup.host().search_paths(),
            style: options.output_style(),
        };
        let css = self
            .compiler
            .compile(&request)
            .map_err(|source| EngineError::Compile {
                file: id.clone(),
                source,
            })?;

        let dependencies = dependencies.to_vec();
        info!(
            "Compiled {} with {} ({} dependencies)",
            id,
            self.compiler.name(),
            dependencies.len()
        );
        if let Some(key) = key {
            self.cache
                .put(key, source_digest, css.clone(), dependencies.clone());
        }

        Ok(CompiledStylesheet {
            css,
            dependencies,
            cache_hit: false,
        })
    }

    fn expand_source(&self, id: &AssetId, source: &str) -> Result<(String, DependencySet)> {
        let expansion = self.walker().expand(source, id)?;
        let mut dependencies = DependencySet::new();
        dependencies.insert(id.clone(), ContentDigest::of_str(source));
        dependencies.extend(expansion.dependencies);
        Ok((expansion.text, dependencies))
    }

    fn cache_key(&self, options: &CompileOptions, source_digest: &ContentDigest) -> Option<CacheKey> {
        if !self.cache.is_enabled() || !options.cache_enabled() {
            return None;
        }
        let version = CacheKey::version_string(
            self.compiler.name(),
            self.compiler.version(),
            &self.config.cache_version,
        );
        match CacheKey::compute(version, options, source_digest) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!("Cannot compute cache key, compiling uncached: {}", e);
                None
            }
        }
    }

    /// Whether every recorded dependency still has the recorded content.
    fn is_fresh(&self, dependencies: &[Dependency]) -> bool {
        dependencies.iter().all(|dependency| {
            match self.lookup.read(&dependency.path) {
                Ok(content) => ContentDigest::of_str(&content) == dependency.digest,
                Err(e) => {
                    debug!("Dependency {} is gone: {}", dependency.path, e);
                    false
                }
            }
        })
    }
}
