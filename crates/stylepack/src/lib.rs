//! Import resolution and dependency-tracked compile caching for LESS-style
//! stylesheets.
//!
//! Copyright (c) 2025 stylepack contributors
//!
//! This crate provides:
//! - Candidate path generation for `@import` targets (partials, extensions,
//!   root-relative forms)
//! - A pluggable [`Importer`] seam for import resolution
//! - Recursive import expansion with glob imports and cycle detection
//! - Dependency sets with per-file content digests
//! - A digest-keyed cache of compiled output that re-validates dependencies
//!
//! Asset access and compilation go through the traits in `stylepack_host`.
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use stylepack::{CompileOptions, Engine, EngineConfig, MemoryCacheStore};
//! use stylepack_host::{GrassCompiler, NativeHost};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let host: Arc<NativeHost> = Arc::new(NativeHost::with_search_paths(["styles"])?);
//! let compiler = Arc::new(GrassCompiler::new(host.clone()));
//! let engine = Engine::new(EngineConfig::for_dialect("scss"), host, compiler)
//!     .with_cache_store(Arc::new(MemoryCacheStore::new()));
//!
//! let compiled = engine.compile(Path::new("styles/site.scss"), &CompileOptions::new())?;
//! println!("{}", compiled.css);
//! # Ok(())
//! # }
//! ```

mod cache;
mod config;
mod dependencies;
mod digest;
mod engine;
mod error;
mod importer;
mod lookup;
mod options;
mod resolver;
mod scanner;
mod types;
mod walker;

pub use cache::{
    CacheEntry, CacheKey, CacheStore, CompileCache, ENGINE_VERSION, FileCacheStore,
    MemoryCacheStore,
};
pub use config::EngineConfig;
pub use dependencies::{Dependency, DependencySet};
pub use digest::ContentDigest;
pub use engine::{CompiledStylesheet, Engine};
pub use error::{EngineError, Result};
pub use importer::{Importer, PathImporter};
pub use lookup::{AssetLookup, MimeTable};
pub use options::{CompileOptions, OptionValue};
pub use resolver::PathResolver;
pub use scanner::{ImportScanner, Imports, is_glob};
pub use types::{AssetId, ContentType, ImportKind, ImportReference, ResolvedImport};
pub use walker::{Expansion, ImportGraphWalker};
