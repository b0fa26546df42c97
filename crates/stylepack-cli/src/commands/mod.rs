//! Command implementations for the stylepack CLI
//!
//! Each command builds an [`Engine`] from the shared [`EngineArgs`] and
//! delegates to the `stylepack` crate for the actual work.

pub mod compile;
pub mod deps;
pub mod expand;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use stylepack::{Engine, EngineConfig};
use stylepack_host::{GrassCompiler, NativeHost};

/// Options shared by every command that resolves imports.
#[derive(Debug, Args)]
pub struct EngineArgs {
    /// YAML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Directory to resolve logical imports against (repeatable, in order)
    #[arg(short = 'I', long = "search-path")]
    pub search_paths: Vec<PathBuf>,

    /// Stylesheet dialect extension (defaults to the input's extension)
    #[arg(long)]
    pub dialect: Option<String>,
}

impl EngineArgs {
    /// Effective configuration for compiling `input`.
    ///
    /// Search paths given on the command line replace configured ones; with
    /// neither, the input's directory is the only search path.
    pub fn config_for(&self, input: &Path) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => EngineConfig::for_dialect(infer_dialect(input)),
        };

        if let Some(dialect) = &self.dialect {
            config.dialect = dialect.clone();
        }
        if !self.search_paths.is_empty() {
            config.search_paths = self.search_paths.clone();
        }
        if config.search_paths.is_empty() {
            let dir = input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            config.search_paths.push(dir.to_path_buf());
        }

        config.validate()?;
        Ok(config)
    }

    /// Engine for import resolution only (`expand`, `deps`); any dialect.
    pub fn build_engine(&self, input: &Path) -> Result<Engine> {
        let config = self.config_for(input)?;
        engine_for(config)
    }

    /// Like [`EngineArgs::build_engine`], but fails up front when no compiler
    /// backend handles the dialect.
    pub fn build_compiling_engine(&self, input: &Path) -> Result<Engine> {
        let config = self.config_for(input)?;
        ensure_compilable(&config.dialect)?;
        engine_for(config)
    }
}

/// Dialects the bundled grass backend compiles.
const COMPILABLE_DIALECTS: &[&str] = &["scss"];

fn ensure_compilable(dialect: &str) -> Result<()> {
    if COMPILABLE_DIALECTS.contains(&dialect) {
        return Ok(());
    }
    anyhow::bail!(
        "No compiler backend for the `{dialect}` dialect is installed; only `scss` (grass) can be compiled. \
         `stylepack expand` still flattens its imports"
    )
}

/// Engine over the native filesystem with the grass compiler.
fn engine_for(config: EngineConfig) -> Result<Engine> {
    let host = Arc::new(
        NativeHost::with_search_paths(&config.search_paths)
            .context("Failed to resolve search paths")?,
    );
    debug!("Search paths: {:?}", config.search_paths);

    let compiler = Arc::new(GrassCompiler::new(host.clone()));
    Ok(Engine::new(config, host, compiler))
}

/// Dialect named by the input's extension, `less` when there is none or it is
/// plain CSS.
fn infer_dialect(input: &Path) -> &str {
    match input.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() && ext != "css" => ext,
        _ => "less",
    }
}
