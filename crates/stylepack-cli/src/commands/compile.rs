//! Compile command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use stylepack::{CompileOptions, FileCacheStore};

use super::EngineArgs;

/// Arguments for the compile command
#[derive(Debug)]
pub struct CompileArgs {
    /// Root stylesheet
    pub input: PathBuf,
    /// Config, search paths and dialect
    pub engine: EngineArgs,
    /// On-disk cache directory; no caching without one
    pub cache_dir: Option<PathBuf>,
    /// Compressed output
    pub minified: bool,
    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
}

/// Execute the compile command
pub fn execute(args: CompileArgs) -> Result<()> {
    let mut engine = args.engine.build_compiling_engine(&args.input)?;
    if let Some(dir) = &args.cache_dir {
        engine = engine.with_cache_store(Arc::new(FileCacheStore::new(dir)));
    }

    let options = CompileOptions::new().with("compress", args.minified);
    let compiled = engine
        .compile(&args.input, &options)
        .with_context(|| format!("Failed to compile {}", args.input.display()))?;

    if compiled.cache_hit {
        info!("Using cached output for {}", args.input.display());
    }

    match &args.output {
        Some(path) => {
            std::fs::write(path, &compiled.css)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", compiled.css),
    }
    Ok(())
}
