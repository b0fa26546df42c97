//! Deps command implementation.

use std::path::Path;

use anyhow::{Context, Result};

use super::EngineArgs;

/// Print the dependency set of `input`, one entry per line.
pub fn execute(input: &Path, args: &EngineArgs, uris: bool) -> Result<()> {
    let engine = args.build_engine(input)?;
    let dependencies = engine
        .dependencies(input)
        .with_context(|| format!("Failed to resolve imports of {}", input.display()))?;

    if uris {
        for uri in dependencies.digest_uris() {
            println!("{uri}");
        }
    } else {
        for dependency in dependencies.to_vec() {
            println!("{}  {}", dependency.digest, dependency.path);
        }
    }
    Ok(())
}
