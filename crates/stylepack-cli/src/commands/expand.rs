//! Expand command implementation.

use std::path::Path;

use anyhow::{Context, Result};

use super::EngineArgs;

/// Print `input` with every import expanded.
pub fn execute(input: &Path, args: &EngineArgs) -> Result<()> {
    let engine = args.build_engine(input)?;
    let expansion = engine
        .expand(input)
        .with_context(|| format!("Failed to expand {}", input.display()))?;
    print!("{}", expansion.text);
    Ok(())
}
