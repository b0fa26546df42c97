//! Error types for import resolution and compilation.
//!
//! Copyright (c) 2025 stylepack contributors

use std::path::PathBuf;

use stylepack_host::{CompilerError, HostError};
use thiserror::Error;

use crate::types::AssetId;

/// Errors that terminate a compile request.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No candidate path resolved and the import is not passthrough-eligible
    #[error("File to import not found or unreadable: {path} (imported from {importer})")]
    ImportNotFound { path: String, importer: AssetId },

    /// An import re-entered a file that is still being expanded
    #[error("Cyclic import: {}", .chain.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> "))]
    CyclicImport { chain: Vec<AssetId> },

    /// The compiler rejected the expanded source
    #[error("Failed to compile {file}: {source}")]
    Compile {
        file: AssetId,
        #[source]
        source: CompilerError,
    },

    /// The root file handed to the engine does not exist
    #[error("Stylesheet not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The host failed to read an asset that had already resolved
    #[error("Failed to read {path}: {source}")]
    Host {
        path: AssetId,
        #[source]
        source: HostError,
    },

    /// Configuration could not be loaded
    #[error("Invalid configuration{}: {message}", .file.as_ref().map(|f| format!(" in {}", f.display())).unwrap_or_default())]
    Config {
        file: Option<PathBuf>,
        message: String,
    },
}

impl EngineError {
    /// The import path and importing file, for `ImportNotFound`.
    pub fn missing_import(&self) -> Option<(&str, &AssetId)> {
        match self {
            EngineError::ImportNotFound { path, importer } => Some((path.as_str(), importer)),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
