//! SCSS compilation using the grass crate (native only).
//!
//! Copyright (c) 2025 stylepack contributors
//!
//! This module provides a [`StylesheetCompiler`] for the SCSS dialect using
//! the grass crate, a pure Rust implementation that targets dart-sass.
//!
//! Key components:
//! - `HostFs`: Adapter implementing `grass::Fs` for our `AssetHost`
//! - `GrassCompiler`: the compiler backend handed to the engine

use std::fmt::Debug;
use std::io;
use std::path::Path;
use std::sync::Arc;

use grass::{Options, OutputStyle as GrassStyle};
use tracing::debug;

use crate::compiler::{CompileRequest, CompilerError, OutputStyle, StylesheetCompiler};
use crate::traits::AssetHost;

/// grass release this adapter is built against.
const GRASS_VERSION: &str = "0.13";

/// Adapter that implements `grass::Fs` using an `AssetHost`.
///
/// grass only touches the filesystem for its own module system (`@use`,
/// `@forward`); routing those reads through the host keeps virtual trees
/// consistent with what the import engine saw.
pub struct HostFs<'a> {
    host: &'a dyn AssetHost,
}

impl<'a> HostFs<'a> {
    /// Create a new HostFs adapter wrapping the given host.
    pub fn new(host: &'a dyn AssetHost) -> Self {
        Self { host }
    }
}

impl Debug for HostFs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostFs")
            .field("host", &"<AssetHost>")
            .finish()
    }
}

impl grass::Fs for HostFs<'_> {
    fn is_dir(&self, path: &Path) -> bool {
        self.host.is_dir(path).unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.host.is_file(path).unwrap_or(false)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.host
            .file_read(path)
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

/// SCSS compiler backed by grass.
pub struct GrassCompiler {
    host: Arc<dyn AssetHost>,
}

impl GrassCompiler {
    /// Create a compiler that reads module files through `host`.
    pub fn new(host: Arc<dyn AssetHost>) -> Self {
        Self { host }
    }
}

impl Debug for GrassCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrassCompiler")
            .field("version", &GRASS_VERSION)
            .finish()
    }
}

impl StylesheetCompiler for GrassCompiler {
    fn name(&self) -> &str {
        "grass"
    }

    fn version(&self) -> &str {
        GRASS_VERSION
    }

    fn compile(&self, request: &CompileRequest<'_>) -> Result<String, CompilerError> {
        debug!("Compiling {} with grass", request.filename.display());
        let fs = HostFs::new(self.host.as_ref());

        let style = match request.style {
            OutputStyle::Compressed => GrassStyle::Compressed,
            OutputStyle::Expanded => GrassStyle::Expanded,
        };

        let options = Options::default()
            .fs(&fs)
            .load_paths(request.load_paths)
            .style(style);

        grass::from_string(request.source, &options)
            .map_err(|e| CompilerError::from_diagnostic(e.to_string()))
    }
}
