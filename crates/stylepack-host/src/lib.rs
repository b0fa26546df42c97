/*
 * stylepack-host
 * Copyright (c) 2025 stylepack contributors
 *
 * Host abstraction layer for the stylepack import engine.
 *
 * This crate provides a trait-based abstraction over the asset tree the
 * engine resolves imports against, plus the narrow compiler interface:
 *
 * - NativeHost: the real filesystem, rooted at ordered search paths
 * - MemoryHost: an in-memory virtual tree
 * - StylesheetCompiler: expanded source in, CSS out
 * - GrassCompiler: SCSS backend (native targets)
 */

mod compiler;
mod memory;
mod native;
mod paths;
mod traits;

#[cfg(not(target_arch = "wasm32"))]
mod grass_native;

// Re-export core types (API surface)
pub use compiler::{CompileRequest, CompilerError, OutputStyle, StylesheetCompiler};
pub use paths::{is_explicitly_relative, normalize_path};
pub use traits::{AssetHost, HostError, HostResult, PathKind};

// Re-export host implementations
pub use memory::{MemoryHost, VirtualTree};
pub use native::NativeHost;

#[cfg(not(target_arch = "wasm32"))]
pub use grass_native::{GrassCompiler, HostFs};

/// Create a default host for the current platform.
///
/// On native targets this is a [`NativeHost`] searching the working directory.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_host() -> HostResult<NativeHost> {
    NativeHost::with_search_paths(["."])
}
