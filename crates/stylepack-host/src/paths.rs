/*
 * paths.rs
 * Copyright (c) 2025 stylepack contributors
 *
 * Lexical path helpers shared by every host implementation.
 */

use std::path::{Component, Path, PathBuf};

/// Normalize path components lexically (remove `.` and resolve `..`).
///
/// No filesystem access is performed, so this works identically for
/// virtual trees and symlinked directories. `..` at the root is dropped.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                // Keep leading `..` on relative paths, drop it at the root
                let at_relative_start = normalized.as_os_str().is_empty()
                    || normalized
                        .components()
                        .next_back()
                        .is_some_and(|c| c == Component::ParentDir);
                if at_relative_start && !path.has_root() {
                    normalized.push("..");
                } else {
                    normalized.pop();
                }
            }
            Component::CurDir => {}
            other => normalized.push(other),
        }
    }
    if normalized.as_os_str().is_empty() {
        if path.has_root() {
            normalized.push("/");
        } else {
            normalized.push(".");
        }
    }
    normalized
}

/// Whether a path starts with an explicit `./` or `../` marker.
pub fn is_explicitly_relative(path: &Path) -> bool {
    matches!(
        path.components().next(),
        Some(Component::CurDir | Component::ParentDir)
    )
}
