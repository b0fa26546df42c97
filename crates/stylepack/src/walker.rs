//! Recursive import expansion.
//!
//! Copyright (c) 2025 stylepack contributors
//!
//! The walker flattens a stylesheet: every resolvable `@import` directive is
//! replaced by the (recursively expanded) content of its target, so the
//! compiler only ever sees one self-contained source text.
//!
//! # Resolution rules
//!
//! - Standard imports are resolved by an [`Importer`]: the first requirable
//!   candidate wins.
//! - An unresolvable import whose path ends in `.css` is left in place for
//!   the browser to fetch; any other unresolvable import is an error.
//! - Glob imports are expanded against the importing file's directory,
//!   sorted by path, and exclude the importing file.
//! - Plain CSS targets are spliced verbatim; dialect targets are expanded
//!   first.
//!
//! # Cycles
//!
//! The walker tracks the chain of files currently being expanded and fails
//! with [`EngineError::CyclicImport`] when an import re-enters it. The same
//! file reached through two separate branches is fine.

use std::path::{Component, Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};

use crate::dependencies::DependencySet;
use crate::digest::ContentDigest;
use crate::error::{EngineError, Result};
use crate::importer::Importer;
use crate::lookup::AssetLookup;
use crate::scanner::{ImportScanner, is_glob};
use crate::types::{AssetId, ContentType, ImportKind, ImportReference, ResolvedImport};

/// Result of expanding one source text.
#[derive(Debug, Clone)]
pub struct Expansion {
    /// Source with every resolvable import substituted
    pub text: String,
    /// Every asset spliced into `text`, transitively
    pub dependencies: DependencySet,
}

/// Per-expansion mutable state.
struct WalkState {
    dependencies: DependencySet,
    /// Files currently being expanded, outermost first
    chain: Vec<AssetId>,
}

/// Expands imports recursively through an [`AssetLookup`].
#[derive(Clone, Copy)]
pub struct ImportGraphWalker<'a> {
    lookup: &'a AssetLookup,
    importer: &'a dyn Importer,
    scanner: ImportScanner,
}

impl<'a> ImportGraphWalker<'a> {
    pub fn new(lookup: &'a AssetLookup, importer: &'a dyn Importer) -> Self {
        Self {
            lookup,
            importer,
            scanner: ImportScanner::new(),
        }
    }

    /// Expand `source`, which is the content of `source_id`.
    ///
    /// `source_id` itself is not added to the dependency set.
    pub fn expand(&self, source: &str, source_id: &AssetId) -> Result<Expansion> {
        let mut state = WalkState {
            dependencies: DependencySet::new(),
            chain: vec![source_id.clone()],
        };
        let text = self.expand_source(source, source_id, &mut state)?;
        Ok(Expansion {
            text,
            dependencies: state.dependencies,
        })
    }

    fn expand_source(&self, source: &str, source_id: &AssetId, state: &mut WalkState) -> Result<String> {
        let mut output = String::with_capacity(source.len());
        let mut cursor = 0;

        for import in self.scanner.scan(source, source_id) {
            let replacement = match import.kind {
                ImportKind::Standard => self.expand_standard(&import, state)?,
                ImportKind::Glob => Some(self.expand_glob(&import, state)?),
            };
            if let Some(text) = replacement {
                output.push_str(&source[cursor..import.span.start]);
                output.push_str(&text);
                cursor = import.span.end;
            }
        }

        output.push_str(&source[cursor..]);
        Ok(output)
    }

    /// `None` leaves the directive untouched (passthrough).
    fn expand_standard(&self, import: &ImportReference<'_>, state: &mut WalkState) -> Result<Option<String>> {
        let importer = import.source_file;
        match self.resolve(import.raw_path, importer) {
            Some(id) => {
                debug!("Resolved import {:?} in {} to {}", import.raw_path, importer, id);
                self.splice(id, state).map(Some)
            }
            None if import.raw_path.ends_with(".css") => {
                debug!("Leaving CSS import {:?} in {} unresolved", import.raw_path, importer);
                Ok(None)
            }
            None => Err(EngineError::ImportNotFound {
                path: import.raw_path.to_string(),
                importer: importer.clone(),
            }),
        }
    }

    fn expand_glob(&self, import: &ImportReference<'_>, state: &mut WalkState) -> Result<String> {
        let matches = self.glob_matches(import.raw_path, import.source_file);
        if matches.is_empty() {
            debug!("Glob import {:?} in {} matched nothing", import.raw_path, import.source_file);
        }

        let mut parts = Vec::with_capacity(matches.len());
        for id in matches {
            parts.push(self.splice(id, state)?);
        }
        Ok(parts.join("\n"))
    }

    /// The asset `raw_path` names when written in `importer`.
    pub fn resolve(&self, raw_path: &str, importer: &AssetId) -> Option<AssetId> {
        self.importer.resolve(raw_path, importer, self.lookup)
    }

    /// Load a resolved asset.
    pub fn load(&self, id: AssetId) -> Result<ResolvedImport> {
        let content = self.lookup.read(&id)?;
        Ok(ResolvedImport {
            content_type: self.lookup.content_type(&id),
            identity: id,
            content,
        })
    }

    /// Requirable files matching `pattern` relative to the importer's
    /// directory, sorted, without the importer.
    pub fn glob_matches(&self, pattern: &str, importer: &AssetId) -> Vec<AssetId> {
        let mut current = vec![importer.dir().to_path_buf()];

        for component in Path::new(pattern).components() {
            current = match component {
                Component::CurDir => current,
                Component::ParentDir => current
                    .into_iter()
                    .map(|p| p.parent().map_or(p.clone(), Path::to_path_buf))
                    .collect(),
                Component::RootDir => vec![PathBuf::from("/")],
                Component::Prefix(prefix) => vec![PathBuf::from(prefix.as_os_str())],
                Component::Normal(segment) => {
                    let segment = segment.to_string_lossy();
                    if is_glob(&segment) {
                        match Pattern::new(&segment) {
                            Ok(pattern) => self.match_segment(&current, &pattern),
                            Err(e) => {
                                warn!("Invalid glob segment {:?} in {}: {}", segment, importer, e);
                                return Vec::new();
                            }
                        }
                    } else {
                        current.into_iter().map(|p| p.join(&*segment)).collect()
                    }
                }
            };
        }

        let mut matches: Vec<AssetId> = current
            .into_iter()
            .filter(|path| self.lookup.is_file(path))
            .map(AssetId::new)
            .filter(|id| id != importer && self.lookup.is_requirable(id))
            .collect();
        matches.sort();
        matches.dedup();
        matches
    }

    fn match_segment(&self, dirs: &[PathBuf], pattern: &Pattern) -> Vec<PathBuf> {
        dirs.iter()
            .filter(|dir| self.lookup.is_dir(dir))
            .flat_map(|dir| self.lookup.list_dir(dir))
            .filter(|entry| {
                entry
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| pattern.matches(name))
            })
            .collect()
    }

    /// Expanded content of a resolved asset, recording it as a dependency.
    fn splice(&self, id: AssetId, state: &mut WalkState) -> Result<String> {
        if state.chain.contains(&id) {
            let mut chain = state.chain.clone();
            chain.push(id);
            return Err(EngineError::CyclicImport { chain });
        }

        let resolved = self.load(id)?;
        state.dependencies.insert(
            resolved.identity.clone(),
            ContentDigest::of_str(&resolved.content),
        );

        match resolved.content_type {
            ContentType::Css | ContentType::Other => Ok(resolved.content),
            ContentType::Stylesheet => {
                state.chain.push(resolved.identity.clone());
                let expanded = self.expand_source(&resolved.content, &resolved.identity, state);
                state.chain.pop();
                expanded
            }
        }
    }
}
