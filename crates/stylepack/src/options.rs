//! Caller-supplied compile options.
//!
//! Copyright (c) 2025 stylepack contributors
//!
//! Options are an ordered string-keyed map. Two keys are understood by the
//! engine itself:
//!
//! - `cache` (bool): `false` bypasses the compile cache for the request
//! - `compress` (bool): request minified output from the compiler
//!
//! Every other key is opaque to the engine but still part of the cache key,
//! except path values, which are environment-specific and never digested.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use stylepack_host::OutputStyle;

/// A single option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
    /// Filesystem path. Excluded from digests. Strings in config files
    /// always deserialize as `Str`; paths are set programmatically.
    Path(PathBuf),
    List(Vec<OptionValue>),
}

impl OptionValue {
    fn is_path(&self) -> bool {
        matches!(self, OptionValue::Path(_))
    }

    /// Copy of this value with path values removed (recursively for lists).
    fn without_paths(&self) -> Option<OptionValue> {
        match self {
            OptionValue::Path(_) => None,
            OptionValue::List(items) => Some(OptionValue::List(
                items.iter().filter_map(OptionValue::without_paths).collect(),
            )),
            other => Some(other.clone()),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<PathBuf> for OptionValue {
    fn from(value: PathBuf) -> Self {
        OptionValue::Path(value)
    }
}

/// Ordered option map handed to [`crate::Engine::compile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompileOptions(BTreeMap<String, OptionValue>);

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merged_with(&self, other: &CompileOptions) -> CompileOptions {
        let mut merged = self.0.clone();
        merged.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        CompileOptions(merged)
    }

    /// `false` only when `cache: false` is set explicitly.
    pub fn cache_enabled(&self) -> bool {
        !matches!(self.get("cache"), Some(OptionValue::Bool(false)))
    }

    /// Output style requested through `compress`.
    pub fn output_style(&self) -> OutputStyle {
        match self.get("compress") {
            Some(OptionValue::Bool(true)) => OutputStyle::Compressed,
            _ => OutputStyle::Expanded,
        }
    }

    /// The view of these options that participates in cache keys:
    /// path-valued entries are dropped.
    pub fn digest_view(&self) -> BTreeMap<&str, OptionValue> {
        self.0
            .iter()
            .filter(|(_, value)| !value.is_path())
            .filter_map(|(key, value)| Some((key.as_str(), value.without_paths()?)))
            .collect()
    }
}
