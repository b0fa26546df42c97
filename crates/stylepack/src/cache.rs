//! Digest-keyed cache of compiled output.
//!
//! Copyright (c) 2025 stylepack contributors
//!
//! Entries are stored as JSON under `<namespace>/<key digest>`. A key digest
//! covers everything that can change the output except the imported files
//! themselves; those are tracked per entry as a list of dependency digests
//! that the engine re-checks before trusting a hit.

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dependencies::Dependency;
use crate::digest::ContentDigest;
use crate::options::{CompileOptions, OptionValue};

/// Version of this engine, part of every cache key.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identity of a compilation for caching purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub digest: ContentDigest,
    pub version: String,
}

/// Canonical digest input; fields are declared in sorted order so the JSON
/// form is stable.
#[derive(Serialize)]
struct KeyInput<'a> {
    options: BTreeMap<&'a str, OptionValue>,
    source: &'a ContentDigest,
    version: &'a str,
}

impl CacheKey {
    /// Key for compiling a root whose content digest is `source_digest`.
    ///
    /// Path-valued options do not participate.
    pub fn compute(
        version: impl Into<String>,
        options: &CompileOptions,
        source_digest: &ContentDigest,
    ) -> Result<Self, serde_json::Error> {
        let version = version.into();
        let digest = ContentDigest::of_json(&KeyInput {
            options: options.digest_view(),
            source: source_digest,
            version: &version,
        })?;
        Ok(Self { digest, version })
    }

    /// Version string for a compiler and configured cache version.
    pub fn version_string(compiler_name: &str, compiler_version: &str, cache_version: &str) -> String {
        format!("stylepack-{ENGINE_VERSION}:{compiler_name}-{compiler_version}:{cache_version}")
    }
}

/// A stored compilation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub source_digest: ContentDigest,
    pub output: String,
    pub dependencies: Vec<Dependency>,
}

/// Byte-oriented backing store for [`CompileCache`].
///
/// Implementations must be safe to share between threads. Last writer wins.
pub trait CacheStore: Send + Sync {
    /// Stored bytes for `key`, `None` when absent.
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Store bytes under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Vec<u8>) -> io::Result<()>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: Vec<u8>) -> io::Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
        Ok(())
    }
}

/// Store writing one JSON file per entry below a directory.
///
/// Writes go to a temporary file that is then renamed into place, so a
/// concurrent reader sees either the old entry or the new one.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    dir: PathBuf,
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

impl FileCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `less/abcd...` is stored at `<dir>/less/abcd....json`.
    fn entry_path(&self, key: &str) -> PathBuf {
        let mut path = self.dir.clone();
        for segment in key.split('/').filter(|s| !s.is_empty() && *s != "." && *s != "..") {
            path.push(segment);
        }
        path.set_extension("json");
        path
    }
}

impl CacheStore for FileCacheStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(self.entry_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: Vec<u8>) -> io::Result<()> {
        let target = self.entry_path(key);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = target.with_extension(format!(
            "json.{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::write(&temp, &value)?;
        if let Err(e) = std::fs::rename(&temp, &target) {
            let _ = std::fs::remove_file(&temp);
            return Err(e);
        }

        debug!("Wrote cache entry {}", target.display());
        Ok(())
    }
}

/// Validating front end over a [`CacheStore`].
///
/// Without a store every lookup misses and every write is dropped.
#[derive(Clone)]
pub struct CompileCache {
    store: Option<Arc<dyn CacheStore>>,
    namespace: String,
}

impl std::fmt::Debug for CompileCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompileCache")
            .field("enabled", &self.is_enabled())
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl CompileCache {
    /// Cache whose keys are stored under `namespace/`.
    pub fn new(store: Option<Arc<dyn CacheStore>>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(None, "")
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Storage key for `key`.
    pub fn storage_key(&self, key: &CacheKey) -> String {
        format!("{}/{}", self.namespace, key.digest)
    }

    /// Entry stored for `key` if it was written for the same version and
    /// root content.
    ///
    /// Unreadable or malformed entries are logged and treated as misses.
    pub fn get(&self, key: &CacheKey, source_digest: &ContentDigest) -> Option<CacheEntry> {
        let store = self.store.as_ref()?;
        let storage_key = self.storage_key(key);

        let bytes = match store.get(&storage_key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("Cache miss for {}", storage_key);
                return None;
            }
            Err(e) => {
                warn!("Failed to read cache entry {}: {}", storage_key, e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Ignoring corrupt cache entry {}: {}", storage_key, e);
                return None;
            }
        };

        if entry.key != *key {
            debug!(
                "Cache entry {} was written by {}, expected {}",
                storage_key, entry.key.version, key.version
            );
            return None;
        }
        if entry.source_digest != *source_digest {
            debug!("Cache entry {} is for different source content", storage_key);
            return None;
        }

        debug!("Cache hit for {}", storage_key);
        Some(entry)
    }

    /// Store a compilation result. Failures are logged, never returned.
    pub fn put(
        &self,
        key: CacheKey,
        source_digest: ContentDigest,
        output: String,
        dependencies: Vec<Dependency>,
    ) {
        let Some(store) = &self.store else {
            return;
        };
        let storage_key = self.storage_key(&key);
        let entry = CacheEntry {
            key,
            source_digest,
            output,
            dependencies,
        };

        let bytes = match serde_json::to_vec(&entry) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to serialize cache entry {}: {}", storage_key, e);
                return;
            }
        };
        match store.set(&storage_key, bytes) {
            Ok(()) => debug!("Stored cache entry {}", storage_key),
            Err(e) => warn!("Failed to write cache entry {}: {}", storage_key, e),
        }
    }
}
