//! Integration test: the engine over the real filesystem with an on-disk cache.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use stylepack::{CompileOptions, Engine, EngineConfig, FileCacheStore};
use stylepack_host::{CompileRequest, CompilerError, NativeHost, StylesheetCompiler};
use tempfile::TempDir;

/// Upper-cases its input so tests can tell compiled output from source.
struct UpperCompiler;

impl StylesheetCompiler for UpperCompiler {
    fn name(&self) -> &str {
        "upper"
    }

    fn version(&self) -> &str {
        "1"
    }

    fn compile(&self, request: &CompileRequest<'_>) -> Result<String, CompilerError> {
        Ok(request.source.to_uppercase())
    }
}

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn engine(styles: &Path, cache: &Path) -> Engine {
    let host = NativeHost::with_search_paths([styles]).unwrap();
    Engine::new(EngineConfig::default(), Arc::new(host), Arc::new(UpperCompiler))
        .with_cache_store(Arc::new(FileCacheStore::new(cache)))
}

#[test]
fn test_cache_survives_engine_restart() {
    let temp = TempDir::new().unwrap();
    let styles = temp.path().join("styles");
    let cache = temp.path().join("cache");
    write(&styles, "site.less", "@import \"parts/colors\";\nbody { color: @c; }\n");
    write(&styles, "parts/_colors.less", "@c: blue;");
    let root = styles.join("site.less");

    let first = engine(&styles, &cache)
        .compile(&root, &CompileOptions::new())
        .unwrap();
    assert!(!first.cache_hit);
    assert_eq!(first.css, "@C: BLUE;\nBODY { COLOR: @C; }\n");

    let stored: Vec<_> = fs::read_dir(cache.join("less")).unwrap().collect();
    assert_eq!(stored.len(), 1);

    let second = engine(&styles, &cache)
        .compile(&root, &CompileOptions::new())
        .unwrap();
    assert!(second.cache_hit);
    assert_eq!(second.css, first.css);
    assert_eq!(second.dependencies, first.dependencies);
}

#[test]
fn test_edited_partial_invalidates_on_disk_entry() {
    let temp = TempDir::new().unwrap();
    let styles = temp.path().join("styles");
    let cache = temp.path().join("cache");
    write(&styles, "site.less", "@import \"parts/colors\";\n");
    write(&styles, "parts/_colors.less", "@c: blue;");
    let root = styles.join("site.less");

    engine(&styles, &cache)
        .compile(&root, &CompileOptions::new())
        .unwrap();
    write(&styles, "parts/_colors.less", "@c: green;");

    let result = engine(&styles, &cache)
        .compile(&root, &CompileOptions::new())
        .unwrap();
    assert!(!result.cache_hit);
    assert_eq!(result.css, "@C: GREEN;\n");
}

#[test]
fn test_corrupt_entry_recompiles() {
    let temp = TempDir::new().unwrap();
    let styles = temp.path().join("styles");
    let cache = temp.path().join("cache");
    write(&styles, "site.less", "a { b: c; }");
    let root = styles.join("site.less");

    engine(&styles, &cache)
        .compile(&root, &CompileOptions::new())
        .unwrap();
    for entry in fs::read_dir(cache.join("less")).unwrap() {
        fs::write(entry.unwrap().path(), "{ truncated").unwrap();
    }

    let result = engine(&styles, &cache)
        .compile(&root, &CompileOptions::new())
        .unwrap();
    assert!(!result.cache_hit);
    assert_eq!(result.css, "A { B: C; }");

    // The rewrite repaired the entry
    assert!(
        engine(&styles, &cache)
            .compile(&root, &CompileOptions::new())
            .unwrap()
            .cache_hit
    );
}

#[test]
fn test_config_loaded_from_yaml() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("stylepack.yml");
    fs::write(
        &config_path,
        "search_paths:\n  - styles\ncache_version: \"2\"\noptions:\n  compress: true\n",
    )
    .unwrap();

    let config = EngineConfig::load(&config_path).unwrap();
    assert_eq!(config.cache_version, "2");
    assert_eq!(config.search_paths.len(), 1);

    fs::write(&config_path, "dialect: less\nunknown_key: 1\n").unwrap();
    let err = EngineConfig::load(&config_path).unwrap_err();
    assert!(err.to_string().contains("stylepack.yml"));
}
