//! Integration test: `NativeHost` and `MemoryHost` answer the same queries
//! the same way for an identical tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use stylepack_host::{
    AssetHost, CompileRequest, GrassCompiler, HostError, MemoryHost, NativeHost, OutputStyle,
    PathKind, StylesheetCompiler,
};
use tempfile::TempDir;

const FILES: &[(&str, &str)] = &[
    ("styles/site.scss", "@use \"theme\";\nbody { color: theme.$accent; }\n"),
    ("styles/_theme.scss", "$accent: green;\n"),
    ("styles/vendor/reset.css", "html { margin: 0; }\n"),
];

fn native_tree() -> (TempDir, NativeHost) {
    let temp = TempDir::new().unwrap();
    for (path, content) in FILES {
        let full = temp.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    let host = NativeHost::with_search_paths([temp.path().join("styles")]).unwrap();
    (temp, host)
}

fn memory_tree(root: &Path) -> MemoryHost {
    FILES
        .iter()
        .fold(MemoryHost::new(root), |host, (path, content)| {
            host.with_file(path, content)
        })
        .with_search_paths(["styles"])
}

fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths
}

#[test]
fn test_hosts_agree_on_queries() {
    let (temp, native) = native_tree();
    let memory = memory_tree(temp.path());
    let hosts: [&dyn AssetHost; 2] = [&native, &memory];

    let styles = temp.path().join("styles");
    for host in hosts {
        assert_eq!(host.search_paths(), &[styles.clone()]);
        assert!(host.is_file(&styles.join("site.scss")).unwrap());
        assert!(host.is_dir(&styles.join("vendor")).unwrap());
        assert!(!host.is_file(&styles.join("vendor")).unwrap());
        assert!(
            !host
                .path_exists(&styles.join("missing.scss"), Some(PathKind::File))
                .unwrap()
        );
        assert_eq!(
            host.file_read_string(&styles.join("_theme.scss")).unwrap(),
            "$accent: green;\n"
        );
        assert_eq!(
            sorted(host.dir_list(&styles).unwrap()),
            vec![
                styles.join("_theme.scss"),
                styles.join("site.scss"),
                styles.join("vendor"),
            ]
        );
        assert!(matches!(
            host.file_read(&styles.join("missing.scss")),
            Err(HostError::NotFound(_))
        ));
    }
}

#[test]
fn test_grass_module_resolution_through_either_host() {
    let (temp, native) = native_tree();
    let memory = memory_tree(temp.path());
    let styles = temp.path().join("styles");
    let source = FILES[0].1;

    let hosts: [Arc<dyn AssetHost>; 2] = [Arc::new(native), Arc::new(memory)];
    for host in hosts {
        let load_paths = host.search_paths().to_vec();
        let compiler = GrassCompiler::new(host);
        let css = compiler
            .compile(&CompileRequest {
                source,
                filename: &styles.join("site.scss"),
                load_paths: &load_paths,
                style: OutputStyle::Compressed,
            })
            .unwrap();
        assert_eq!(css.trim_end(), "body{color:green}");
    }
}
