//! End-to-end tests for the `stylepack` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn stylepack(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stylepack"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "stylepack=warn")
        .output()
        .expect("failed to run stylepack")
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let styles = temp.path().join("styles");
    fs::create_dir_all(styles.join("parts")).unwrap();
    fs::write(
        styles.join("site.scss"),
        "@import \"parts/colors\";\nbody { color: $brand; }\n",
    )
    .unwrap();
    fs::write(styles.join("parts/_colors.scss"), "$brand: blue;\n").unwrap();
    temp
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_expand_prints_flattened_source() {
    let temp = project();
    let output = stylepack(temp.path(), &["expand", "styles/site.scss"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "$brand: blue;\n\nbody { color: $brand; }\n");
}

#[test]
fn test_compile_to_stdout() {
    let temp = project();
    let output = stylepack(temp.path(), &["compile", "styles/site.scss"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let css = stdout(&output);
    assert!(css.contains("body"));
    assert!(css.contains("color: blue"));
}

#[test]
fn test_compile_with_cache_and_output_file() {
    let temp = project();
    let args = [
        "compile",
        "styles/site.scss",
        "--cache-dir",
        "cache",
        "--minified",
        "-o",
        "site.css",
    ];

    assert!(stylepack(temp.path(), &args).status.success());
    let first = fs::read_to_string(temp.path().join("site.css")).unwrap();
    assert!(first.contains("color:blue"));
    assert!(temp.path().join("cache").join("scss").is_dir());

    assert!(stylepack(temp.path(), &args).status.success());
    let second = fs::read_to_string(temp.path().join("site.css")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_deps_lists_root_first() {
    let temp = project();
    let output = stylepack(temp.path(), &["deps", "--uris", "styles/site.scss"]);
    assert!(output.status.success());

    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("file-digest://"));
    assert!(lines[0].ends_with("styles/site.scss"));
    assert!(lines[1].ends_with("styles/parts/_colors.scss"));
}

#[test]
fn test_missing_import_fails_with_message() {
    let temp = project();
    fs::write(
        temp.path().join("styles/broken.scss"),
        "@import \"nowhere\";\n",
    )
    .unwrap();

    let output = stylepack(temp.path(), &["compile", "styles/broken.scss"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nowhere"));
    assert!(stderr.contains("broken.scss"));
}

fn less_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let styles = temp.path().join("styles");
    fs::create_dir_all(&styles).unwrap();
    fs::write(styles.join("site.less"), "@import \"dep\"; body { color: @color; }").unwrap();
    fs::write(styles.join("dep.less"), "@color: blue;").unwrap();
    temp
}

#[test]
fn test_compile_less_reports_missing_backend() {
    let temp = less_project();
    let output = stylepack(temp.path(), &["compile", "styles/site.less"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No compiler backend for the `less` dialect"), "{stderr}");
}

#[test]
fn test_expand_less_still_works() {
    let temp = less_project();
    let output = stylepack(temp.path(), &["expand", "styles/site.less"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), "@color: blue; body { color: @color; }");
}
