//! Process-level contract for `validate-namespaces`: exit status and the
//! lines printed on standard output.

use std::path::Path;
use std::process::{Command, Output};

fn descriptor(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

fn validate(modules_path: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_validate-namespaces"))
        .args(["--modules-path"])
        .arg(modules_path)
        .output()
        .expect("run validate-namespaces")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn unique_namespaces_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    descriptor(dir.path(), "semgrep/module.yaml", "namespace: boostsecurityio/semgrep\n");
    descriptor(dir.path(), "tools/trivy/module.yaml", "namespace: boostsecurityio/trivy\n");

    let output = validate(dir.path());
    assert!(output.status.success(), "stdout: {}", stdout(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Validating namespaces..."));
    assert!(out.contains("Namespaces are unique."));
}

#[test]
fn duplicate_namespaces_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    descriptor(dir.path(), "a/module.yaml", "namespace: shared\n");
    descriptor(dir.path(), "b/module.yaml", "namespace: shared\n");
    descriptor(dir.path(), "c/module.yaml", "namespace: alone\n");

    let output = validate(dir.path());
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(
        out.contains("ERROR: namespaces are not unique, duplicates found: ['shared']"),
        "stdout: {out}"
    );
    assert!(!out.contains("Namespaces are unique."));
}

#[test]
fn missing_namespace_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    descriptor(dir.path(), "broken/module.yaml", "name: no namespace\n");

    let output = validate(dir.path());
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("ERROR: namespace not found in "), "stdout: {out}");
    assert!(out.contains("broken"), "stdout: {out}");
}

#[test]
fn empty_tree_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = validate(dir.path());
    assert!(output.status.success());
}

#[test]
fn short_flag_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_validate-namespaces"))
        .arg("-m")
        .arg(dir.path())
        .output()
        .expect("run validate-namespaces");
    assert!(output.status.success());
}

#[test]
fn missing_flag_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_validate-namespaces"))
        .output()
        .expect("run validate-namespaces");
    assert!(!output.status.success());
}
