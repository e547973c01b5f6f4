#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Write an installed package `<root>/<name>/.bower.json`.
pub fn install_package(root: &Path, name: &str, version: &str, main: &str, deps: &[&str]) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(".bower.json"), manifest(name, Some(version), main, deps)).unwrap();
}

/// Write a local component `<dir>/bower.json`.
pub fn local_package(dir: &Path, name: &str, main: &str, deps: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("bower.json"), manifest(name, None, main, deps)).unwrap();
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn manifest(name: &str, version: Option<&str>, main: &str, deps: &[&str]) -> String {
    let mut manifest = serde_json::json!({ "name": name, "main": main });
    if let Some(version) = version {
        manifest["version"] = serde_json::json!(version);
    }
    let dependencies: serde_json::Map<String, serde_json::Value> = deps
        .iter()
        .map(|dep| (dep.to_string(), serde_json::json!("*")))
        .collect();
    manifest["dependencies"] = serde_json::Value::Object(dependencies);
    manifest.to_string()
}
