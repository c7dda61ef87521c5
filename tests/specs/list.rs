//! `tmignore list` specifications.

use crate::prelude::*;

/// > list on a fresh install reports nothing and succeeds
#[test]
fn list_without_cache_is_empty() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::is_empty());
}

/// > list prints cached paths one per line, sorted
#[test]
fn list_prints_cached_paths() {
    let sandbox = Sandbox::new();
    sandbox.write_cache(r#"{"paths": ["/Users/u/b/node_modules", "/Users/u/a/My Build"]}"#);

    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout("/Users/u/a/My Build\n/Users/u/b/node_modules\n");
}

/// > list --output json prints the cache record
#[test]
fn list_json() {
    let sandbox = Sandbox::new();
    sandbox.write_cache(r#"{"paths": ["/a"], "updated": "2026-01-02T03:04:05Z"}"#);

    let output = sandbox.cmd().args(["list", "-o", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["paths"], serde_json::json!(["/a"]));
    assert_eq!(json["updated"], "2026-01-02T03:04:05Z");
}

/// > a corrupted cache is reported and treated as empty
#[test]
fn list_with_corrupt_cache() {
    let sandbox = Sandbox::new();
    sandbox.write_cache("{ not json");

    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::is_empty())
        .stderr(predicates::str::contains("could not parse cache file"));
}

/// > list does not need a config file, even a broken one
#[test]
fn list_ignores_config() {
    let sandbox = Sandbox::new();
    sandbox.write_config("whitelist = [");
    sandbox.write_cache(r#"{"paths": ["/a"]}"#);

    sandbox.cmd().arg("list").assert().success().stdout("/a\n");
}
