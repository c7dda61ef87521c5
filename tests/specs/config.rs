//! Configuration specifications.

use crate::prelude::*;

/// > a present but unparseable config aborts with exit code 2 before any mutation
#[test]
fn invalid_config_is_fatal() {
    let sandbox = Sandbox::new();
    sandbox.write_config("whitelist = [");

    sandbox
        .cmd()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("invalid config"));

    assert!(!sandbox.cache_dir().exists());
}

/// > a broken config does not prevent undoing exclusions
#[test]
fn invalid_config_does_not_block_reset() {
    let sandbox = Sandbox::new();
    sandbox.write_config("tmutil = 3");
    sandbox.write_cache(r#"{"paths": ["/a"]}"#);

    sandbox
        .cmd()
        .args(["reset", "--dry-run"])
        .assert()
        .success()
        .stdout("- /a\n")
        .stderr(predicates::str::contains("resetting with the default configuration"));

    assert!(sandbox.cache_file().exists());
}

/// > an explicitly named config file that does not exist is an error
#[test]
fn missing_explicit_config_is_fatal() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("failed to read config"));
}

/// > legacy config.json files are accepted
#[test]
fn legacy_json_config() {
    let sandbox = Sandbox::new();
    let path = sandbox.state.path().join("config.json");
    std::fs::write(
        &path,
        format!(
            r#"{{"searchPaths": ["{}"], "ignoredPaths": [], "whitelist": []}}"#,
            sandbox.home().display()
        ),
    )
    .unwrap();

    sandbox
        .cmd()
        .env("TMIGNORE_CONFIG", &path)
        .args(["run", "--dry-run"])
        .assert()
        .success()
        .stdout(predicates::str::is_empty());
}

/// > a search path that cannot be scanned at all aborts without touching the cache
#[test]
fn unscannable_search_path_is_reported() {
    let sandbox = Sandbox::new();
    sandbox.write_config(&format!(
        "search_paths = [\"{}/missing\"]\nignored_paths = []\n",
        sandbox.home().display()
    ));

    sandbox
        .cmd()
        .arg("run")
        .assert()
        .code(3)
        .stderr(predicates::str::contains("no search path could be scanned"));

    assert!(!sandbox.cache_dir().exists());
}
