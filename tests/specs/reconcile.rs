//! End-to-end reconciliation against a real git repository and a fake
//! backup-exclusion tool.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::prelude::*;

/// Sandbox with one repository ignoring `*.log` and `build/`, plus a
/// fake tmutil that appends its arguments to a log and exits `status`.
struct Fixture {
    sandbox: Sandbox,
    repo: PathBuf,
    tool_log: PathBuf,
}

impl Fixture {
    fn new(status: i32) -> Self {
        let sandbox = Sandbox::new();
        let repo = sandbox.home().join("project");
        fs::create_dir_all(repo.join("build")).unwrap();
        fs::write(repo.join(".gitignore"), "*.log\nbuild/\n").unwrap();
        fs::write(repo.join("debug.log"), "x").unwrap();
        fs::write(repo.join("build/out.o"), "x").unwrap();
        fs::write(repo.join("main.rs"), "fn main() {}").unwrap();
        git(&repo, &["init", "-q"]);

        let tool_log = sandbox.state.path().join("tmutil.log");
        let tool = sandbox.state.path().join("tmutil");
        fs::write(
            &tool,
            format!(
                "#!/bin/sh\necho \"$@\" >> '{}'\nexit {status}\n",
                tool_log.display()
            ),
        )
        .unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        sandbox.write_config(&format!(
            "search_paths = [\"~\"]\nignored_paths = []\ntmutil = \"{}\"\n",
            tool.display()
        ));

        Self {
            sandbox,
            repo,
            tool_log,
        }
    }

    fn path(&self, relative: &str) -> String {
        format!("{}/{}", self.repo.display(), relative)
    }

    fn tool_calls(&self) -> Vec<String> {
        fs::read_to_string(&self.tool_log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .status()
        .unwrap();
    assert!(status.success(), "git {args:?} failed");
}

/// > run excludes every ignored path and records them in the cache
#[test]
fn run_excludes_ignored_paths() {
    let f = Fixture::new(0);

    f.sandbox.cmd().arg("run").assert().success();

    assert_eq!(
        f.tool_calls(),
        vec![format!(
            "addexclusion {} {}",
            f.path("build"),
            f.path("debug.log")
        )]
    );
    f.sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(format!("{}\n{}\n", f.path("build"), f.path("debug.log")));
}

/// > with no subcommand, tmignore runs
#[test]
fn bare_invocation_runs() {
    let f = Fixture::new(0);

    f.sandbox.cmd().assert().success();

    assert_eq!(f.tool_calls().len(), 1);
    assert!(f.sandbox.cache_file().exists());
}

/// > a second run with nothing changed touches nothing
#[test]
fn second_run_is_a_no_op() {
    let f = Fixture::new(0);

    f.sandbox.cmd().arg("run").assert().success();
    f.sandbox.cmd().arg("run").assert().success();

    assert_eq!(f.tool_calls().len(), 1);
}

/// > paths that stop being ignored are removed from the exclusion list
#[test]
fn unignored_paths_are_removed() {
    let f = Fixture::new(0);
    f.sandbox.cmd().arg("run").assert().success();

    fs::write(f.repo.join(".gitignore"), "build/\n").unwrap();
    f.sandbox.cmd().arg("run").assert().success();

    assert_eq!(
        f.tool_calls().last().unwrap(),
        &format!("removeexclusion {}", f.path("debug.log"))
    );
    f.sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(format!("{}\n", f.path("build")));
}

/// > whitelisted paths are never excluded
#[test]
fn whitelist_overrides_ignore() {
    let f = Fixture::new(0);
    let config = fs::read_to_string(f.sandbox.config_path()).unwrap();
    f.sandbox
        .write_config(&format!("{config}whitelist = [\"*/debug.log\"]\n"));

    f.sandbox.cmd().arg("run").assert().success();

    assert_eq!(
        f.tool_calls(),
        vec![format!("addexclusion {}", f.path("build"))]
    );
}

/// > pruned directories are not searched
#[test]
fn pruned_directories_are_skipped() {
    let f = Fixture::new(0);
    f.sandbox.write_config(&format!(
        "ignored_paths = [\"~/project\"]\ntmutil = \"{}\"\n",
        f.sandbox.state.path().join("tmutil").display()
    ));

    f.sandbox.cmd().arg("run").assert().success();

    assert!(f.tool_calls().is_empty());
}

/// > run --dry-run prints the diff and changes nothing
#[test]
fn dry_run_prints_diff() {
    let f = Fixture::new(0);

    f.sandbox
        .cmd()
        .args(["run", "--dry-run"])
        .assert()
        .success()
        .stdout(format!("+ {}\n+ {}\n", f.path("build"), f.path("debug.log")));

    assert!(f.tool_calls().is_empty());
    assert!(!f.sandbox.cache_file().exists());
}

/// > reset removes every cached exclusion and clears the cache
#[test]
fn reset_removes_exclusions() {
    let f = Fixture::new(0);
    f.sandbox.cmd().arg("run").assert().success();

    f.sandbox.cmd().arg("reset").assert().success();

    assert_eq!(
        f.tool_calls().last().unwrap(),
        &format!("removeexclusion {} {}", f.path("build"), f.path("debug.log"))
    );
    assert!(!f.sandbox.cache_dir().exists());
}

/// > reset --dry-run lists what would be removed and keeps the cache
#[test]
fn reset_dry_run() {
    let f = Fixture::new(0);
    f.sandbox.write_cache(r#"{"paths": ["/a", "/b"]}"#);

    f.sandbox
        .cmd()
        .args(["reset", "--dry-run"])
        .assert()
        .success()
        .stdout("- /a\n- /b\n");

    assert!(f.tool_calls().is_empty());
    assert!(f.sandbox.cache_file().exists());
}

/// > removing a path that is not excluded is not a failure
#[test]
fn reset_tolerates_already_removed_paths() {
    let f = Fixture::new(213);
    f.sandbox.write_cache(r#"{"paths": ["/gone"]}"#);

    f.sandbox.cmd().arg("reset").assert().success();

    assert!(!f.sandbox.cache_dir().exists());
}

/// > a failed reset keeps the cache so it can be retried
#[test]
fn failed_reset_keeps_cache() {
    let f = Fixture::new(1);
    f.sandbox.write_cache(r#"{"paths": ["/a"]}"#);

    f.sandbox
        .cmd()
        .arg("reset")
        .assert()
        .code(1)
        .stderr(predicates::str::contains("reset incomplete"));

    assert!(f.sandbox.cache_file().exists());
}

/// > reset --force clears the cache even when removals fail
#[test]
fn forced_reset_clears_cache() {
    let f = Fixture::new(1);
    f.sandbox.write_cache(r#"{"paths": ["/a"]}"#);

    f.sandbox.cmd().args(["reset", "--force"]).assert().success();

    assert!(!f.sandbox.cache_dir().exists());
}

/// > a failing exclusion tool does not stop the run; the cache records the intended state
#[test]
fn failed_additions_are_still_cached() {
    let f = Fixture::new(1);

    f.sandbox.cmd().arg("run").assert().success();

    assert_eq!(f.tool_calls().len(), 1);
    assert!(f.sandbox.cache_file().exists());
}
