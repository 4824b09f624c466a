//! End-to-end runs of the compiled binary against temp trees.

// We use assert_fs for hermetic on-disk fixtures.
use assert_fs::prelude::*;
// We use predicates for stdout/stderr and file content checks.
use predicates::prelude::*;
// We parse the --json summary structurally.
use serde_json::Value;

mod util;
use util::{bootstrap, make_polyglot_fixture, read};

fn json_summary(cmd: &mut assert_cmd::Command) -> Value {
    let assert = cmd.arg("--json").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    serde_json::from_str(stdout.trim()).expect("json summary")
}

#[test]
fn test_python_scenario_produces_all_three_tiers() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("src/a.py")
        .write_str("import os\ndef foo(): pass\n")
        .expect("write a.py");

    bootstrap(tmp.path()).assert().success();

    assert!(read(&tmp, "src/a.py").starts_with("\"\"\"\n@input os\n@output foo\n@position Located in src"));
    assert!(read(&tmp, "src/INDEX.md").contains("| a.py | Module | Module component for a related logic. |"));
    assert!(read(&tmp, "ARCHITECTURE.md").contains("- [src](src/INDEX.md) - Responsibilities for src."));
}

#[test]
fn test_second_run_reports_no_writes() {
    let tmp = make_polyglot_fixture();

    let first = json_summary(&mut bootstrap(tmp.path()));
    assert_eq!(first["files_scanned"], 3);
    assert_eq!(first["folders_scanned"], 3);
    assert_eq!(first["headers_added"], 3);
    assert_eq!(first["index_created"], 3);
    assert_eq!(first["architecture_created"], 1);

    let second = json_summary(&mut bootstrap(tmp.path()));
    for key in [
        "headers_added",
        "index_created",
        "index_updated",
        "architecture_created",
        "architecture_updated",
    ] {
        assert_eq!(second[key], 0, "{key} changed on second run");
    }
}

#[test]
fn test_dependency_folder_never_touched() {
    let tmp = make_polyglot_fixture();

    bootstrap(tmp.path()).assert().success();

    assert_eq!(read(&tmp, "node_modules/dep/index.js"), "module.exports = {};\n");
    assert!(!tmp.path().join("node_modules/dep/INDEX.md").exists());
    assert!(!read(&tmp, "ARCHITECTURE.md").contains("node_modules"));
}

#[test]
fn test_preserve_existing_index_keeps_bytes() {
    let tmp = make_polyglot_fixture();
    bootstrap(tmp.path()).assert().success();

    // Hand-edit the index, then change the folder's file set
    tmp.child("src/INDEX.md")
        .write_str("# curated by hand\n")
        .expect("edit index");
    tmp.child("src/b.py")
        .write_str("def bar(): pass\n")
        .expect("write b.py");

    let summary = json_summary(bootstrap(tmp.path()).arg("--preserve-existing-index"));
    assert_eq!(summary["skipped_existing_index"], 3);

    assert_eq!(read(&tmp, "src/INDEX.md"), "# curated by hand\n");
}

#[test]
fn test_dry_run_previews_without_writing() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("lib/helper.js")
        .write_str("const x = require('fs');\n")
        .expect("write helper.js");

    let mut cmd = assert_cmd::Command::cargo_bin("formatdoc").expect("bin");
    cmd.arg("--dry-run")
        .arg("bootstrap")
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY-RUN update:"))
        .stdout(predicate::str::contains("DRY-RUN create:"));

    assert_eq!(read(&tmp, "lib/helper.js"), "const x = require('fs');\n");
    assert!(!tmp.path().join("lib/INDEX.md").exists());
    assert!(!tmp.path().join("ARCHITECTURE.md").exists());
}

#[test]
fn test_chinese_locale_and_custom_file_names() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("app/OrderController.java")
        .write_str("import java.util.List;\n\npublic class OrderController {}\n")
        .expect("write java");

    bootstrap(tmp.path())
        .args(["--language", "zh", "--index-file", "README_DIR.md", "--architecture-file", "ARCH.md"])
        .assert()
        .success();

    let java = read(&tmp, "app/OrderController.java");
    assert!(java.starts_with("/**\n * @input java.util.List\n * @output OrderController\n"));
    assert!(java.contains("作为 Controller 层组件"));
    assert!(read(&tmp, "app/README_DIR.md").contains("| OrderController.java | Controller |"));
    assert!(read(&tmp, "ARCH.md").contains("- [app](app/README_DIR.md) - app 目录职责。"));
}

#[test]
fn test_auto_locale_follows_existing_docs() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("ARCHITECTURE.md")
        .write_str("# 架构\n")
        .expect("write arch");
    tmp.child("pkg/run.py")
        .write_str("def run(): pass\n")
        .expect("write run.py");

    bootstrap(tmp.path()).assert().success();

    assert!(read(&tmp, "pkg/INDEX.md").contains("该目录包含 1 个源码文件"));
}

#[test]
fn test_config_file_adds_extension() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("formatdoc.toml")
        .write_str("extensions = [\"rb\"]\nlanguage = \"en\"\n")
        .expect("write config");
    tmp.child("lib/task.rb")
        .write_str("def run; end\n")
        .expect("write task.rb");

    let summary = json_summary(&mut bootstrap(tmp.path()));
    assert_eq!(summary["files_scanned"], 1);

    assert!(read(&tmp, "lib/task.rb").starts_with("/**\n * @input To be completed"));
}

#[test]
fn test_missing_root_exits_with_two() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    bootstrap(&tmp.path().join("nope"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid root path"));
}

#[test]
fn test_empty_tree_succeeds() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    let summary = json_summary(&mut bootstrap(tmp.path()));
    assert_eq!(summary["files_scanned"], 0);

    assert!(read(&tmp, "ARCHITECTURE.md").contains("- (no module folders found)"));
}

#[test]
fn test_preserve_existing_architecture_keeps_bytes() {
    let tmp = make_polyglot_fixture();
    bootstrap(tmp.path()).assert().success();

    tmp.child("ARCHITECTURE.md")
        .write_str("# Curated architecture\n")
        .expect("edit architecture");
    tmp.child("extra/tool.go")
        .write_str("package extra\n")
        .expect("write tool.go");

    let summary = json_summary(bootstrap(tmp.path()).arg("--preserve-existing-architecture"));
    assert_eq!(summary["skipped_existing_architecture"], 1);
    assert_eq!(summary["architecture_updated"], 0);
    assert_eq!(summary["index_created"], 1);

    assert_eq!(read(&tmp, "ARCHITECTURE.md"), "# Curated architecture\n");
}

#[test]
fn test_verbose_echoes_each_write() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("lib/helper.js")
        .write_str("const x = require('fs');\n")
        .expect("write helper.js");

    bootstrap(tmp.path())
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("updated: "))
        .stdout(predicate::str::contains("helper.js"))
        .stdout(predicate::str::contains("created: "))
        .stdout(predicate::str::contains("INDEX.md"))
        .stdout(predicate::str::contains("DRY-RUN").not());

    // Nothing left to do, so nothing is echoed
    bootstrap(tmp.path())
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("updated: ").not())
        .stdout(predicate::str::contains("created: ").not());
}
