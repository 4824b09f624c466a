//! Shared test utilities for integration tests
//!
//! Provides fixture trees and small helpers used across test files.

#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::prelude::*;

/// Mixed-language tree with one ignored dependency folder.
pub fn make_polyglot_fixture() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child("src/a.py")
        .write_str("import os\n\ndef foo(): pass\n")
        .expect("write a.py");

    tmp.child("web/user-service.ts")
        .write_str(
            "import { api } from './api';\n\
             export class UserService {}\n\
             export default UserService;\n",
        )
        .expect("write user-service.ts");

    tmp.child("cmd/main.go")
        .write_str("package main\n\nimport (\n\t\"fmt\"\n)\n\nfunc Run() { fmt.Println() }\n")
        .expect("write main.go");

    tmp.child("node_modules/dep/index.js")
        .write_str("module.exports = {};\n")
        .expect("write dependency");

    tmp
}

/// `formatdoc bootstrap --root <root>` with quiet logging defaults.
pub fn bootstrap(root: &std::path::Path) -> Command
{
    let mut cmd = Command::cargo_bin("formatdoc").expect("bin");
    cmd.env_remove("RUST_LOG")
        .arg("bootstrap")
        .arg("--root")
        .arg(root);
    cmd
}

/// Read a fixture file relative to the temp root.
pub fn read(
    tmp: &assert_fs::TempDir,
    rel: &str,
) -> String
{
    std::fs::read_to_string(tmp.path().join(rel)).expect("read fixture file")
}
