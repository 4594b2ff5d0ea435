use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const GREETER: &str = "module demo\n\
                       include \"cstdint\"\n\
                       Greeter {\n\
                           greet(name: string) -> string,\n\
                       }\n";

#[test]
fn compiles_a_file_to_a_header() {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("greeter.ridl");
    fs::write(&input_path, GREETER).expect("write input");
    let output_path = dir.path().join("greeter.h");

    Command::cargo_bin("ridl-cli")
        .expect("binary exists")
        .arg("--input")
        .arg(&input_path)
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    let header = fs::read_to_string(&output_path).expect("read output");
    assert!(header.starts_with("#pragma once\n"));
    assert!(header.contains("struct IGreeter"));
    assert!(header.contains("case greet_UID:"));
}

#[test]
fn reads_from_stdin_when_no_input_is_given() {
    let dir = tempdir().expect("tempdir");
    let output_path = dir.path().join("out.h");

    Command::cargo_bin("ridl-cli")
        .expect("binary exists")
        .arg("--output")
        .arg(&output_path)
        .write_stdin("module demo A { f() -> void, }")
        .assert()
        .success();

    let header = fs::read_to_string(&output_path).expect("read output");
    assert!(header.contains("// Generated by ridl from <stdin>"));
    assert!(header.contains("struct IA"));
}

#[test]
fn creates_missing_output_directories() {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("m.ridl");
    fs::write(&input_path, "module m A { f() -> void, }").expect("write input");
    let output_path = dir.path().join("gen").join("nested").join("m.h");

    Command::cargo_bin("ridl-cli")
        .expect("binary exists")
        .arg("--input")
        .arg(&input_path)
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    assert!(output_path.exists(), "header was not created");
}

#[test]
fn reports_errors_with_line_and_column() {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("bad.ridl");
    fs::write(&input_path, "module demo\nGreeter {\n    greet( -> string,\n}\n")
        .expect("write input");
    let output_path = dir.path().join("bad.h");

    Command::cargo_bin("ridl-cli")
        .expect("binary exists")
        .arg("--input")
        .arg(&input_path)
        .arg("--output")
        .arg(&output_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(":3:12: expected identifier"));

    assert!(!output_path.exists(), "no output should be written on failure");
}

#[test]
fn reports_missing_input_file() {
    let dir = tempdir().expect("tempdir");
    Command::cargo_bin("ridl-cli")
        .expect("binary exists")
        .arg("--input")
        .arg(dir.path().join("absent.ridl"))
        .arg("--output")
        .arg(dir.path().join("out.h"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input file"));
}
