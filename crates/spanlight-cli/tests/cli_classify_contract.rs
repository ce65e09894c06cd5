use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn classify_text(text: &str) -> String {
    let out = Command::new(env!("CARGO_BIN_EXE_spanlight"))
        .args(["classify", "--text", text, "--output", "text"])
        .output()
        .expect("run spanlight classify");
    assert!(out.status.success(), "spanlight classify failed");
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

#[test]
fn classify_text_output_contract() {
    assert_eq!(classify_text("{\n  \"a\": 1\n}"), "json");
    assert_eq!(classify_text("Buy it for $5 today"), "plain");
    assert_eq!(classify_text("some **bold** claim"), "markup");
    assert_eq!(classify_text("$$\\int_0^1 x\\,dx$$"), "markup");
}

#[test]
fn classify_json_output_contract() {
    Command::new(env!("CARGO_BIN_EXE_spanlight"))
        .args(["classify", "--text", "[1, 2]"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"content_kind\":\"json\""));
}
