#[test]
fn spanlight_version_contract() {
    let bin = assert_cmd::cargo::cargo_bin!("spanlight");
    let out = std::process::Command::new(bin)
        .args(["version"])
        .output()
        .expect("run spanlight version");

    assert!(out.status.success(), "spanlight version failed");
    let s = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(&s).expect("parse version json");

    assert_eq!(v["schema_version"].as_u64(), Some(1));
    assert_eq!(v["kind"].as_str(), Some("version"));
    assert_eq!(v["name"].as_str(), Some("spanlight"));
    assert!(!v["version"].as_str().unwrap_or("").is_empty());
}

#[test]
fn spanlight_version_text_output_contract() {
    let bin = assert_cmd::cargo::cargo_bin!("spanlight");
    let out = std::process::Command::new(bin)
        .args(["version", "--output", "text"])
        .output()
        .expect("run spanlight version --output text");

    assert!(out.status.success(), "spanlight version failed");
    let s = String::from_utf8_lossy(&out.stdout);
    assert!(
        s.trim_start().starts_with("spanlight "),
        "expected text output to start with `spanlight `"
    );
}
