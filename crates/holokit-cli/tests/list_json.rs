use std::process::Command;

fn holokit_bin() -> String {
    std::env::var("CARGO_BIN_EXE_holokit").unwrap_or_else(|_| {
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/debug/holokit")
            .to_string_lossy()
            .to_string()
    })
}

#[test]
fn list_json_stdout_is_the_catalog() {
    let output = Command::new(holokit_bin())
        .args(["list", "--json"])
        .env("RUST_LOG", "debug")
        .output()
        .expect("failed to spawn holokit list");

    assert!(output.status.success(), "holokit list failed: {:?}", output.status);
    let stdout = String::from_utf8(output.stdout).expect("stdout not utf-8");
    assert!(
        !stdout.contains('\u{1b}'),
        "stdout contaminated with ANSI escape codes: {stdout:?}"
    );

    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is not JSON");
    let rows = rows.as_array().expect("catalog is not an array");
    assert_eq!(rows.len(), 18);
    assert_eq!(rows[0]["id"], "cardOne");
    assert_eq!(rows[6]["id"], "basicGlare");
    assert_eq!(rows[6]["passes"][0], "glare");
    assert_eq!(rows[6]["defaults"]["geometry"]["width"], 260.0);
}

#[test]
fn render_rejects_unknown_variant() {
    let output = Command::new(holokit_bin())
        .args(["render", "--variant", "cardSeven"])
        .output()
        .expect("failed to spawn holokit render");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cardSeven"), "stderr: {stderr}");
}
