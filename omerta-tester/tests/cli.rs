use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "omerta-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_games_writes_output() {
    let exe = env!("CARGO_BIN_EXE_omerta-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-games", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available games"));
    assert!(content.contains("odds-evens"));
}

#[test]
fn cli_json_report_covers_every_game_and_seed() {
    let exe = env!("CARGO_BIN_EXE_omerta-tester");
    let output_path = temp_path("json");
    let status = Command::new(exe)
        .args([
            "--games",
            "hilo,odds-evens,crimes,stocks",
            "--iterations",
            "50",
            "--seeds",
            "1,2",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let runs: Vec<serde_json::Value> = serde_json::from_str(&content).expect("valid json");
    assert_eq!(runs.len(), 8);
    assert!(runs.iter().all(|r| r["passed"] == serde_json::Value::Bool(true)));
}

#[test]
fn cli_markdown_report() {
    let exe = env!("CARGO_BIN_EXE_omerta-tester");
    let output_path = temp_path("md");
    let status = Command::new(exe)
        .args(["--games", "stocks", "--iterations", "20", "--report", "markdown", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.starts_with("# Omerta Simulation Results"));
    assert!(content.contains("OLIV.final_ratio"));
}

#[test]
fn cli_rejects_unknown_game() {
    let exe = env!("CARGO_BIN_EXE_omerta-tester");
    let output = Command::new(exe)
        .args(["--games", "roulette", "--iterations", "1"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown game"), "{stderr}");
}
