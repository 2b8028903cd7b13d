//! Runs the extractor binary end to end.

use std::fs;
use std::process::Command;

use test_utils::{badc_csv, nasa_ames, temp_test_dir, write_test_file};

fn extractor() -> Command {
    Command::new(env!("CARGO_BIN_EXE_extractor"))
}

#[test]
fn test_json_lines_on_stdout() {
    let dir = temp_test_dir();
    write_test_file(dir.path(), "obs.csv", badc_csv::GLOBAL_TEMPERATURE);
    write_test_file(dir.path(), "flight.na", nasa_ames::FFI_1001);

    let output = extractor()
        .arg(dir.path())
        .args(["--level", "2", "--no-create-files", "--log-level", "error"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let docs: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["info"]["name"], "flight.na");
    assert_eq!(docs[0]["phenomena"].as_array().unwrap().len(), 2);
    assert_eq!(docs[1]["info"]["format"], "BADC CSV");
    assert_eq!(docs[1]["info"]["level"], 2);
}

#[test]
fn test_config_file_and_log_directory() {
    let dir = temp_test_dir();
    let input = write_test_file(dir.path(), "obs.csv", badc_csv::GLOBAL_TEMPERATURE);
    let docs = dir.path().join("docs");
    let logs = dir.path().join("logs");
    let config = write_test_file(
        dir.path(),
        "extractor.yaml",
        format!(
            "level: 3\njson-path: {}\nlog-path: {}\n",
            docs.display(),
            logs.display()
        ),
    );

    let status = extractor()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .status()
        .unwrap();
    assert!(status.success());

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(docs.join("obs.json")).unwrap()).unwrap();
    assert_eq!(doc["info"]["level"], 3);
    assert_eq!(doc["temporal"]["start_time"], "2020-01-01T00:00:00");
    assert!(logs.join("extractor.log").exists());
}

#[test]
fn test_invalid_level_rejected() {
    let dir = temp_test_dir();
    let status = extractor()
        .arg(dir.path())
        .args(["--level", "5"])
        .status()
        .unwrap();
    assert!(!status.success());
}
