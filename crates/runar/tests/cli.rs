use std::path::{Path, PathBuf};
use std::process::Command;

use runar_contracts::RUNAR_RUN_REPORT_SCHEMA_VERSION;
use serde_json::Value;

fn repo_root() -> PathBuf {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn run_runar(args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_runar");
    Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run runar")
}

fn write_source(dir: &Path, name: &str, src: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, src.as_bytes()).expect("write source");
    path
}

fn read_report(path: &Path) -> Value {
    let bytes = std::fs::read(path).expect("read report");
    serde_json::from_slice(&bytes).expect("parse report JSON")
}

fn stdout(out: &std::process::Output) -> String {
    String::from_utf8(out.stdout.clone()).expect("utf-8 stdout")
}

fn stderr(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn quiet_run_prints_only_program_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = write_source(dir.path(), "one.rnr", "ᛌ1ᚭᛧ\n");

    let out = run_runar(&["--quiet", src.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "ᚢ");
}

#[test]
fn startup_listing_precedes_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = write_source(dir.path(), "one.rnr", "ᛌᛁ\u{0333}ᚭᛧ\n");

    let out = run_runar(&[src.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0), "stderr:\n{}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "GRID: [\"ᛌ1ᚭᛧ\"]\nPOSITIONS: [(0, 0)]\nᚢ"
    );
}

#[test]
fn report_json_describes_halted_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = write_source(dir.path(), "shared.rnr", "ᛌ5ᛙᛧ\nᛍ\n2\nᛟ\nᚭ\n");
    let report = dir.path().join("out/report.json");

    let out = run_runar(&[
        "--quiet",
        "--report-json",
        report.to_str().unwrap(),
        src.to_str().unwrap(),
    ]);
    assert_eq!(out.status.code(), Some(0), "stderr:\n{}", stderr(&out));
    assert_eq!(stdout(&out), "ᚾ");

    let v = read_report(&report);
    assert_eq!(v["schema_version"], RUNAR_RUN_REPORT_SCHEMA_VERSION);
    assert_eq!(v["ok"], true);
    assert_eq!(v["halted"], true);
    assert_eq!(v["ticks"], 4);
    assert_eq!(v["output"], "ᚾ");
    let pointers = v["pointers"].as_array().expect("pointers[]");
    assert_eq!(pointers.len(), 2);
    assert_eq!(pointers[1]["symbol"], "ᛍ");
    assert_eq!(pointers[1]["value"], 7);
}

#[test]
fn stack_underflow_fails_with_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = write_source(dir.path(), "under.rnr", "ᛌ1ᛟᛧ\nᛌ1ᛟᛧ\n");
    let report = dir.path().join("report.json");

    let out = run_runar(&[
        "--quiet",
        "--report-json",
        report.to_str().unwrap(),
        src.to_str().unwrap(),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("RNR0101"), "stderr:\n{}", stderr(&out));

    let v = read_report(&report);
    assert_eq!(v["ok"], false);
    assert_eq!(v["error"]["code"], "RNR0101");
    assert_eq!(v["error"]["site"]["pointer"], 1);
    assert_eq!(v["error"]["tick"], 3);
}

#[test]
fn max_ticks_stops_endless_program() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = write_source(dir.path(), "loop.rnr", "ᛌᚭ\n");

    let out = run_runar(&["--quiet", "--max-ticks", "10", src.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "ᚠᚠᚠᚠᚠ");
    assert!(stderr(&out).contains("RNR0107"), "stderr:\n{}", stderr(&out));
}

#[test]
fn unknown_diacritic_is_a_load_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = write_source(dir.path(), "bad.rnr", "ᛌ\nᛁ\u{0301}ᛧ\n");
    let report = dir.path().join("report.json");

    let out = run_runar(&["--report-json", report.to_str().unwrap(), src.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "", "nothing runs after a load error");
    assert!(stderr(&out).contains("RNR0002"), "stderr:\n{}", stderr(&out));

    let v = read_report(&report);
    assert_eq!(v["error"]["phase"], "Load");
    assert_eq!(v["error"]["line"], 2);
}

#[test]
fn debug_traces_to_stdout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = write_source(dir.path(), "one.rnr", "ᛌ1ᚭᛧ\n");

    let out = run_runar(&["--quiet", "--debug", src.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0), "stderr:\n{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("command"), "stdout:\n{text}");
    assert!(text.contains("pointer vars"), "stdout:\n{text}");
    assert!(text.contains('ᚢ'), "stdout:\n{text}");
}

#[test]
fn missing_source_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.rnr");

    let out = run_runar(&[missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("read source"), "stderr:\n{}", stderr(&out));
}

#[test]
fn demos_match_expected_output() {
    let demos = repo_root().join("demos");
    let mut entries: Vec<PathBuf> = std::fs::read_dir(&demos)
        .expect("read demos dir")
        .map(|e| e.expect("dir entry").path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "rnr"))
        .collect();
    entries.sort();
    assert!(!entries.is_empty(), "no demos in {}", demos.display());

    for src in entries {
        let want = std::fs::read_to_string(src.with_extension("out"))
            .unwrap_or_else(|err| panic!("missing expected output for {}: {err}", src.display()));
        let out = run_runar(&["--quiet", "--max-ticks", "10000", src.to_str().unwrap()]);
        assert_eq!(
            out.status.code(),
            Some(0),
            "{}: stderr:\n{}",
            src.display(),
            stderr(&out)
        );
        assert_eq!(stdout(&out), want, "{}", src.display());
    }
}
