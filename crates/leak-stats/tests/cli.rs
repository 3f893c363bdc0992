use std::path::Path;
use std::process::{Command, Output};

use plist::{Dictionary, Value};
use tempfile::TempDir;

const LEAKS_KEY: &str = "com.apple.xray.instrument-type.homeleaks";

fn run(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_leak-stats"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to launch leak-stats")
}

fn raw_leak(description: &str, count: i64) -> Value {
    let mut dict = Dictionary::new();
    dict.insert("name".to_string(), Value::from("Closure"));
    dict.insert("description".to_string(), Value::from(description));
    dict.insert("debugDescription".to_string(), Value::from(""));
    dict.insert("displayAddress".to_string(), Value::from("0x600000c8d200"));
    dict.insert("isCycle".to_string(), Value::from(false));
    dict.insert("isRootLeak".to_string(), Value::from(true));
    dict.insert("allocationTimestamp".to_string(), Value::from(3_i64));
    dict.insert("count".to_string(), Value::from(count));
    dict.insert("size".to_string(), Value::from(32_i64));
    Value::Dictionary(dict)
}

fn write_trace(dir: &Path, filename: &str, leaks: Vec<Value>) {
    let mut root = Dictionary::new();
    root.insert(LEAKS_KEY.to_string(), Value::Array(leaks));
    Value::Dictionary(root).to_file_xml(dir.join(filename)).unwrap();
}

#[test]
fn test_end_to_end_relative_paths() {
    let work = TempDir::new().unwrap();
    let traces = work.path().join("traces");
    std::fs::create_dir_all(&traces).unwrap();
    write_trace(
        &traces,
        "Leakmax-20190208101500-leaks.plist",
        vec![raw_leak("LeakedClosure", 2), raw_leak("LeakedClosure", 3)],
    );

    let output = run(&["traces", "stats.plist"], work.path());

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Found leaks:\n 5x LeakedClosure\n"
    );

    let written = Value::from_file(work.path().join("stats.plist")).unwrap();
    let counts = written
        .as_dictionary()
        .and_then(|root| root.get("leaksCountByName"))
        .and_then(Value::as_dictionary)
        .unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(
        counts.get("LeakedClosure").and_then(Value::as_signed_integer),
        Some(5)
    );
}

#[test]
fn test_empty_directory_reports_no_leaks() {
    let work = TempDir::new().unwrap();
    std::fs::create_dir_all(work.path().join("traces")).unwrap();

    let output = run(&["traces", "stats.json"], work.path());

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "No leaks.\n");
    let json = std::fs::read_to_string(work.path().join("stats.json")).unwrap();
    assert!(json.contains("\"leaksCountByName\": {}"));
}

#[test]
fn test_wrong_argument_count_exits_one() {
    let work = TempDir::new().unwrap();

    for args in [&[][..], &["traces"][..], &["a", "b", "c"][..]] {
        let output = run(args, work.path());
        assert_eq!(output.status.code(), Some(1), "args: {args:?}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.starts_with("Error: "), "stderr: {stderr}");
        assert!(stderr.contains("<INPUT_DIR>"), "stderr: {stderr}");
    }
}

#[test]
fn test_missing_input_directory_exits_one() {
    let work = TempDir::new().unwrap();

    let output = run(&["missing", "stats.plist"], work.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
    assert!(!work.path().join("stats.plist").exists());
}

#[test]
fn test_unwritable_output_exits_one() {
    let work = TempDir::new().unwrap();
    std::fs::create_dir_all(work.path().join("traces")).unwrap();

    let output = run(&["traces", "no-such-dir/stats.plist"], work.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: "));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_empty_path_argument_is_rejected_as_usage_error() {
    let work = TempDir::new().unwrap();

    let output = run(&["", "stats.plist"], work.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: Invalid arguments"), "stderr: {stderr}");
    assert!(!work.path().join("stats.plist").exists());
}
