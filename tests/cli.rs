use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn algotrace(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_algotrace"))
        .args(args)
        .output()
        .unwrap()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("algotrace-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn prints_json_report() {
    let out = algotrace(&["quick-sort", "5,3,8,1"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["sorted"], serde_json::json!([1, 3, 5, 8]));
    assert!(value["steps"].is_array());
}

#[test]
fn silent_flag_drops_steps() {
    let out = algotrace(&["--silent", "knapsack", "50", "60,10;100,20;120,30"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["maxValue"], 220);
    assert!(value.get("steps").is_none());
}

#[test]
fn directed_flag_changes_distances() {
    let graph = "0,1,4;0,2,1;1,2,2;1,3,5;2,3,8";
    let undirected = algotrace(&["dijkstra", "4", graph, "0"]);
    let directed = algotrace(&["dijkstra", "--directed", "4", graph, "0"]);
    let u: serde_json::Value = serde_json::from_slice(&undirected.stdout).unwrap();
    let d: serde_json::Value = serde_json::from_slice(&directed.stdout).unwrap();
    assert_eq!(u["distances"], serde_json::json!([0, 3, 1, 8]));
    assert_eq!(d["distances"], serde_json::json!([0, 4, 1, 9]));
}

#[test]
fn negative_positional_argument_is_not_a_flag() {
    let out = algotrace(&["linear-search", "4,-3,7", "-3"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["index"], 1);
}

#[test]
fn errors_exit_with_one() {
    let out = algotrace(&["bubble-sort", "1,two,3"]);
    assert_eq!(out.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(value["error"].as_str().unwrap().contains("two"));

    let out = algotrace(&["--format", "text", "no-such-sort", "1"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("no-such-sort"));
}

#[test]
fn usage_errors_keep_stdout_clean() {
    let out = algotrace(&["--bogus", "quick-sort", "1,2"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unrecognized option '--bogus'"));
    assert!(stderr.contains("Usage: algotrace"));

    let help = algotrace(&["--help"]);
    assert!(help.status.success());
    assert!(String::from_utf8_lossy(&help.stdout).starts_with("Usage: algotrace"));
    assert!(help.stderr.is_empty());
}

#[test]
fn runs_a_structure_script() {
    let out = algotrace(&["--silent", "queue", "enqueue,4;enqueue,9;dequeue"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["contents"], serde_json::json!([9]));
    assert_eq!(value["results"][2], "Dequeued: 4");
}

#[test]
fn list_shows_every_family() {
    let out = algotrace(&["list"]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    let families = [
        "sorting:",
        "searching:",
        "graph:",
        "dynamic programming:",
        "string matching:",
        "greedy:",
        "data structures:",
    ];
    for family in families {
        assert!(text.contains(family), "{family}");
    }
}

#[test]
fn file_mode_reads_input_and_writes_output() {
    let dir = scratch_dir("file-mode");
    fs::write(dir.join("input.txt"), "ABCBDAB\r\nBDCABA\n").unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_algotrace"))
        .arg("lcs")
        .current_dir(&dir)
        .status()
        .unwrap();
    assert!(status.success());
    let written = fs::read_to_string(dir.join("output.txt")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["length"], 4);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn file_mode_without_input_fails() {
    let dir = scratch_dir("missing-input");
    let out = Command::new(env!("CARGO_BIN_EXE_algotrace"))
        .arg("huffman")
        .current_dir(&dir)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(value["error"].as_str().unwrap().contains("input.txt"));
    let _ = fs::remove_dir_all(&dir);
}
