use std::io::Write;
use std::process::Command;

fn taskrank(home: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_taskrank"));
    cmd.env("TASKRANK_HOME", home).env("TASKRANK_LOG", "error");
    cmd
}

fn write_tasks(dir: &std::path::Path) -> std::path::PathBuf {
    let p = dir.join("tasks.json");
    let mut f = std::fs::File::create(&p).unwrap();
    write!(
        f,
        r#"[
            {{"id": "a", "title": "Alpha", "due_date": "2026-03-08", "estimated_hours": 3, "importance": 5, "dependencies": ["b"]}},
            {{"id": "b", "title": "Beta", "estimated_hours": 1, "importance": 2, "dependencies": ["a"]}},
            {{"id": "c", "title": "Gamma", "due_date": "2026-06-01", "estimated_hours": 10, "importance": 1}}
        ]"#
    )
    .unwrap();
    p
}

#[test]
fn test_analyze_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = write_tasks(dir.path());

    let out = taskrank(dir.path())
        .args(["analyze", "--today", "2026-03-10", "--json", "--input"])
        .arg(&tasks)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let sorted = v["sorted"].as_array().unwrap();
    assert_eq!(sorted.len(), 3);
    assert_eq!(sorted[0]["id"], "a");
    assert_eq!(v["cycles"].as_array().unwrap().len(), 1);
    assert_eq!(v["errors"], serde_json::json!([]));
}

#[test]
fn test_suggest_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = write_tasks(dir.path());

    let out = taskrank(dir.path())
        .args(["suggest", "--today", "2026-03-10", "--limit", "2", "--input"])
        .arg(&tasks)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("# Top 2 tasks"));
    assert!(stdout.contains("Overdue by 2 day(s)."));
    assert!(stdout.contains("a -> b -> a"));
}

#[test]
fn test_invalid_payload_fails() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("bad.json");
    std::fs::write(&p, r#"{"not_tasks": 1}"#).unwrap();

    let out = taskrank(dir.path())
        .args(["analyze", "--input"])
        .arg(&p)
        .output()
        .unwrap();
    assert!(!out.status.success());
}
