use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn write_temp_filters(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::with_suffix(".yaml").expect("create filters yaml");
    file.write_all(contents.as_bytes())
        .expect("write filters yaml");
    file
}

fn run_boolfilter(args: &[&str], stdin: Option<&str>) -> Output {
    let exe = env!("CARGO_BIN_EXE_boolfilter");

    let mut child = Command::new(exe)
        .args(args)
        .env_remove("BOOLFILTER_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("run boolfilter");

    {
        let mut child_stdin = child.stdin.take().expect("stdin");
        if let Some(input) = stdin {
            child_stdin
                .write_all(input.as_bytes())
                .expect("write stdin");
        }
    }

    child.wait_with_output().expect("wait for boolfilter")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("boolfilter failed: {}", stderr);
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}

#[test]
fn bare_token_matches_true_only() {
    let output = run_boolfilter(&["--filter", "dangling", "true", "false", "missing"], None);
    assert_eq!(
        stdout_lines(&output),
        vec!["true\tmatch", "false\tno-match", "missing\tno-match"]
    );
}

#[test]
fn negated_token_matches_false_and_missing() {
    let output = run_boolfilter(
        &["--filter", "not-dangling", "true", "false", "missing"],
        None,
    );
    assert_eq!(
        stdout_lines(&output),
        vec!["true\tno-match", "false\tmatch", "missing\tmatch"]
    );
}

#[test]
fn repeated_filters_widen_the_match() {
    let output = run_boolfilter(&["-f", "!=true", "-f", "=true", "true", "false"], None);
    assert_eq!(stdout_lines(&output), vec!["true\tmatch", "false\tmatch"]);
}

#[test]
fn no_filters_match_nothing_but_missing() {
    let output = run_boolfilter(&["true", "false", "missing"], None);
    assert_eq!(
        stdout_lines(&output),
        vec!["true\tno-match", "false\tno-match", "missing\tmatch"]
    );
}

#[test]
fn empty_clause_is_rejected() {
    let output = run_boolfilter(&["--filter", "", "true"], None);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid expression"), "stderr: {stderr}");
}

#[test]
fn invalid_subject_is_rejected() {
    let output = run_boolfilter(&["--filter", "dangling", "perhaps"], None);
    assert!(!output.status.success());
}

#[test]
fn subjects_are_read_from_stdin() {
    let output = run_boolfilter(&["--filter", "=false"], Some("true\n\nfalse\nmissing\n"));
    assert_eq!(
        stdout_lines(&output),
        vec!["true\tno-match", "false\tmatch", "missing\tmatch"]
    );
}

#[test]
fn config_file_clauses_union_with_cli() {
    let filters = write_temp_filters("filters:\n  - not-dangling\n");
    let path: PathBuf = filters.path().to_path_buf();

    let output = run_boolfilter(
        &[
            "--config",
            path.to_str().unwrap(),
            "--format",
            "jsonl",
            "true",
            "false",
        ],
        None,
    );
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(first["subject"], "true");
    assert_eq!(first["matched"], false);

    let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(second["matched"], true);

    let widened = run_boolfilter(
        &["--config", path.to_str().unwrap(), "--filter", "dangling", "true"],
        None,
    );
    assert_eq!(stdout_lines(&widened), vec!["true\tmatch"]);
}
