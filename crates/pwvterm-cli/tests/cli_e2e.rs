//! End-to-end tests driving the `pwvterm` binary over a small corpus on
//! disk. Interactive mode is not exercised here; `exec` and scripted
//! `repl` cover the same dispatch path.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn pwvterm_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pwvterm"))
}

fn write_fixture_corpus(dir: &Path) -> PathBuf {
    let corpus = serde_json::json!({
        "posts": {
            "p1": {
                "slug": "p1",
                "title": "Acme ships v1",
                "companies": ["Acme"],
                "topics": ["devtools"],
                "pubDate": "2024-01-01",
                "quotes": [{"quote": "Ship it.", "speaker": "Jane Doe"}]
            },
            "p2": {
                "slug": "p2",
                "title": "Acme raises",
                "companies": ["Acme"],
                "people": [{"name": "Jane Doe", "role": "CEO"}],
                "pubDate": "2023-12-31"
            }
        },
        "entities": {
            "companies": {"Acme": {"posts": ["p1", "p2"], "mentions": 2}},
            "people": {"Jane Doe": {"posts": ["p2"], "mentions": 1, "role": "CEO"}},
            "topics": {"devtools": {"posts": ["p1"], "mentions": 1}},
            "quotes": [
                {"quote": "Ship it.", "speaker": "Jane Doe",
                 "postSlug": "p1", "postTitle": "Acme ships v1"}
            ]
        },
        "metadata": {"totalPosts": 2}
    });
    let path = dir.join("corpus.json");
    fs::write(&path, serde_json::to_string_pretty(&corpus).unwrap()).unwrap();
    path
}

fn write_fixture_portfolio(dir: &Path) -> PathBuf {
    let portfolio = serde_json::json!({
        "representative": [
            {"name": "Acme", "url": "https://acme.example", "slug": "acme",
             "tags": ["devtools"]}
        ]
    });
    let path = dir.join("portfolio.json");
    fs::write(&path, serde_json::to_string_pretty(&portfolio).unwrap()).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(pwvterm_bin())
        .args(args)
        .output()
        .expect("run pwvterm")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn exec_lists_companies() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_fixture_corpus(dir.path());

    let output = run(&["--corpus", corpus.to_str().unwrap(), "exec", "companies"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Acme (2 mentions)"), "stdout: {stdout}");
}

#[test]
fn exec_unknown_command_fails() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_fixture_corpus(dir.path());

    let output = run(&["--corpus", corpus.to_str().unwrap(), "exec", "frobnicate"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("command not found"));
}

#[test]
fn exec_fails_cleanly_on_a_missing_corpus() {
    let output = run(&["--corpus", "/nonexistent/corpus.json", "exec", "stats"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("loading corpus"));
}

#[test]
fn repl_commands_share_session_state() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_fixture_corpus(dir.path());

    // "1" right after "companies" opens the Acme profile in the same
    // session, which only works if the selectable list persisted.
    let output = run(&[
        "--corpus",
        corpus.to_str().unwrap(),
        "repl",
        "--quiet",
        "-c",
        "companies",
        "-c",
        "1",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("MENTIONS: 2 posts"), "stdout: {stdout}");
}

#[test]
fn repl_script_file_runs_and_echoes() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_fixture_corpus(dir.path());
    let portfolio = write_fixture_portfolio(dir.path());

    let script = dir.path().join("session.pwv");
    fs::write(
        &script,
        "# warm-up\nstats\nportfolio\n// done\nexit\nnever-reached\n",
    )
    .unwrap();

    let output = run(&[
        "--corpus",
        corpus.to_str().unwrap(),
        "--portfolio",
        portfolio.to_str().unwrap(),
        "repl",
        "--script",
        script.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("pwvterm> stats"));
    assert!(stdout.contains("portfolio:  1"));
    assert!(stdout.contains("REPRESENTATIVE"));
    // `exit` stops the script before the bogus trailing line.
    assert!(!stdout.contains("never-reached"));
}

#[test]
fn repl_script_stops_on_error_unless_told_otherwise() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_fixture_corpus(dir.path());

    let script = dir.path().join("bad.pwv");
    fs::write(&script, "frobnicate\nstats\n").unwrap();

    let output = run(&[
        "--corpus",
        corpus.to_str().unwrap(),
        "repl",
        "--quiet",
        "--script",
        script.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("script failed at line 1"));
    assert!(!stdout_of(&output).contains("CORPUS STATS"));

    let output = run(&[
        "--corpus",
        corpus.to_str().unwrap(),
        "repl",
        "--quiet",
        "--continue-on-error",
        "--script",
        script.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("CORPUS STATS"));
}

#[test]
fn repl_script_reads_stdin_with_dash() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_fixture_corpus(dir.path());

    let mut child = Command::new(pwvterm_bin())
        .args([
            "--corpus",
            corpus.to_str().unwrap(),
            "repl",
            "--quiet",
            "--script",
            "-",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn pwvterm");
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(b"quotes\n")
        .unwrap();
    let output = child.wait_with_output().expect("wait for pwvterm");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("[p1-0]"));
}

#[test]
fn seeded_showcase_random_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_fixture_corpus(dir.path());

    let args = [
        "--corpus",
        corpus.to_str().unwrap(),
        "--seed",
        "7",
        "exec",
        "showcase",
        "random",
    ];
    let first = run(&args);
    let second = run(&args);
    assert!(first.status.success());
    assert_eq!(stdout_of(&first), stdout_of(&second));
}
