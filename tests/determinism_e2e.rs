//! Determinism tests for the cubeguess binary
//!
//! Runs scripted sessions twice with the same seed and requires identical
//! output.

use dir_test::{dir_test, Fixture};
use similar_asserts::assert_eq;
use std::io::Write;
use std::process::{Command, Stdio};

/// Run `cubeguess play` with scripted stdin and capture stdout
fn run_session(cube_path: &str, mode: &str, seed: u64, script: &str) -> String {
    let mut child = Command::new(env!("CARGO_BIN_EXE_cubeguess"))
        .args([
            "play",
            "--cube",
            cube_path,
            "--mode",
            mode,
            "--seed",
            &seed.to_string(),
            "--verbosity",
            "verbose",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start cubeguess");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(script.as_bytes())
        .expect("Failed to write script");

    let output = child.wait_with_output().expect("Failed to wait for cubeguess");
    assert!(
        output.status.success(),
        "cubeguess failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Five cards: peek at two hints, give up, move on
fn challenge_script() -> String {
    "h\nh\n<\nr\nn\n".repeat(5)
}

/// Ten questions, always the first option
fn trivia_script() -> String {
    "1\nn\n".repeat(10)
}

#[dir_test(
    dir: "$CARGO_MANIFEST_DIR/test_cubes",
    glob: "**/*.json",
)]
fn test_challenge_determinism(fixture: Fixture<&str>) {
    let cube_path = fixture.path();
    let script = challenge_script();

    let run1 = run_session(cube_path, "challenge", 42, &script);
    let run2 = run_session(cube_path, "challenge", 42, &script);

    assert!(!run1.is_empty(), "Cube {} produced empty output", cube_path);
    assert!(run1.contains("Session complete: 0 / 5 cards guessed"));
    assert_eq!(
        run1, run2,
        "Cube {} produced different output with same seed",
        cube_path
    );
}

#[test]
fn test_trivia_seeds() {
    let cube_path = concat!(env!("CARGO_MANIFEST_DIR"), "/test_cubes/vintage_sample.json");
    let script = trivia_script();

    let seed42_run1 = run_session(cube_path, "trivia", 42, &script);
    let seed42_run2 = run_session(cube_path, "trivia", 42, &script);
    assert_eq!(seed42_run1, seed42_run2, "Seed 42 produced inconsistent output");
    assert!(seed42_run1.contains("questions correct"));

    let seed100 = run_session(cube_path, "trivia", 100, &script);
    assert_ne!(
        seed42_run1, seed100,
        "Different seeds produced identical output (highly unlikely)"
    );
}

#[test]
fn test_stats_command() {
    let cube_path = concat!(env!("CARGO_MANIFEST_DIR"), "/test_cubes/vintage_sample.json");
    let output = Command::new(env!("CARGO_BIN_EXE_cubeguess"))
        .args(["stats", "--cube", cube_path])
        .output()
        .expect("Failed to run cubeguess stats");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Cube Statistics ==="));
    assert!(stdout.lines().any(|line| line.trim() == "7  cards"));
    assert!(stdout.lines().any(|line| line.trim() == "3  from Limited Edition Alpha"));
}
