use std::{
    io::Write,
    process::{Command, Stdio},
};

const CONFIG: &str = r#"{"unitInformation":[{"shorthand":"FF","cost1":1.0},{"shorthand":"EF","cost1":4.0,"attackRange":3.0},{"shorthand":"DF","cost1":3.0,"attackRange":3.0,"attackDamageWalker":4.0},{"shorthand":"PI","cost1":1.0,"attackRange":3.0,"attackDamageWalker":1.0},{"shorthand":"EI","cost1":3.0,"attackRange":4.5,"attackDamageWalker":3.0},{"shorthand":"SI","cost1":1.0,"attackRange":3.0},{"shorthand":"RM"},{"shorthand":"UP"}]}"#;

const FIRST_TURN: &str = r#"{"turnInfo":[0,0,0],"p1Stats":[30,40,5,0],"p2Stats":[30,40,5,0],"p1Units":[[],[],[],[],[],[],[],[]],"p2Units":[[],[],[],[],[],[],[],[]],"events":{"breach":[]}}"#;

const GAME_OVER: &str = r#"{"turnInfo":[2,0,0]}"#;

fn play(script: &str, extra_args: &[&str]) -> (bool, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_diamond-siege"))
        .args(extra_args)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to launch diamond-siege");

    // The adapter may exit before reading everything when arguments are rejected.
    let _ = child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(script.as_bytes());

    let output = child.wait_with_output().expect("diamond-siege did not exit");
    (
        output.status.success(),
        String::from_utf8(output.stdout).expect("stdout is utf8"),
        String::from_utf8(output.stderr).expect("stderr is utf8"),
    )
}

#[test]
fn deploy_turn_produces_build_and_deploy_lines() {
    let script = format!("{CONFIG}\n{FIRST_TURN}\n{GAME_OVER}\n");
    let (success, stdout, _) = play(&script, &["--seed", "11"]);
    assert!(success);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected output: {stdout}");
    assert!(lines[0].starts_with(r#"[["FF",0,13]"#));
    assert!(lines[1].starts_with("[[\"SI\","));
}

#[test]
fn log_level_follows_rust_log() {
    let script = format!("{CONFIG}\n{FIRST_TURN}\n{GAME_OVER}\n");
    let (success, stdout, stderr) = play(&script, &["--seed", "11"]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 2);
    assert!(
        !stderr.contains("starting engine session"),
        "info output leaked past RUST_LOG=warn: {stderr}"
    );
}

#[test]
fn identical_seeds_produce_identical_submissions() {
    let script = format!("{CONFIG}\n{FIRST_TURN}\n{FIRST_TURN}\n{GAME_OVER}\n");
    let (_, first, _) = play(&script, &["--seed", "5"]);
    let (_, second, _) = play(&script, &["--seed", "5"]);
    assert_eq!(first, second);
    assert_eq!(first.lines().count(), 4);
}

#[test]
fn missing_strategy_file_is_reported() {
    let (success, stdout, stderr) = play(
        &format!("{CONFIG}\n"),
        &["--strategy", "/nonexistent/diamond-siege.toml"],
    );
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("failed to read strategy config"));
}
