use assert_cmd::Command;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("stronglytyped").unwrap();
    // keep the user's stored config out of the picture
    let home = tempfile::tempdir().unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path());
    cmd
}

#[test]
fn help_lists_typing_test() {
    let output = bin().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tt"));
}

#[test]
fn inverted_bounds_fail_before_terminal_setup() {
    let output = bin()
        .args(["tt", "--min-length", "9", "--max-length", "3"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid word length bounds"), "{stderr}");
}

#[test]
fn unmatched_corpus_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("words.txt");
    std::fs::write(&words, "elephant\n").unwrap();

    let output = bin()
        .args(["tt", "--max-length", "4", "--corpus"])
        .arg(&words)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no corpus words"), "{stderr}");
}

#[test]
fn zero_length_is_rejected() {
    let output = bin().args(["tt", "--length", "0"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn non_tty_stdin_is_refused() {
    let output = bin().arg("tt").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("stdin must be a tty"), "{stderr}");
}
