// Black-box CLI tests for the three binaries, driven as subprocesses.
//
// Mirrors the teacher's e2e suite: locate the built binary via
// CARGO_BIN_EXE_<name> (falling back to walking up from this test binary's
// own location), feed it stdin or a temp file, and assert on stdout/exit code.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn bin(name: &str) -> PathBuf {
    let env_var = format!("CARGO_BIN_EXE_{name}");
    if let Ok(p) = std::env::var(&env_var) {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push(name);
    p
}

fn run_with_stdin(name: &str, args: &[&str], input: &[u8]) -> (bool, String, String) {
    let mut child = Command::new(bin(name))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("failed to spawn {name}: {e}"));

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input)
        .expect("write to stdin");

    let output = child.wait_with_output().expect("wait on child");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

// ── cut ──────────────────────────────────────────────────────────────────

#[test]
fn cut_selects_a_field_by_delimiter() {
    let (ok, stdout, _) = run_with_stdin("cut", &["-d:", "-f2"], b"a:b:c\n");
    assert!(ok);
    assert_eq!(stdout, "b\n");
}

#[test]
fn cut_selects_a_byte_range() {
    let (ok, stdout, _) = run_with_stdin("cut", &["-b1-3"], b"abcdef\n");
    assert!(ok);
    assert_eq!(stdout, "abc\n");
}

#[test]
fn cut_suppresses_lines_without_the_delimiter() {
    let (ok, stdout, _) = run_with_stdin("cut", &["-d:", "-f2", "-s"], b"nodelim\na:b\n");
    assert!(ok);
    assert_eq!(stdout, "b\n");
}

#[test]
fn cut_rejects_conflicting_list_selectors() {
    let (ok, _, stderr) = run_with_stdin("cut", &["-b1", "-f2"], b"");
    assert!(!ok);
    assert!(!stderr.is_empty());
}

#[test]
fn cut_reads_from_a_named_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("in.txt");
    fs::write(&path, "x:y:z\n").unwrap();

    let output = Command::new(bin("cut"))
        .args(["-d:", "-f1,3", path.to_str().unwrap()])
        .output()
        .expect("run cut");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "x:z\n");
}

// ── fold ─────────────────────────────────────────────────────────────────

#[test]
fn fold_wraps_at_width_breaking_on_spaces() {
    let (ok, stdout, _) = run_with_stdin("fold", &["-w5", "-s"], b"hello world\n");
    assert!(ok);
    assert_eq!(stdout, "hello\nworld\n");
}

#[test]
fn fold_hard_wraps_without_dash_s() {
    let (ok, stdout, _) = run_with_stdin("fold", &["-w3"], b"abcdefg\n");
    assert!(ok);
    assert_eq!(stdout, "abc\ndef\ng\n");
}

#[test]
fn fold_byte_count_mode_ignores_display_width() {
    // -b counts bytes, so a line with a two-byte UTF-8 character still
    // wraps on byte count rather than on decoded glyph count.
    let (ok, stdout, _) = run_with_stdin("fold", &["-w2", "-b"], "é\n".as_bytes());
    assert!(ok);
    // 'é' is 2 bytes; it alone fills the width, then the newline starts
    // a fresh line.
    assert_eq!(stdout, "é\n\n");
}

// ── unorm ────────────────────────────────────────────────────────────────

#[test]
fn unorm_decomposes_to_nfd() {
    // U+00E9 (LATIN SMALL LETTER E WITH ACUTE) decomposes to 'e' + U+0301.
    let input = "\u{00e9}\n";
    let (ok, stdout, _) = run_with_stdin("unorm", &["-n", "NFD"], input.as_bytes());
    assert!(ok);
    assert_eq!(stdout, "e\u{0301}\n");
}

#[test]
fn unorm_composes_back_to_nfc() {
    let input = "e\u{0301}\n";
    let (ok, stdout, _) = run_with_stdin("unorm", &["-n", "NFC"], input.as_bytes());
    assert!(ok);
    assert_eq!(stdout, "\u{00e9}\n");
}

#[test]
fn unorm_discard_policy_drops_invalid_bytes() {
    let mut input = b"ab".to_vec();
    input.push(0xFF);
    input.extend_from_slice(b"cd\n");
    let (ok, stdout, _) = run_with_stdin("unorm", &["-p", "discard"], &input);
    assert!(ok);
    assert_eq!(stdout, "abcd\n");
}

#[test]
fn unorm_replace_policy_substitutes_configured_char() {
    let mut input = b"ab".to_vec();
    input.push(0xFF);
    input.extend_from_slice(b"cd\n");
    let (ok, stdout, _) = run_with_stdin(
        "unorm",
        &["-p", "replace", "--replace-char=0x3F"],
        &input,
    );
    assert!(ok);
    assert_eq!(stdout, "ab?cd\n");
}

#[test]
fn unorm_abort_policy_fails_on_invalid_byte() {
    let mut input = b"ab".to_vec();
    input.push(0xFF);
    input.extend_from_slice(b"cd\n");
    let (ok, _, stderr) = run_with_stdin("unorm", &["-p", "abort"], &input);
    assert!(!ok);
    assert!(!stderr.is_empty());
}

#[test]
fn unorm_reads_multiple_files_independently() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "\u{00e9}\n").unwrap();
    fs::write(&b, "\u{00e8}\n").unwrap();

    let output = Command::new(bin("unorm"))
        .args(["-n", "NFD", a.to_str().unwrap(), b.to_str().unwrap()])
        .output()
        .expect("run unorm");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "e\u{0301}\ne\u{0300}\n"
    );
}
