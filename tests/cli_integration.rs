//! Integration tests that run the CLI binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_chatmark"));
    cmd.env_remove("CHATMARK_ESCAPE_LINKS");
    cmd.env_remove("CHATMARK_SHOW_SYSTEM");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run with `stdin` piped in, from a temp dir so dotenv() won't load a project .env.
fn run_with_stdin(cmd: &mut Command, stdin: &str) -> Output {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let mut child = cmd
        .current_dir(tmp.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary not found - run cargo build first");
    // The binary may exit before reading (config errors), so a broken pipe is fine here.
    let _ = child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes());
    child.wait_with_output().expect("wait for binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn cli_help_succeeds_and_outputs_usage() {
    let output = bin()
        .arg("--help")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let out = stdout(&output);
    assert!(out.contains("chatmark"), "expected usage text in output");
    assert!(out.contains("transcript"));
}

#[test]
fn cli_version_succeeds() {
    let output = bin()
        .arg("--version")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    assert!(stdout(&output).contains("chatmark"));
}

#[test]
fn renders_stdin() {
    let output = run_with_stdin(&mut bin(), "# Title\n\n**bold** and *italic*");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout(&output),
        "<h1>Title</h1>\n<p>\n<strong>bold</strong> and <em>italic</em></p>\n"
    );
}

#[test]
fn dash_reads_stdin() {
    let output = run_with_stdin(bin().arg("-"), "hello");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "<p>hello</p>\n");
}

#[test]
fn empty_input_prints_nothing() {
    let output = run_with_stdin(&mut bin(), "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn renders_file_to_output_file() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let input = tmp.path().join("reply.md");
    let out = tmp.path().join("reply.html");
    std::fs::write(&input, "```js\nvar x=1;\n```").expect("write input");

    let output = bin()
        .current_dir(tmp.path())
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty());
    let html = std::fs::read_to_string(&out).expect("read output");
    assert_eq!(html, "<pre><code class=\"language-js\">var x=1;\n</code></pre>");
}

#[test]
fn missing_input_file_exits_with_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .current_dir(tmp.path())
        .arg("does-not-exist.md")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: Failed to read does-not-exist.md"),
        "got: {}",
        stderr
    );
}

#[test]
fn escape_links_flag_and_env() {
    let input = r#"[x](a"b)"#;

    let verbatim = run_with_stdin(&mut bin(), input);
    assert!(stdout(&verbatim).contains(r#"href="a"b""#));

    let flagged = run_with_stdin(bin().arg("--escape-links"), input);
    assert!(stdout(&flagged).contains(r#"href="a&quot;b""#));

    let from_env = run_with_stdin(bin().env("CHATMARK_ESCAPE_LINKS", "1"), input);
    assert!(stdout(&from_env).contains(r#"href="a&quot;b""#));
}

#[test]
fn invalid_config_exits_with_error() {
    let output = run_with_stdin(bin().env("CHATMARK_ESCAPE_LINKS", "sometimes"), "hi");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CHATMARK_ESCAPE_LINKS"), "got: {}", stderr);
}

#[test]
fn renders_transcript() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let path = tmp.path().join("session.json");
    std::fs::write(
        &path,
        r#"{"messages":[
            {"role":"system","content":"secret prompt"},
            {"role":"user","content":"hi"},
            {"role":"assistant","content":"**hello**"}
        ]}"#,
    )
    .expect("write transcript");

    let output = bin()
        .current_dir(tmp.path())
        .arg("transcript")
        .arg(&path)
        .output()
        .expect("binary not found - run cargo build first");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let html = stdout(&output);
    assert!(!html.contains("secret prompt"));
    assert!(html.contains("<div class=\"message user\">\n<p>hi</p>\n</div>"));
    assert!(html.contains("<p><strong>hello</strong></p>"));

    let shown = bin()
        .current_dir(tmp.path())
        .args(["transcript", "--show-system"])
        .arg(&path)
        .output()
        .expect("binary not found - run cargo build first");
    assert!(stdout(&shown).contains("<p>secret prompt</p>"));
}

#[test]
fn invalid_transcript_exits_with_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let path = tmp.path().join("bad.json");
    std::fs::write(&path, "not json").expect("write transcript");

    let output = bin()
        .current_dir(tmp.path())
        .arg("transcript")
        .arg(&path)
        .output()
        .expect("binary not found - run cargo build first");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid transcript JSON"), "got: {}", stderr);
}

#[test]
fn completions_for_bash() {
    let output = bin()
        .args(["completions", "bash"])
        .output()
        .expect("binary not found - run cargo build first");
    assert!(output.status.success());
    assert!(stdout(&output).contains("chatmark"));
}
