use std::{fs, path::Path, process::Command};

use assert_cmd::prelude::*;
use mockito::{Matcher, Mock, ServerGuard};
use predicates::prelude::*;
use serde_json::json;
use tempfile::{TempDir, tempdir};

const SNIPPETS: &str = r#"[{"name":"hello.py","code":"print('hello')\n"},{"name":"pkg/util.py","code":"def add(a, b):\n    return a + b\n"}]"#;

fn codegen_cmd(workdir: &TempDir, server_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("codegen-cli").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("CODEGEN_KEY_FILE")
        .env("CODEGEN_API_BASE_URL", server_url)
        .env("RUST_LOG", "warn");
    cmd
}

fn write_key(workdir: &TempDir) -> String {
    let path = workdir.path().join("openai.key");
    fs::write(&path, "sk-test\n").unwrap();
    path.to_string_lossy().into_owned()
}

fn completion_mock(server: &mut ServerGuard, content: &str) -> Mock {
    server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
            })
            .to_string(),
        )
        .create()
}

fn assert_empty_or_missing(dir: &Path) {
    if dir.exists() {
        assert_eq!(fs::read_dir(dir).unwrap().count(), 0);
    }
}

#[test]
fn test_help_message() {
    Command::cargo_bin("codegen-cli")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--text-prompt"))
        .stdout(predicate::str::contains("--file-prompt"))
        .stdout(predicate::str::contains("gpt-4o-mini"));
}

#[test]
fn test_writes_one_file_per_snippet() {
    let workdir = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = completion_mock(&mut server, SNIPPETS);
    let key = write_key(&workdir);
    let out = workdir.path().join("generated/nested");

    codegen_cmd(&workdir, &server.url())
        .args(["--text-prompt", "Write a hello world script", "--key-file", &key])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created:"))
        .stdout(predicate::str::contains("hello.py"));

    mock.assert();
    assert_eq!(fs::read_to_string(out.join("hello.py")).unwrap(), "print('hello')\n");
    assert_eq!(
        fs::read_to_string(out.join("pkg/util.py")).unwrap(),
        "def add(a, b):\n    return a + b\n"
    );
}

#[test]
fn test_sends_prompt_and_model() {
    let workdir = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({ "model": "gpt-4o" })),
            Matcher::Regex("Sort a list of numbers".to_string()),
        ]))
        .with_status(200)
        .with_body(json!({ "choices": [{ "message": { "content": "[]" } }] }).to_string())
        .create();
    let key = write_key(&workdir);
    let prompt_file = workdir.path().join("prompt.txt");
    fs::write(&prompt_file, "Sort a list of numbers").unwrap();

    codegen_cmd(&workdir, &server.url())
        .args(["--model", "gpt-4o", "--key-file", &key, "--file-prompt"])
        .arg(&prompt_file)
        .arg(workdir.path().join("out"))
        .assert()
        .success();

    mock.assert();
    assert!(workdir.path().join("out").is_dir());
}

#[test]
fn test_missing_prompt_prints_usage() {
    let workdir = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();
    let key = write_key(&workdir);

    codegen_cmd(&workdir, &server.url())
        .args(["--key-file", &key, "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains("--text-prompt"));

    mock.assert();
    assert!(!workdir.path().join("out").exists());
}

#[test]
fn test_missing_directory_is_usage_error() {
    let workdir = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();

    codegen_cmd(&workdir, &server.url())
        .args(["--text-prompt", "hello"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));

    mock.assert();
}

#[test]
fn test_unreadable_prompt_file() {
    let workdir = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();
    let key = write_key(&workdir);

    codegen_cmd(&workdir, &server.url())
        .args(["--file-prompt", "does-not-exist.txt", "--key-file", &key, "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.txt"));

    mock.assert();
}

#[test]
fn test_missing_credential() {
    let workdir = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();
    let key = workdir.path().join("missing.key");

    codegen_cmd(&workdir, &server.url())
        .args(["--text-prompt", "hello", "--key-file"])
        .arg(&key)
        .arg("out")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key"));

    mock.assert();
}

#[test]
fn test_invalid_json_writes_nothing() {
    let workdir = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = completion_mock(&mut server, "Here is your code: print('hello')");
    let key = write_key(&workdir);
    let out = workdir.path().join("out");

    codegen_cmd(&workdir, &server.url())
        .args(["--text-prompt", "hello", "--key-file", &key])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));

    mock.assert();
    assert_empty_or_missing(&out);
}

#[test]
fn test_api_error_is_reported() {
    let workdir = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body(json!({ "error": { "message": "Rate limit reached" } }).to_string())
        .create();
    let key = write_key(&workdir);
    let out = workdir.path().join("out");

    codegen_cmd(&workdir, &server.url())
        .args(["--text-prompt", "hello", "--key-file", &key])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rate limit reached"));

    mock.assert();
    assert_empty_or_missing(&out);
}

#[test]
fn test_unknown_model_is_rejected() {
    let workdir = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();
    let key = write_key(&workdir);

    codegen_cmd(&workdir, &server.url())
        .args(["--text-prompt", "hello", "--model", "gpt-3.5-turbo", "--key-file", &key, "out"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("gpt-4o-mini"));

    mock.assert();
}

#[test]
fn test_reference_inputs_are_sent() {
    let workdir = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("def legacy_helper".to_string()))
        .with_status(200)
        .with_body(json!({ "choices": [{ "message": { "content": "[]" } }] }).to_string())
        .create();
    let key = write_key(&workdir);
    fs::create_dir(workdir.path().join("src")).unwrap();
    fs::write(workdir.path().join("src/legacy.py"), "def legacy_helper(): pass").unwrap();

    codegen_cmd(&workdir, &server.url())
        .args(["--text-prompt", "port this", "--input", "src", "--key-file", &key, "out"])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn test_reference_inputs_tolerate_spaces() {
    let workdir = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("first_helper".to_string()),
            Matcher::Regex("second_helper".to_string()),
        ]))
        .with_status(200)
        .with_body(json!({ "choices": [{ "message": { "content": "[]" } }] }).to_string())
        .create();
    let key = write_key(&workdir);
    fs::write(workdir.path().join("a.py"), "def first_helper(): pass").unwrap();
    fs::write(workdir.path().join("b.py"), "def second_helper(): pass").unwrap();

    codegen_cmd(&workdir, &server.url())
        .args(["--text-prompt", "merge these", "--input", "a.py, b.py", "--key-file", &key, "out"])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn test_key_is_read_from_home_by_default() {
    let workdir = tempdir().unwrap();
    let home = tempdir().unwrap();
    fs::create_dir(home.path().join(".mingdaoai")).unwrap();
    fs::write(home.path().join(".mingdaoai/openai.key"), "sk-test\n").unwrap();
    let mut server = mockito::Server::new();
    let mock = completion_mock(&mut server, SNIPPETS);
    let out = workdir.path().join("out");

    codegen_cmd(&workdir, &server.url())
        .env("HOME", home.path())
        .args(["--text-prompt", "hello"])
        .arg(&out)
        .assert()
        .success();

    mock.assert();
    assert!(out.join("hello.py").is_file());
}

#[test]
fn test_missing_default_key_in_home() {
    let workdir = tempdir().unwrap();
    let home = tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();

    codegen_cmd(&workdir, &server.url())
        .env("HOME", home.path())
        .args(["--text-prompt", "hello", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(".mingdaoai/openai.key"));

    mock.assert();
}
