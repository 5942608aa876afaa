mod common;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn sqldoc(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqldoc"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("SQLDOC_CONFIG")
        .env_remove("SQLDOC_DIALECT")
        .output()
        .expect("failed to run sqldoc")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn check_passing_document() {
    let dir = TempDir::new().unwrap();
    let tutorial = common::fixture("tutorial.md");
    let output = sqldoc(dir.path(), &["check", tutorial.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stdout(&output));
    assert!(stdout(&output).ends_with(
        "1 document, 9 examples: 8 passed, 0 failed, 1 skipped; 0 lint errors, 0 warnings\n"
    ));
}

#[test]
fn check_failing_document() {
    let dir = TempDir::new().unwrap();
    let broken = common::fixture("broken.md");
    let output = sqldoc(dir.path(), &["check", broken.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("FAIL  "), "{text}");
    assert!(text.contains("[broken-anchor]"), "{text}");
}

#[test]
fn strict_fails_on_warnings() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("doc.md");
    fs::write(&doc, "# A\n\n### C\n\n```sql\nSELECT 1;\n```\n").unwrap();

    let lenient = sqldoc(dir.path(), &["check", "doc.md"]);
    assert!(lenient.status.success());
    let strict = sqldoc(dir.path(), &["check", "--strict", "doc.md"]);
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn check_json_output() {
    let dir = TempDir::new().unwrap();
    let broken = common::fixture("broken.md");
    let output = sqldoc(
        dir.path(),
        &["check", "--format", "json", broken.to_str().unwrap()],
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["documents"][0]["examples"][0]["status"], "failed");
}

#[test]
fn config_file_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("doc.md"), "# A\n\n```sql\nSELECT `id` FROM t;\n```\n").unwrap();

    let generic = sqldoc(dir.path(), &["check", "doc.md"]);
    assert_eq!(generic.status.code(), Some(1));

    fs::write(dir.path().join("sqldoc.toml"), "dialect = \"mysql\"\n").unwrap();
    let mysql = sqldoc(dir.path(), &["check", "doc.md"]);
    assert!(mysql.status.success(), "{}", stdout(&mysql));

    let flag = sqldoc(dir.path(), &["check", "--dialect", "generic", "doc.md"]);
    assert_eq!(flag.status.code(), Some(1));
}

#[test]
fn unknown_dialect_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("doc.md"), "# A\n").unwrap();
    let output = sqldoc(dir.path(), &["check", "--dialect", "oracle", "doc.md"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown dialect 'oracle'"), "{stderr}");
}

#[test]
fn extract_lists_blocks() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("doc.md"),
        "# A\n\n```sql\nSELECT 1;\n```\n\n```rust\nfn main() {}\n```\n",
    )
    .unwrap();
    let output = sqldoc(dir.path(), &["extract", "doc.md"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "-- doc.md:3 [sql]\nSELECT 1;\n");

    let json = sqldoc(dir.path(), &["extract", "--format", "json", "--lang", "rust", "doc.md"]);
    let value: serde_json::Value = serde_json::from_slice(&json.stdout).unwrap();
    assert_eq!(value["blocks"][0]["language"], "rust");
    assert_eq!(value["blocks"][0]["fence_line"], 7);
}

#[test]
fn render_prints_canonical_sql() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("doc.md"),
        "# A\n\n```sql\nselect name from users u where u.id=1;\ndelete from users where id<>1\n```\n\n```sql ignore\nnot sql\n```\n",
    )
    .unwrap();
    let output = sqldoc(dir.path(), &["render", "doc.md"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "-- doc.md:3\nSELECT name FROM users AS u WHERE u.id = 1;\nDELETE FROM users WHERE id <> 1;\n"
    );
}
