#![allow(dead_code)]

use std::path::PathBuf;

use sqldoc::{
    CodeBlock, Config, DocumentReport, ExampleResult, ExampleStatus, Extractor, SnippetError,
    Validator,
};

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    let path = fixture(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

pub fn extract(markdown: &str) -> Vec<CodeBlock> {
    Extractor::new(markdown, &Config::default().languages).collect()
}

pub fn validator() -> Validator {
    Validator::new(&Config::default()).expect("default config is valid")
}

pub fn check(markdown: &str) -> DocumentReport {
    validator().check_str("test.md", markdown)
}

pub fn check_fixture(name: &str) -> DocumentReport {
    validator()
        .check_file(&fixture(name))
        .unwrap_or_else(|e| panic!("Failed to check {name}: {e}"))
}

pub fn errors(result: &ExampleResult) -> &[SnippetError] {
    match &result.status {
        ExampleStatus::Failed { errors } => errors,
        other => panic!("Expected a failed example, got {other:?}"),
    }
}

pub fn statements(result: &ExampleResult) -> usize {
    match &result.status {
        ExampleStatus::Passed { statements } => *statements,
        other => panic!("Expected a passed example, got {other:?}"),
    }
}
