mod common;

use common::*;
use sqldoc::Extractor;

#[test]
fn tutorial_blocks_and_lines() {
    let markdown = read_fixture("tutorial.md");
    let blocks = extract(&markdown);

    assert_eq!(blocks.len(), 9);
    assert!(blocks.iter().all(|b| b.closed));
    assert_eq!(blocks[0].fence_line, 14);
    assert_eq!(blocks[0].content, "SELECT * FROM customers;\n");
    assert_eq!(blocks[2].language, "sql");

    let ignored = blocks.iter().find(|b| b.has_attribute("ignore")).unwrap();
    assert_eq!(ignored.index, 6);

    // The python block is counted but not yielded
    assert_eq!(blocks.last().unwrap().index, 8);
}

#[test]
fn extraction_is_lazy() {
    let markdown = "```sql\nSELECT 1;\n```\n\n```sql\nSELECT 2;\n```\n";
    let mut extractor = Extractor::new(markdown, &["sql".to_string()]);
    let first = extractor.next().unwrap();
    assert_eq!(first.content, "SELECT 1;\n");
    let second = extractor.next().unwrap();
    assert_eq!(second.fence_line, 5);
    assert!(extractor.next().is_none());
}

#[test]
fn tilde_fence_holds_backtick_fence() {
    let markdown = "~~~sql\n```\nSELECT 1;\n```\n~~~\n";
    let blocks = extract(markdown);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].content, "```\nSELECT 1;\n```\n");
}

#[test]
fn longer_fence_holds_shorter_fence() {
    let markdown = "````markdown\n```sql\nSELECT 1;\n```\n````\n\n```sql\nSELECT 2;\n```\n";
    let blocks = extract(markdown);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].index, 1);
    assert_eq!(blocks[0].content, "SELECT 2;\n");
}

#[test]
fn unclosed_block_runs_to_end() {
    let markdown = read_fixture("broken.md");
    let blocks = extract(&markdown);
    let last = blocks.last().unwrap();
    assert!(!last.closed);
    assert_eq!(last.fence_line, 15);
    assert_eq!(last.content, "SELECT 1;\n");
}

#[test]
fn language_selection_is_configurable() {
    let markdown = "```postgres\nSELECT 1;\n```\n\n```mysql\nSELECT 2;\n```\n";
    let blocks: Vec<_> = Extractor::new(markdown, &["MySQL".to_string()]).collect();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].language, "mysql");
    assert_eq!(extract(markdown).len(), 2);
}
