//! Integration tests for the pandoc adapter
//!
//! Most tests drive the adapter through stand-in converter scripts in
//! `tests/fixtures`, run with `sh`. Tests against a real pandoc are skipped
//! when it is not installed.

#![cfg(unix)]

use std::path::{Path, PathBuf};

use mdtree_ast::Node;
use mdtree_pandoc::{Converter, Format, Pandoc, PandocError};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn stand_in(name: &str) -> Pandoc {
    Pandoc::new("sh").with_args([fixtures_dir().join(name).display().to_string()])
}

fn real_pandoc() -> Option<Pandoc> {
    match Pandoc::locate() {
        Ok(pandoc) if pandoc.version().is_ok() => Some(pandoc),
        _ => {
            eprintln!("pandoc not available, skipping");
            None
        }
    }
}

const EMPTY_DOC: &str = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[]}"#;

#[test]
fn test_arguments_passed_to_converter() {
    let out = stand_in("args-pandoc.sh")
        .convert("text", &Format::Markdown, &Format::Html)
        .unwrap();
    let args: Vec<_> = out.lines().collect();

    assert_eq!(args.len(), 3);
    assert_eq!(args[0], "--from=markdown");
    assert_eq!(args[1], "--to=html");
    assert!(args[2].ends_with(".md"), "input path: {}", args[2]);
}

#[test]
fn test_output_is_captured() {
    let out = stand_in("identity-pandoc.sh")
        .convert("plain *text*\n", &Format::Markdown, &Format::Markdown)
        .unwrap();
    assert_eq!(out, "plain *text*\n");
}

#[test]
fn test_empty_source() {
    let out = stand_in("identity-pandoc.sh")
        .convert("", &Format::Markdown, &Format::Html)
        .unwrap();
    assert_eq!(out, "");
}

#[test]
fn test_tree_output_is_validated() {
    let pandoc = stand_in("identity-pandoc.sh");

    let out = pandoc
        .convert(EMPTY_DOC, &Format::Markdown, &Format::Json)
        .unwrap();
    assert_eq!(out, EMPTY_DOC);

    let err = pandoc
        .convert("# not json", &Format::Markdown, &Format::Json)
        .unwrap_err();
    assert!(matches!(err, PandocError::Format(_)), "{err:?}");
}

#[test]
fn test_to_tree_through_subprocess() {
    let doc = stand_in("identity-pandoc.sh")
        .to_tree(EMPTY_DOC, &Format::Markdown)
        .unwrap();
    assert_eq!(doc.api_version, vec![1, 23, 1]);
    assert!(doc.blocks.is_empty());
}

#[test]
fn test_failure_surfaces_stderr() {
    let err = stand_in("failing-pandoc.sh")
        .convert("text", &Format::Other("bogus".into()), &Format::Json)
        .unwrap_err();

    match err {
        PandocError::ConversionFailure { code, stderr } => {
            assert_eq!(code, Some(21));
            assert_eq!(stderr, "pandoc: Unknown input format bogus");
        }
        other => panic!("expected conversion failure, got {other:?}"),
    }
}

#[test]
fn test_failure_message() {
    let err = stand_in("failing-pandoc.sh")
        .convert("text", &Format::Markdown, &Format::Json)
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"pandoc conversion failed: pandoc: Unknown input format bogus"
    );
}

#[test]
fn test_temp_file_removed_after_success() {
    let path = stand_in("path-pandoc.sh")
        .convert("# Title", &Format::Markdown, &Format::Markdown)
        .unwrap();
    let path = Path::new(&path);

    assert!(path.is_absolute(), "unexpected path {}", path.display());
    assert!(!path.exists(), "{} was left behind", path.display());
}

#[test]
fn test_temp_file_removed_after_failure() {
    let err = stand_in("rejecting-pandoc.sh")
        .convert("# Title", &Format::Markdown, &Format::Html)
        .unwrap_err();

    let PandocError::ConversionFailure { stderr, .. } = err else {
        panic!("expected conversion failure, got {err:?}");
    };
    let path = Path::new(&stderr);
    assert!(path.is_absolute(), "unexpected path {}", path.display());
    assert!(!path.exists(), "{} was left behind", path.display());
}

#[test]
fn test_real_pandoc_heading() {
    let Some(pandoc) = real_pandoc() else {
        return;
    };

    let doc = pandoc.to_tree("# Hello World", &Format::Markdown).unwrap();
    assert_eq!(doc.blocks.len(), 1);
    assert_eq!(doc.blocks[0].kind(), Some("Header"));
    assert_eq!(doc.text_tokens(), vec!["Hello", " ", "World"]);

    let Node::Element(header) = &doc.blocks[0] else {
        panic!("expected header element");
    };
    let Some(Node::Seq(parts)) = header.content.as_deref() else {
        panic!("expected header payload");
    };
    assert_eq!(
        parts[2],
        Node::Seq(vec![Node::str("Hello"), Node::Space, Node::str("World")])
    );

    let markdown = pandoc.render(&doc, &Format::Markdown).unwrap();
    assert_eq!(markdown, "# Hello World\n");
}

#[test]
fn test_real_pandoc_is_deterministic() {
    let Some(pandoc) = real_pandoc() else {
        return;
    };

    let source = "- a\n  - b\n- c\n";
    let first = pandoc
        .convert(source, &Format::Markdown, &Format::Json)
        .unwrap();
    let second = pandoc
        .convert(source, &Format::Markdown, &Format::Json)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_real_pandoc_tree_reserializes_identically() {
    let Some(pandoc) = real_pandoc() else {
        return;
    };

    let source = "Some *emphasis*, `code` and [a link](https://example.com).\n";
    let json = pandoc
        .convert(source, &Format::Markdown, &Format::Json)
        .unwrap();
    let doc = mdtree_ast::Document::from_json(&json).unwrap();
    assert_eq!(doc.to_json(false).unwrap(), json.trim_end());
}
