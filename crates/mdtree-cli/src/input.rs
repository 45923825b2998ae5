//! Source text selection for the binaries

use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;

/// Where the Markdown source comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    Text(String),
    Stdin,
}

/// Pick the input: a file first, then non-empty text, then standard input
/// when it is not a terminal. `None` means there is nothing to read.
pub fn select_input(
    file: Option<PathBuf>,
    text: Option<String>,
    stdin_is_terminal: bool,
) -> Option<Input> {
    if let Some(path) = file {
        return Some(Input::File(path));
    }
    match text {
        Some(text) if !text.is_empty() => Some(Input::Text(text)),
        _ if !stdin_is_terminal => Some(Input::Stdin),
        _ => None,
    }
}

impl Input {
    pub fn read(self) -> Result<String> {
        match self {
            Input::File(path) => std::fs::read_to_string(&path)
                .with_context(|| format!("Error reading file '{}'", path.display())),
            Input::Text(text) => Ok(text),
            Input::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Error reading standard input")?;
                Ok(buf)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_takes_priority() {
        let input = select_input(
            Some(PathBuf::from("doc.md")),
            Some("# Title".to_string()),
            false,
        );
        assert_eq!(input, Some(Input::File(PathBuf::from("doc.md"))));
    }

    #[test]
    fn test_text_before_stdin() {
        let input = select_input(None, Some("# Title".to_string()), false);
        assert_eq!(input, Some(Input::Text("# Title".to_string())));
    }

    #[test]
    fn test_empty_text_falls_through() {
        assert_eq!(
            select_input(None, Some(String::new()), false),
            Some(Input::Stdin)
        );
        assert_eq!(select_input(None, Some(String::new()), true), None);
    }

    #[test]
    fn test_terminal_without_input() {
        assert_eq!(select_input(None, None, true), None);
        assert_eq!(select_input(None, None, false), Some(Input::Stdin));
    }

    #[test]
    fn test_read_text_and_file() {
        assert_eq!(Input::Text("a *b*".into()).read().unwrap(), "a *b*");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "- item\n").unwrap();
        assert_eq!(Input::File(path).read().unwrap(), "- item\n");
    }

    #[test]
    fn test_missing_file_message() {
        let err = Input::File(PathBuf::from("/nonexistent/doc.md"))
            .read()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error reading file '/nonexistent/doc.md'"
        );
    }
}
