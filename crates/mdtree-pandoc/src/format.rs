//! Pandoc format names

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A pandoc reader or writer format
///
/// Names pandoc knows but this crate has no special handling for, including
/// extension suffixes such as `markdown+smart`, are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Format {
    Markdown,
    CommonMark,
    CommonMarkX,
    Gfm,
    Html,
    /// The JSON document tree
    Json,
    Plain,
    Other(String),
}

impl Format {
    pub fn name(&self) -> &str {
        match self {
            Format::Markdown => "markdown",
            Format::CommonMark => "commonmark",
            Format::CommonMarkX => "commonmark_x",
            Format::Gfm => "gfm",
            Format::Html => "html",
            Format::Json => "json",
            Format::Plain => "plain",
            Format::Other(name) => name.as_str(),
        }
    }

    /// File extension for files holding this format
    pub fn extension(&self) -> &str {
        match self {
            Format::Markdown | Format::CommonMark | Format::CommonMarkX | Format::Gfm => "md",
            Format::Html => "html",
            Format::Json => "json",
            Format::Plain => "txt",
            Format::Other(name) => base_name(name),
        }
    }

    /// Whether output in this format is the JSON document tree
    pub fn is_tree(&self) -> bool {
        matches!(self, Format::Json)
    }
}

/// Format name without `+ext`/`-ext` modifiers
fn base_name(name: &str) -> &str {
    name.find(['+', '-'])
        .filter(|&at| at > 0)
        .map_or(name, |at| &name[..at])
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid pandoc format name: {0:?}")]
pub struct InvalidFormat(String);

impl FromStr for Format {
    type Err = InvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric())
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'));
        if !valid {
            return Err(InvalidFormat(s.to_string()));
        }

        Ok(match s {
            "markdown" => Format::Markdown,
            "commonmark" => Format::CommonMark,
            "commonmark_x" => Format::CommonMarkX,
            "gfm" => Format::Gfm,
            "html" => Format::Html,
            "json" => Format::Json,
            "plain" => Format::Plain,
            other => Format::Other(other.to_string()),
        })
    }
}
