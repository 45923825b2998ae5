//! Span probe experiment
//!
//! Converts Markdown to a document tree, wraps a copy of the tree in empty
//! spans, renders both trees to each target format and compares the pairs.
//! Whether the renderings match is a property of the converter version in
//! use, so the probe reports it rather than asserting it.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use mdtree_ast::{Document, WrapPolicy};
use mdtree_pandoc::{Converter, Format, PandocError};
use thiserror::Error;

use crate::compare::{Comparison, compare};

/// Nested list used when no input is given
pub const SAMPLE_MARKDOWN: &str = "
- First level item
  - Second level item
- Another first level item
";

const ORIGINAL_LABEL: &str = "original";
const MODIFIED_LABEL: &str = "with spans";

/// Errors from running a probe or writing its artifacts
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Pandoc(#[from] PandocError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize document tree: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Options for a probe run
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Reader format for the source text
    pub reader: Format,
    pub policy: WrapPolicy,
    /// Formats both trees are rendered to
    pub targets: Vec<Format>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            reader: Format::Markdown,
            policy: WrapPolicy::default(),
            targets: vec![Format::Markdown, Format::Html],
        }
    }
}

/// Renderings of one target format
#[derive(Debug, Clone)]
pub struct TargetReport {
    pub format: Format,
    pub original: String,
    pub modified: String,
    pub comparison: Comparison,
}

/// Outcome of a probe run
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub policy: WrapPolicy,
    pub original: Document,
    pub modified: Document,
    pub targets: Vec<TargetReport>,
}

/// Run the probe on `markdown` with the given converter
pub fn run_probe<C: Converter>(
    converter: &C,
    markdown: &str,
    options: &ProbeOptions,
) -> Result<ProbeReport> {
    let original = converter.to_tree(markdown, &options.reader)?;
    let modified = original.clone().wrap_spans(options.policy);
    debug!(
        "wrapped {} blocks with policy {} ({} text tokens)",
        original.blocks.len(),
        options.policy,
        original.text_tokens().len()
    );

    let mut targets = Vec::with_capacity(options.targets.len());
    for format in &options.targets {
        let original_out = converter.render(&original, format)?;
        let modified_out = converter.render(&modified, format)?;
        let comparison = compare(&original_out, &modified_out, ORIGINAL_LABEL, MODIFIED_LABEL);

        info!(
            "{format}: {}",
            if comparison.identical {
                "identical"
            } else {
                "different"
            }
        );

        targets.push(TargetReport {
            format: format.clone(),
            original: original_out,
            modified: modified_out,
            comparison,
        });
    }

    Ok(ProbeReport {
        policy: options.policy,
        original,
        modified,
        targets,
    })
}

impl ProbeReport {
    pub fn all_identical(&self) -> bool {
        self.targets.iter().all(|t| t.comparison.identical)
    }

    /// Write trees and renderings into `dir`, creating it if needed
    ///
    /// Produces `original.json` and `with_spans.json` for the trees, plus
    /// `original.<ext>` and `with_spans.<ext>` per target. Targets that
    /// share an extension get the format name added (`original.gfm.md`).
    pub fn write_artifacts(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(|source| ProbeError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::new();
        let mut write = |name: String, content: &str| -> Result<()> {
            let path = dir.join(name);
            fs::write(&path, content).map_err(|source| ProbeError::Write {
                path: path.clone(),
                source,
            })?;
            debug!("wrote {}", path.display());
            written.push(path);
            Ok(())
        };

        write("original.json".to_string(), &self.original.to_json(true)?)?;
        write("with_spans.json".to_string(), &self.modified.to_json(true)?)?;

        for target in &self.targets {
            let suffix = self.artifact_suffix(&target.format);
            write(format!("original.{suffix}"), &target.original)?;
            write(format!("with_spans.{suffix}"), &target.modified)?;
        }

        Ok(written)
    }

    fn artifact_suffix(&self, format: &Format) -> String {
        let ext = format.extension();
        let shared = ext == "json"
            || self
                .targets
                .iter()
                .filter(|t| t.format.extension() == ext)
                .count()
                > 1;
        if shared {
            format!("{}.{ext}", format.name())
        } else {
            ext.to_string()
        }
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wrap policy: {}", self.policy)?;

        for target in &self.targets {
            writeln!(f)?;
            writeln!(f, "== {} ==", target.format)?;
            writeln!(f, "Original output:")?;
            write_block(f, &target.original)?;
            writeln!(f, "Output with spans:")?;
            write_block(f, &target.modified)?;

            let comparison = &target.comparison;
            match &comparison.diff {
                None => writeln!(
                    f,
                    "RESULT: IDENTICAL - empty spans have no effect on {} output",
                    target.format
                )?,
                Some(diff) => {
                    writeln!(
                        f,
                        "RESULT: DIFFERENT - empty spans change {} output (+{} -{} lines)",
                        target.format, comparison.inserted, comparison.deleted
                    )?;
                    write_block(f, diff)?;
                }
            }
        }

        Ok(())
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str(text)?;
    if !text.ends_with('\n') {
        writeln!(f)?;
    }
    Ok(())
}
