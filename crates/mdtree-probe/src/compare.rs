//! Text comparison with unified diff output

use similar::{ChangeTag, TextDiff};

/// Lines of context around each diff hunk
const CONTEXT_LINES: usize = 3;

/// Result of comparing two renderings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub identical: bool,
    /// Unified line diff, present only when the texts differ
    pub diff: Option<String>,
    pub inserted: usize,
    pub deleted: usize,
}

/// Compare two texts byte for byte, diffing by line when they differ
pub fn compare(original: &str, modified: &str, from_label: &str, to_label: &str) -> Comparison {
    if original == modified {
        return Comparison {
            identical: true,
            diff: None,
            inserted: 0,
            deleted: 0,
        };
    }

    let diff = TextDiff::from_lines(original, modified);

    let mut inserted = 0;
    let mut deleted = 0;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => inserted += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }

    let unified = diff
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(from_label, to_label)
        .to_string();

    Comparison {
        identical: false,
        diff: Some(unified),
        inserted,
        deleted,
    }
}
