//! Span-wrapping transforms
//!
//! Inserts empty `Span` wrappers into a document tree without dropping or
//! reordering any original node. Two policies exist and are selected
//! explicitly; they are never combined.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::tree::{Document, Element, Node, Span};

/// Which nodes get wrapped in an empty span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapPolicy {
    /// Wrap every non-empty sequence made only of `Str` and `Space` nodes.
    /// Span content is never wrapped again, so the policy is idempotent.
    #[default]
    InlineRuns,
    /// Wrap the whole content of every `Plain` block, whatever it contains.
    /// Applying it twice nests a second wrapper.
    PlainBlocks,
}

impl WrapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapPolicy::InlineRuns => "inline-runs",
            WrapPolicy::PlainBlocks => "plain-blocks",
        }
    }
}

impl fmt::Display for WrapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown wrap policy: {0} (expected \"inline-runs\" or \"plain-blocks\")")]
pub struct InvalidPolicy(String);

impl FromStr for WrapPolicy {
    type Err = InvalidPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "inline-runs" => Ok(WrapPolicy::InlineRuns),
            "plain-blocks" => Ok(WrapPolicy::PlainBlocks),
            _ => Err(InvalidPolicy(s.to_string())),
        }
    }
}

impl Document {
    /// Apply a wrap policy to the metadata and every block
    pub fn wrap_spans(self, policy: WrapPolicy) -> Self {
        Self {
            api_version: self.api_version,
            meta: self.meta.wrap_spans(policy),
            blocks: self
                .blocks
                .into_iter()
                .map(|block| block.wrap_spans(policy))
                .collect(),
        }
    }
}

impl Node {
    pub fn wrap_spans(self, policy: WrapPolicy) -> Self {
        match policy {
            WrapPolicy::InlineRuns => wrap_inline_runs(self),
            WrapPolicy::PlainBlocks => wrap_plain_blocks(self),
        }
    }
}

/// True for a non-empty sequence of `Str`/`Space` nodes only
pub fn is_inline_run(items: &[Node]) -> bool {
    !items.is_empty() && items.iter().all(Node::is_plain_inline)
}

fn wrap_inline_runs(node: Node) -> Node {
    match node {
        Node::Seq(items) => Node::Seq(wrap_run_sequence(items)),
        Node::Plain(items) => Node::Plain(wrap_run_sequence(items)),
        // The span is already a group: walk its children, not the run itself
        Node::Span(span) => Node::Span(Span {
            attr: span.attr,
            content: span.content.into_iter().map(wrap_inline_runs).collect(),
        }),
        node => map_children(node, wrap_inline_runs),
    }
}

fn wrap_run_sequence(items: Vec<Node>) -> Vec<Node> {
    if is_inline_run(&items) {
        vec![Node::wrapper(items)]
    } else {
        items.into_iter().map(wrap_inline_runs).collect()
    }
}

fn wrap_plain_blocks(node: Node) -> Node {
    match node {
        Node::Plain(items) => Node::Plain(vec![Node::wrapper(items)]),
        Node::Seq(items) => Node::Seq(items.into_iter().map(wrap_plain_blocks).collect()),
        Node::Span(span) => Node::Span(Span {
            attr: span.attr,
            content: span.content.into_iter().map(wrap_plain_blocks).collect(),
        }),
        node => map_children(node, wrap_plain_blocks),
    }
}

/// Rebuild elements and mappings with `f` applied to their values; leaves
/// come back unchanged
fn map_children(node: Node, f: fn(Node) -> Node) -> Node {
    match node {
        Node::Element(element) => Node::Element(Element {
            kind: element.kind,
            content: element.content.map(|content| Box::new(f(*content))),
        }),
        Node::Map(entries) => Node::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key, f(value)))
                .collect(),
        ),
        Node::Seq(items) => Node::Seq(items.into_iter().map(f).collect()),
        Node::Plain(items) => Node::Plain(items.into_iter().map(f).collect()),
        Node::Span(span) => Node::Span(Span {
            attr: span.attr,
            content: span.content.into_iter().map(f).collect(),
        }),
        leaf @ (Node::Str(_) | Node::Space | Node::Leaf(_) | Node::Opaque(_)) => leaf,
    }
}
