//! mdtree-ast: Typed pandoc JSON document tree
//!
//! This crate provides:
//! - Document tree types over pandoc's JSON AST, lossless on re-serialization
//! - Span-wrapping transforms for probing how renderers treat empty spans
//!
//! ## Example
//!
//! ```rust
//! use mdtree_ast::{Document, Node, WrapPolicy};
//!
//! let doc = Document::new(vec![1, 23, 1], vec![Node::plain(Node::words("Hello World"))]);
//! let wrapped = doc.clone().wrap_spans(WrapPolicy::InlineRuns);
//!
//! assert_eq!(wrapped.blocks[0], Node::plain(vec![Node::wrapper(Node::words("Hello World"))]));
//! assert_eq!(wrapped.text_tokens(), doc.text_tokens());
//! ```

pub mod transform;
pub mod tree;

pub use transform::{InvalidPolicy, WrapPolicy, is_inline_run};
pub use tree::{Attr, Document, Element, Node, Span};
