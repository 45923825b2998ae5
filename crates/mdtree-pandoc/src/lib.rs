//! mdtree-pandoc: pandoc invocation adapter
//!
//! This crate provides:
//! - [`Converter`], the conversion seam, with tree parsing and rendering
//!   built on top of plain text conversion
//! - [`Pandoc`], a converter that runs the pandoc executable
//! - [`Format`], pandoc reader/writer format names
//!
//! ## Example
//!
//! ```no_run
//! use mdtree_pandoc::{Converter, Format, Pandoc};
//!
//! let pandoc = Pandoc::locate()?;
//! let doc = pandoc.to_tree("# Hello World", &Format::Markdown)?;
//! let markdown = pandoc.render(&doc, &Format::Markdown)?;
//! assert_eq!(markdown, "# Hello World\n");
//! # Ok::<(), mdtree_pandoc::PandocError>(())
//! ```

pub mod converter;
pub mod error;
pub mod format;
pub mod pandoc;

pub use converter::Converter;
pub use error::{PandocError, Result};
pub use format::{Format, InvalidFormat};
pub use pandoc::{PANDOC_ENV, Pandoc};
