//! The converter seam

use mdtree_ast::Document;

use crate::error::{PandocError, Result};
use crate::format::Format;

/// Something that converts text between document formats
///
/// Only [`Converter::convert`] is required. Tree parsing and rendering go
/// through the JSON tree format.
pub trait Converter {
    /// Convert `source` from one format to another
    fn convert(&self, source: &str, from: &Format, to: &Format) -> Result<String>;

    /// Convert `source` to a document tree
    fn to_tree(&self, source: &str, from: &Format) -> Result<Document> {
        let json = self.convert(source, from, &Format::Json)?;
        Document::from_json(&json).map_err(PandocError::Format)
    }

    /// Render a document tree to `to`
    fn render(&self, document: &Document, to: &Format) -> Result<String> {
        let json = document.to_json(false).map_err(PandocError::Format)?;
        self.convert(&json, &Format::Json, to)
    }
}

impl<C: Converter + ?Sized> Converter for &C {
    fn convert(&self, source: &str, from: &Format, to: &Format) -> Result<String> {
        (**self).convert(source, from, to)
    }
}
