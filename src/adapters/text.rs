use super::AstExtractor;
use crate::core::ast::DocumentAst;
use crate::Result;
use std::fs;
use std::path::Path;

/// Reads a UTF-8 text file, one block per line with surrounding whitespace stripped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextExtractor;

impl AstExtractor for TextExtractor {
    fn extract(&self, path: &Path) -> Result<DocumentAst> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_text(&content))
    }
}

impl TextExtractor {
    pub fn from_text(content: &str) -> DocumentAst {
        let mut doc = DocumentAst::default();
        for line in content.lines() {
            doc.push_paragraph(line.trim());
        }
        doc
    }
}
