use super::AstExtractor;
use crate::core::ast::DocumentAst;
use crate::Result;
use lopdf::Document;
use std::path::Path;

/// Extracts page text from a PDF; each non-blank line becomes a paragraph.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl AstExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<DocumentAst> {
        let document = Document::load(path)?;
        let mut doc = DocumentAst::default();

        for (page_number, _) in document.get_pages() {
            let text = match document.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("no text extracted from page {}: {}", page_number, e);
                    continue;
                }
            };
            let before = doc.blocks.len();
            for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
                doc.push_paragraph(line);
            }
            log::debug!(
                "page {}: {} lines",
                page_number,
                doc.blocks.len() - before
            );
        }

        Ok(doc)
    }
}
