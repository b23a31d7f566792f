use crate::core::ast::DocumentAst;
use crate::render::Renderer;
use crate::{Error, Result};
use rs_docx::document::Paragraph;
use rs_docx::Docx;
use std::path::Path;

/// Writes one DOCX paragraph per block; page breaks are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxRenderer;

impl Renderer for DocxRenderer {
    fn render(&self, document: &DocumentAst, output: &Path) -> Result<()> {
        let mut docx = Docx::default();
        for text in document.paragraphs() {
            docx.document
                .push(Paragraph::default().push_text(text.to_string()));
        }
        docx.write_file(output)
            .map_err(|e| Error::DocxWrite(format!("{:?}", e)))?;
        Ok(())
    }
}
