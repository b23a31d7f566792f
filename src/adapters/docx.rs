use super::AstExtractor;
use crate::core::ast::DocumentAst;
use crate::{Error, Result};
use rs_docx::document::BodyContent;
use rs_docx::DocxFile;
use std::path::Path;

/// Reads the body paragraphs of a DOCX document, one block per paragraph.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl AstExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<DocumentAst> {
        let docx_file =
            DocxFile::from_file(path).map_err(|e| Error::DocxParse(format!("{:?}", e)))?;
        let docx = docx_file
            .parse()
            .map_err(|e| Error::DocxParse(format!("{:?}", e)))?;

        let mut doc = DocumentAst::default();
        for content in &docx.document.body.content {
            self.extract_content(content, &mut doc);
        }
        log::debug!(
            "{}: {} paragraphs",
            path.display(),
            doc.paragraphs().count()
        );
        Ok(doc)
    }
}

impl DocxExtractor {
    fn extract_content(&self, content: &BodyContent<'_>, output: &mut DocumentAst) {
        match content {
            BodyContent::Paragraph(para) => {
                output.push_paragraph(para.text().to_string());
            }
            BodyContent::Sdt(sdt) => {
                if let Some(sdt_content) = &sdt.content {
                    for child in &sdt_content.content {
                        self.extract_content(child, output);
                    }
                }
            }
            // Tables and other body elements carry no top-level paragraphs.
            _ => {}
        }
    }
}
