use super::AstExtractor;
use crate::core::ast::DocumentAst;
use crate::{Error, Result};
use epub::doc::EpubDoc;
use regex::Regex;
use std::path::Path;

/// Wide enough that html2text never hard-wraps; the PDF renderer reflows.
const TEXT_WIDTH: usize = 10_000;

/// Reads the spine documents of an EPUB in reading order, one block per document.
#[derive(Debug, Default, Clone, Copy)]
pub struct EpubExtractor;

impl AstExtractor for EpubExtractor {
    fn extract(&self, path: &Path) -> Result<DocumentAst> {
        let mut book = EpubDoc::new(path)
            .map_err(|e| Error::Ebook(format!("Failed to open EPUB: {e}")))?;

        let blank_runs = Regex::new(r"\n{3,}").expect("valid blank line regex");
        let mut doc = DocumentAst::default();
        let mut spine_index = 0usize;

        loop {
            let Some((content, _mime)) = book.get_current_str() else {
                break;
            };
            let text = html2text::from_read(content.as_bytes(), TEXT_WIDTH);
            let text = blank_runs.replace_all(text.trim(), "\n\n");
            if text.is_empty() {
                log::debug!("spine item {} has no text", spine_index);
            } else {
                doc.push_paragraph(text.into_owned());
            }

            if !book.go_next() {
                break;
            }
            spine_index += 1;
        }

        Ok(doc)
    }
}
