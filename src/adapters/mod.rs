//! Extractors that read a source file into a [`DocumentAst`].

mod docx;
mod epub;
mod pdf;
mod pptx;
mod text;

use crate::core::ast::DocumentAst;
use crate::Result;
use std::path::Path;

pub trait AstExtractor {
    fn extract(&self, path: &Path) -> Result<DocumentAst>;
}

pub use self::docx::DocxExtractor;
pub use self::epub::EpubExtractor;
pub use self::pdf::PdfExtractor;
pub use self::pptx::PptxExtractor;
pub use self::text::TextExtractor;
