mod docx;
mod pdf;
mod text;
mod winansi;

use crate::core::ast::DocumentAst;
use crate::Result;
use std::path::Path;

pub(crate) use self::pdf::PdfWriter;
pub use self::docx::DocxRenderer;
pub use self::pdf::{wrap_line, PdfLayout, PdfRenderer};
pub use self::text::TextRenderer;
pub use self::winansi::encode_win_ansi;

pub trait Renderer {
    fn render(&self, document: &DocumentAst, output: &Path) -> Result<()>;
}
