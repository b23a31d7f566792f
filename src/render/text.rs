use crate::core::ast::{BlockNode, DocumentAst};
use crate::render::Renderer;
use crate::Result;
use std::fs;
use std::path::Path;

/// Writes each paragraph followed by a newline, as UTF-8.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn render_to_string(&self, document: &DocumentAst) -> String {
        let mut out = String::new();
        for block in &document.blocks {
            if let BlockNode::Paragraph(text) = block {
                out.push_str(text);
                out.push('\n');
            }
        }
        out
    }
}

impl Renderer for TextRenderer {
    fn render(&self, document: &DocumentAst, output: &Path) -> Result<()> {
        fs::write(output, self.render_to_string(document))?;
        Ok(())
    }
}
