#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentAst {
    pub blocks: Vec<BlockNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockNode {
    Paragraph(String),
    PageBreak,
}

impl DocumentAst {
    pub fn push_paragraph(&mut self, text: impl Into<String>) {
        self.blocks.push(BlockNode::Paragraph(text.into()));
    }

    pub fn push_page_break(&mut self) {
        self.blocks.push(BlockNode::PageBreak);
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            BlockNode::Paragraph(text) => Some(text.as_str()),
            BlockNode::PageBreak => None,
        })
    }
}
