//! PDF output: text reflow onto A4 pages and full-page image embedding.

use super::winansi::{encode_win_ansi, text_width};
use super::Renderer;
use crate::core::ast::{BlockNode, DocumentAst};
use crate::Result;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::path::Path;

const MM: f32 = 72.0 / 25.4;

/// Page geometry and font settings, all in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub page_width: f32,
    pub page_height: f32,
    /// Left, right and top margin.
    pub margin: f32,
    /// Distance from the bottom edge at which a new page is started.
    pub bottom_margin: f32,
    pub font_size: f32,
    pub line_height: f32,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            page_width: 210.0 * MM,
            page_height: 297.0 * MM,
            margin: 10.0 * MM,
            bottom_margin: 15.0 * MM,
            font_size: 12.0,
            line_height: 10.0 * MM,
        }
    }
}

impl PdfLayout {
    fn text_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    fn lines_per_page(&self) -> usize {
        let usable = self.page_height - self.margin - self.bottom_margin;
        ((usable / self.line_height).floor() as usize).max(1)
    }

    /// Splits the document into pages of already wrapped lines. Always yields
    /// at least one page.
    pub fn paginate(&self, document: &DocumentAst) -> Vec<Vec<String>> {
        let per_page = self.lines_per_page();
        let mut pages = vec![Vec::new()];

        for block in &document.blocks {
            match block {
                BlockNode::PageBreak => pages.push(Vec::new()),
                BlockNode::Paragraph(text) => {
                    for line in text.split('\n') {
                        for wrapped in wrap_line(line, self.text_width(), self.font_size) {
                            if pages.last().map_or(0, Vec::len) >= per_page {
                                pages.push(Vec::new());
                            }
                            if let Some(page) = pages.last_mut() {
                                page.push(wrapped);
                            }
                        }
                    }
                }
            }
        }

        pages
    }
}

/// Greedy word wrap. Words wider than a full line are split by character.
/// A blank line yields a single empty line.
pub fn wrap_line(line: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if text_width(&candidate, font_size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if text_width(word, font_size) <= max_width {
            current = word.to_string();
            continue;
        }
        for ch in word.chars() {
            current.push(ch);
            if text_width(&current, font_size) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Assembles a PDF page by page with lopdf.
pub(crate) struct PdfWriter {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    font_id: Option<ObjectId>,
}

impl PdfWriter {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
            font_id: None,
        }
    }

    fn font(&mut self) -> ObjectId {
        if let Some(id) = self.font_id {
            return id;
        }
        let id = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        self.font_id = Some(id);
        id
    }

    fn add_page(
        &mut self,
        width: f32,
        height: f32,
        resources: lopdf::Dictionary,
        operations: Vec<Operation>,
    ) -> Result<()> {
        let content = Content { operations };
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Resources" => resources,
            "Contents" => content_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    pub fn add_text_page(&mut self, layout: &PdfLayout, lines: &[String]) -> Result<()> {
        let font_id = self.font();
        let mut operations = Vec::new();
        let mut top = layout.page_height - layout.margin;

        for line in lines {
            let baseline = top - layout.line_height / 2.0 - 0.3 * layout.font_size;
            top -= layout.line_height;
            if line.is_empty() {
                continue;
            }
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec!["F1".into(), layout.font_size.into()],
            ));
            operations.push(Operation::new(
                "Td",
                vec![layout.margin.into(), baseline.into()],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(line), StringFormat::Literal)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        };
        self.add_page(layout.page_width, layout.page_height, resources, operations)
    }

    /// Adds a page exactly the size of the image (one pixel per point).
    pub fn add_image_page(&mut self, image: &RgbImage) -> Result<()> {
        let (width, height) = image.dimensions();
        let image_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            image.as_raw().clone(),
        ));

        let (w, h) = (width as f32, height as f32);
        let operations = vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![w.into(), 0.into(), 0.into(), h.into(), 0.into(), 0.into()],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ];
        let resources = dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        };
        self.add_page(w, h, resources, operations)
    }

    pub fn save(mut self, path: &Path) -> Result<()> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| (*id).into()).collect();
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();
        self.doc.save(path)?;
        Ok(())
    }
}

/// Renders paragraphs as reflowed Helvetica text.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    layout: PdfLayout,
}

impl PdfRenderer {
    pub fn new(layout: PdfLayout) -> Self {
        Self { layout }
    }
}

impl Renderer for PdfRenderer {
    fn render(&self, document: &DocumentAst, output: &Path) -> Result<()> {
        let pages = self.layout.paginate(document);
        log::debug!("laying out {} PDF pages", pages.len());

        let mut writer = PdfWriter::new();
        for lines in &pages {
            writer.add_text_page(&self.layout, lines)?;
        }
        writer.save(output)
    }
}
