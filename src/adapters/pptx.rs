//! PPTX text extraction.
//!
//! A PPTX file is a ZIP archive; slide order comes from `ppt/presentation.xml`
//! (`p:sldIdLst`) resolved through `ppt/_rels/presentation.xml.rels`. When
//! those parts are missing, slides are taken in numeric file name order.

use super::AstExtractor;
use crate::core::ast::DocumentAst;
use crate::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Extracts slide text; every slide starts a new page, every text shape is one block.
#[derive(Debug, Default, Clone, Copy)]
pub struct PptxExtractor;

impl AstExtractor for PptxExtractor {
    fn extract(&self, path: &Path) -> Result<DocumentAst> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;
        let slides = slide_order(&mut archive)?;

        let mut doc = DocumentAst::default();
        for (index, slide) in slides.iter().enumerate() {
            if index > 0 {
                doc.push_page_break();
            }
            let xml = read_entry(&mut archive, slide)?;
            let shapes = shape_texts(&xml)?;
            log::debug!("{}: {} text shapes", slide, shapes.len());
            for text in shapes {
                doc.push_paragraph(text);
            }
        }

        Ok(doc)
    }
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut entry = archive.by_name(name)?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

fn slide_order<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    if let Some(ordered) = presentation_order(archive)? {
        return Ok(ordered);
    }

    let pattern = Regex::new(r"^ppt/slides/slide(\d+)\.xml$").expect("valid slide regex");
    let mut numbered: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = pattern.captures(name)?.get(1)?.as_str().parse().ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    numbered.sort();
    Ok(numbered.into_iter().map(|(_, name)| name).collect())
}

fn presentation_order<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Option<Vec<String>>> {
    if !has_entry(archive, "ppt/presentation.xml")
        || !has_entry(archive, "ppt/_rels/presentation.xml.rels")
    {
        return Ok(None);
    }

    let rels_xml = read_entry(archive, "ppt/_rels/presentation.xml.rels")?;
    let mut targets = HashMap::new();
    let mut reader = Reader::from_str(&rels_xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attr(&e, b"Id"), attr(&e, b"Target")) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let presentation_xml = read_entry(archive, "ppt/presentation.xml")?;
    let mut ordered = Vec::new();
    let mut reader = Reader::from_str(&presentation_xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldId" => {
                let Some(target) = relationship_id(&e).and_then(|id| targets.get(&id)) else {
                    continue;
                };
                let name = match target.strip_prefix('/') {
                    Some(absolute) => absolute.to_string(),
                    None => format!("ppt/{}", target),
                };
                if has_entry(archive, &name) {
                    ordered.push(name);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if ordered.is_empty() {
        return Ok(None);
    }
    Ok(Some(ordered))
}

fn has_entry<R: Read + Seek>(archive: &ZipArchive<R>, name: &str) -> bool {
    archive.file_names().any(|n| n == name)
}

fn attr(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// The namespaced `id` of a `sldId`, whatever prefix the relationships
/// namespace is bound to. The unprefixed `id` is the slide number, not a
/// relationship.
fn relationship_id(element: &BytesStart<'_>) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.prefix().is_some() && a.key.local_name().as_ref() == b"id")
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// Text of every shape that has a text body, its paragraphs joined by newlines.
fn shape_texts(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut shapes = Vec::new();
    let mut current: Option<String> = None;
    let mut paragraphs_in_shape = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"sp" => {
                    current = None;
                    paragraphs_in_shape = 0;
                }
                b"txBody" => current = Some(String::new()),
                b"p" => {
                    if let Some(text) = current.as_mut() {
                        if paragraphs_in_shape > 0 {
                            text.push('\n');
                        }
                        paragraphs_in_shape += 1;
                    }
                }
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => {
                    if let Some(text) = current.as_mut() {
                        if paragraphs_in_shape > 0 {
                            text.push('\n');
                        }
                        paragraphs_in_shape += 1;
                    }
                }
                b"br" => {
                    if let Some(text) = current.as_mut() {
                        text.push('\n');
                    }
                }
                _ => {}
            },
            Event::Text(e) if in_text => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"sp" => {
                    if let Some(text) = current.take() {
                        shapes.push(text);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(shapes)
}
