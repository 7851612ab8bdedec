//! PPTX slide text extraction.

use deckslim_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

use crate::rels::{self, PRESENTATION_RELS_PATH};

/// Reader supplying raw per-slide text from a PPTX file.
pub struct PptxReader;

impl PptxReader {
    /// Create a new PPTX reader.
    pub fn new() -> Self {
        Self
    }

    /// Extract raw text for every slide, in presentation order.
    ///
    /// Each slide's shape texts are joined with newlines, top-to-bottom
    /// then left-to-right. Slides without any text yield an empty
    /// string.
    pub fn read_unit_texts(&self, path: &Path) -> Result<Vec<String>> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))
            .map_err(|e| Error::Zip(format!("failed to open archive: {}", e)))?;

        let rels_xml = read_file_from_archive(&mut archive, PRESENTATION_RELS_PATH)?;
        let slide_refs = rels::slide_refs(&rels_xml)?;

        let mut texts = Vec::with_capacity(slide_refs.len());
        for slide_ref in &slide_refs {
            let content = read_file_from_archive(&mut archive, &slide_ref.path)?;
            texts.push(slide_text(&content)?);
        }

        Ok(texts)
    }
}

impl Default for PptxReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the visible text of one slide from its XML part.
fn slide_text(xml_content: &str) -> Result<String> {
    let mut shapes = extract_shapes_from_xml(xml_content)?;

    // Reading order: top-to-bottom, then left-to-right
    shapes.sort_by(|a, b| {
        let y_cmp = a
            .y
            .partial_cmp(&b.y)
            .unwrap_or(std::cmp::Ordering::Equal);
        if y_cmp == std::cmp::Ordering::Equal {
            a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
        } else {
            y_cmp
        }
    });

    Ok(shapes
        .into_iter()
        .map(|s| s.text)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Extract shapes with text and position from slide XML.
fn extract_shapes_from_xml(xml_content: &str) -> Result<Vec<ShapeInfo>> {
    let mut shapes = Vec::new();
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(true);

    let mut current_shape: Option<ShapeInfo> = None;
    let mut in_text_body = false;
    let mut in_paragraph = false;
    let mut current_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"sp" | b"pic" => {
                        current_shape = Some(ShapeInfo::default());
                    }
                    b"off" => {
                        read_offset(e, &mut current_shape);
                    }
                    b"txBody" => {
                        in_text_body = true;
                    }
                    b"p" if in_text_body => {
                        in_paragraph = true;
                        if !current_text.is_empty() {
                            current_text.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                if local_name(name.as_ref()) == b"off" {
                    read_offset(e, &mut current_shape);
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_paragraph {
                    let text = e.unescape().unwrap_or_default();
                    current_text.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"sp" | b"pic" => {
                        if let Some(mut shape) = current_shape.take() {
                            shape.text = current_text.trim().to_string();
                            if !shape.text.is_empty() {
                                shapes.push(shape);
                            }
                        }
                        current_text.clear();
                        in_text_body = false;
                        in_paragraph = false;
                    }
                    b"txBody" => {
                        in_text_body = false;
                    }
                    b"p" => {
                        in_paragraph = false;
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("XML parsing error (continuing): {}", e);
            }
            _ => {}
        }
    }

    Ok(shapes)
}

/// Pull x/y attributes from an `off` element into the current shape.
fn read_offset(e: &quick_xml::events::BytesStart, current_shape: &mut Option<ShapeInfo>) {
    if let Some(shape) = current_shape {
        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"x" => {
                    if let Ok(x) = String::from_utf8_lossy(&attr.value).parse::<f64>() {
                        shape.x = x;
                    }
                }
                b"y" => {
                    if let Ok(y) = String::from_utf8_lossy(&attr.value).parse::<f64>() {
                        shape.y = y;
                    }
                }
                _ => {}
            }
        }
    }
}

/// Read a file from the ZIP archive as UTF-8 text.
pub(crate) fn read_file_from_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::Zip(format!("file not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::Zip(format!("failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Text and position of a shape extracted from slide XML.
#[derive(Debug, Default)]
struct ShapeInfo {
    text: String,
    x: f64,
    y: f64,
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
