//! Slimmed PPTX reconstruction.
//!
//! Dropping a slide means removing its `<p:sldId>` entry from
//! `ppt/presentation.xml` and its `<Relationship>` entry from
//! `ppt/_rels/presentation.xml.rels`. Every other archive entry is
//! copied verbatim, so kept slides preserve their formatting, media,
//! and styling byte for byte.

use deckslim_core::{Error, RedundancyDecision, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::reader::read_file_from_archive;
use crate::rels::{self, PRESENTATION_PATH, PRESENTATION_RELS_PATH};

/// Reconstructor producing a slimmed copy of a PPTX archive.
pub struct PptxReconstructor;

impl PptxReconstructor {
    /// Create a new PPTX reconstructor.
    pub fn new() -> Self {
        Self
    }

    /// Write a slimmed copy of `input` to `output`.
    ///
    /// The output is written to a temp file beside the destination and
    /// renamed into place, or not at all.
    pub fn write_slimmed(
        &self,
        input: &Path,
        output: &Path,
        decision: &RedundancyDecision,
    ) -> Result<()> {
        let file = File::open(input)?;
        let mut archive = ZipArchive::new(BufReader::new(file))
            .map_err(|e| Error::Zip(format!("failed to open archive: {}", e)))?;

        let rels_xml = read_file_from_archive(&mut archive, PRESENTATION_RELS_PATH)?;
        let slide_refs = rels::slide_refs(&rels_xml)?;

        let dropped_ids: HashSet<String> = decision
            .iter()
            .filter_map(|index| slide_refs.get(index).map(|s| s.r_id.clone()))
            .collect();

        let presentation_xml = read_file_from_archive(&mut archive, PRESENTATION_PATH)?;
        let new_presentation = strip_slide_ids(&presentation_xml, &dropped_ids)?;
        let new_rels = strip_relationships(&rels_xml, &dropped_ids)?;

        let dir = output.parent().unwrap_or_else(|| Path::new("."));
        let tmp = NamedTempFile::new_in(dir)?;
        let mut writer = ZipWriter::new(tmp.as_file().try_clone()?);
        let options: FileOptions =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for i in 0..archive.len() {
            let name = {
                let entry = archive
                    .by_index_raw(i)
                    .map_err(|e| Error::Zip(format!("failed to read entry {}: {}", i, e)))?;
                entry.name().to_string()
            };

            let replacement = match name.as_str() {
                PRESENTATION_PATH => Some(new_presentation.as_str()),
                PRESENTATION_RELS_PATH => Some(new_rels.as_str()),
                _ => None,
            };

            match replacement {
                Some(content) => {
                    writer
                        .start_file(&name, options)
                        .map_err(|e| Error::Reconstruct(format!("failed to add '{}': {}", name, e)))?;
                    writer.write_all(content.as_bytes())?;
                }
                None => {
                    let entry = archive
                        .by_index_raw(i)
                        .map_err(|e| Error::Zip(format!("failed to read entry {}: {}", i, e)))?;
                    writer
                        .raw_copy_file(entry)
                        .map_err(|e| Error::Reconstruct(format!("failed to copy '{}': {}", name, e)))?;
                }
            }
        }

        writer
            .finish()
            .map_err(|e| Error::Reconstruct(format!("failed to finalize archive: {}", e)))?;
        tmp.persist(output).map_err(|e| Error::Io(e.error))?;

        log::debug!(
            "wrote {} ({} of {} slides kept)",
            output.display(),
            slide_refs.len() - dropped_ids.len(),
            slide_refs.len()
        );
        Ok(())
    }
}

impl Default for PptxReconstructor {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite presentation XML, removing `sldId` elements whose
/// relationship id is in `dropped_ids`.
fn strip_slide_ids(xml: &str, dropped_ids: &HashSet<String>) -> Result<String> {
    strip_elements(xml, |e| {
        is_local(e.name().as_ref(), b"sldId") && has_rel_id_in(e, dropped_ids)
    })
}

/// Rewrite relationships XML, removing `Relationship` elements whose
/// `Id` is in `dropped_ids`.
fn strip_relationships(xml: &str, dropped_ids: &HashSet<String>) -> Result<String> {
    strip_elements(xml, |e| {
        e.name().as_ref() == b"Relationship"
            && e.attributes().flatten().any(|attr| {
                attr.key.as_ref() == b"Id"
                    && dropped_ids.contains(String::from_utf8_lossy(&attr.value).as_ref())
            })
    })
}

/// Stream an XML document through unchanged except for elements
/// matching `dropped`, which are skipped along with their subtrees.
fn strip_elements<F>(xml: &str, dropped: F) -> Result<String>
where
    F: Fn(&BytesStart) -> bool,
{
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut skip_depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::Xml(format!("error rewriting XML: {}", e)))?;

        match &event {
            Event::Eof => break,
            Event::Empty(e) if skip_depth == 0 && dropped(e) => continue,
            Event::Start(e) if skip_depth == 0 && dropped(e) => {
                skip_depth = 1;
                continue;
            }
            Event::Start(_) if skip_depth > 0 => {
                skip_depth += 1;
                continue;
            }
            Event::End(_) if skip_depth > 0 => {
                skip_depth -= 1;
                continue;
            }
            _ if skip_depth > 0 => continue,
            _ => {}
        }

        writer
            .write_event(event)
            .map_err(|e| Error::Xml(format!("error writing XML: {}", e)))?;
    }

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| Error::Xml(format!("rewritten XML is not UTF-8: {}", e)))
}

/// Whether an element's local name (namespace prefix stripped) matches.
fn is_local(name: &[u8], local: &[u8]) -> bool {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..] == local,
        None => name == local,
    }
}

/// Whether the element carries a namespaced relationship-id attribute
/// (e.g. `r:id`) whose value is in `ids`.
fn has_rel_id_in(e: &BytesStart, ids: &HashSet<String>) -> bool {
    e.attributes().flatten().any(|attr| {
        attr.key.as_ref().ends_with(b":id")
            && ids.contains(String::from_utf8_lossy(&attr.value).as_ref())
    })
}
