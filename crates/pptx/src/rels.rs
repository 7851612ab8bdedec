//! Presentation relationship parsing.
//!
//! `ppt/_rels/presentation.xml.rels` maps relationship ids to slide
//! parts. Both the reader (slide order) and the reconstructor (which
//! relationships to drop) work from this listing.

use deckslim_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Path of the presentation relationships part inside the archive.
pub const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

/// Path of the presentation part inside the archive.
pub const PRESENTATION_PATH: &str = "ppt/presentation.xml";

/// One slide relationship, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideRef {
    /// Relationship id, e.g. "rId2".
    pub r_id: String,

    /// Archive path of the slide part, e.g. "ppt/slides/slide1.xml".
    pub path: String,
}

/// Parse the ordered list of slide relationships from the presentation
/// relationships XML.
///
/// Slide relationships are those whose type contains "/slide",
/// excluding slideLayout and slideMaster. Order comes from the numeric
/// suffix of the relationship id or target.
pub fn slide_refs(rels_xml: &str) -> Result<Vec<SlideRef>> {
    let mut reader = Reader::from_str(rels_xml);
    reader.trim_text(true);

    let mut slides: Vec<(SlideRef, Option<usize>)> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut rel_type = String::new();
                let mut target = String::new();
                let mut id = String::new();

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Type" => {
                            rel_type = String::from_utf8_lossy(&attr.value).to_string();
                        }
                        b"Target" => {
                            target = String::from_utf8_lossy(&attr.value).to_string();
                        }
                        b"Id" => {
                            id = String::from_utf8_lossy(&attr.value).to_string();
                        }
                        _ => {}
                    }
                }

                if rel_type.contains("/slide")
                    && !rel_type.contains("slideLayout")
                    && !rel_type.contains("slideMaster")
                {
                    let order = extract_number(&id).or_else(|| extract_number(&target));
                    let path = if let Some(stripped) = target.strip_prefix('/') {
                        stripped.to_string()
                    } else {
                        format!("ppt/{}", target)
                    };
                    slides.push((SlideRef { r_id: id, path }, order));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!("error parsing relationships: {}", e)));
            }
            _ => {}
        }
    }

    // Sort slides into presentation order
    slides.sort_by(|a, b| match (a.1, b.1) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.path.cmp(&b.0.path),
    });

    Ok(slides.into_iter().map(|(slide, _)| slide).collect())
}

/// Extract a trailing number from a string like "rId2" or "slide3.xml".
pub(crate) fn extract_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
  <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
</Relationships>"#;

    #[test]
    fn test_slide_refs_ordered_and_filtered() {
        let refs = slide_refs(SAMPLE_RELS).unwrap();

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].r_id, "rId2");
        assert_eq!(refs[0].path, "ppt/slides/slide1.xml");
        assert_eq!(refs[1].r_id, "rId3");
        assert_eq!(refs[1].path, "ppt/slides/slide2.xml");
    }

    #[test]
    fn test_slide_refs_absolute_target() {
        let xml = r#"<Relationships><Relationship Id="rId1" Type="http://x/slide" Target="/ppt/slides/slide1.xml"/></Relationships>"#;
        let refs = slide_refs(xml).unwrap();
        assert_eq!(refs[0].path, "ppt/slides/slide1.xml");
    }

    #[test]
    fn test_extract_number() {
        assert_eq!(extract_number("rId1"), Some(1));
        assert_eq!(extract_number("rId12"), Some(12));
        assert_eq!(extract_number("slide1.xml"), Some(1));
        assert_eq!(extract_number("slide123.xml"), Some(123));
        assert_eq!(extract_number("nodigits"), None);
    }
}
