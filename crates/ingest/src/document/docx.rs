//! DOCX text extraction.
//!
//! DOCX files are ZIP archives containing XML files in Open XML format.
//! The body lives in `word/document.xml`; only direct `w:body` paragraphs
//! are read. Table cells, content controls, text boxes, headers and footers
//! are skipped.

use std::io::{Cursor, Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::{ExtractionError, PageContent};

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::DocxError(format!("failed to open DOCX archive: {e}")))?;

    let xml = read_part(&mut archive, DOCUMENT_PART)?;
    let paragraphs = parse_paragraphs(&xml)?;
    tracing::debug!(paragraphs = paragraphs.len(), "Parsed DOCX body");

    Ok(vec![PageContent {
        page_number: 1,
        text: paragraphs.join(" "),
    }])
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String, ExtractionError> {
    let mut file = archive
        .by_name(name)
        .map_err(|e| ExtractionError::DocxError(format!("missing {name}: {e}")))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| ExtractionError::DocxError(format!("failed to read {name}: {e}")))?;
    Ok(content)
}

/// Text of each direct `w:body` paragraph, in document order. Paragraphs
/// nested in tables, content controls or text boxes are not body
/// paragraphs. Empty paragraphs are kept as empty strings.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    // Leading/trailing spaces in <w:t xml:space="preserve"> are content.
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    // Element nesting depth; `w:body` children sit at body_depth + 1.
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    // >0 while inside a text box
    let mut skip_depth = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                match e.local_name().as_ref() {
                    b"body" if body_depth.is_none() => body_depth = Some(depth),
                    b"txbxContent" => skip_depth += 1,
                    b"p" if body_depth.map(|d| d + 1) == Some(depth) => {
                        current = Some(String::new());
                    }
                    b"r" => in_run = true,
                    b"t" => in_text = skip_depth == 0 && current.is_some(),
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                if skip_depth > 0 {
                    buf.clear();
                    continue;
                }
                match e.local_name().as_ref() {
                    b"p" if body_depth == Some(depth) => paragraphs.push(String::new()),
                    b"tab" if in_run => {
                        if let Some(p) = current.as_mut() {
                            p.push('\t');
                        }
                    }
                    b"br" | b"cr" if in_run => {
                        if let Some(p) = current.as_mut() {
                            p.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                match e.local_name().as_ref() {
                    b"txbxContent" => skip_depth = skip_depth.saturating_sub(1),
                    b"p" if body_depth.map(|d| d + 1) == Some(depth) => {
                        if let Some(p) = current.take() {
                            paragraphs.push(p);
                        }
                    }
                    b"r" => in_run = false,
                    b"t" => in_text = false,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(e)) if in_text => {
                let text = e.unescape().map_err(|err| {
                    ExtractionError::DocxError(format!("bad text in {DOCUMENT_PART}: {err}"))
                })?;
                if let Some(p) = current.as_mut() {
                    p.push_str(&text);
                }
            }
            Ok(Event::CData(e)) if in_text => {
                if let Some(p) = current.as_mut() {
                    p.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::DocxError(format!(
                    "malformed {DOCUMENT_PART} at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        )
    }

    fn build_docx(body: &str) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("[Content_Types].xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        zip.write_all(document_xml(body).as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn paragraphs_are_joined_with_spaces() {
        let body = "<w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>\
                    <w:p><w:r><w:t>Second paragraph.</w:t></w:r></w:p>";
        let pages = extract_docx(&build_docx(body)).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "First paragraph. Second paragraph.");
    }

    #[test]
    fn runs_concatenate_without_separator() {
        let body = r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Bold</w:t></w:r><w:r><w:t xml:space="preserve"> and plain</w:t></w:r></w:p>"#;
        let paragraphs = parse_paragraphs(&document_xml(body)).unwrap();
        assert_eq!(paragraphs, vec!["Bold and plain"]);
    }

    #[test]
    fn empty_paragraphs_keep_their_slot() {
        let body = "<w:p><w:r><w:t>a</w:t></w:r></w:p><w:p/><w:p></w:p>\
                    <w:p><w:r><w:t>b</w:t></w:r></w:p>";
        let paragraphs = parse_paragraphs(&document_xml(body)).unwrap();
        assert_eq!(paragraphs, vec!["a", "", "", "b"]);
        assert_eq!(paragraphs.join(" "), "a   b");
    }

    #[test]
    fn tables_are_ignored() {
        let body = "<w:p><w:r><w:t>Before</w:t></w:r></w:p>\
                    <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
                    <w:p><w:r><w:t>After</w:t></w:r></w:p>";
        let paragraphs = parse_paragraphs(&document_xml(body)).unwrap();
        assert_eq!(paragraphs, vec!["Before", "After"]);
    }

    #[test]
    fn content_control_paragraphs_are_not_body_paragraphs() {
        let body = "<w:p><w:r><w:t>Intro</w:t></w:r></w:p>\
                    <w:sdt><w:sdtPr/><w:sdtContent>\
                    <w:p><w:r><w:t>Boilerplate</w:t></w:r></w:p><w:p/>\
                    </w:sdtContent></w:sdt>\
                    <w:p><w:r><w:t>Outro</w:t></w:r></w:p>";
        let paragraphs = parse_paragraphs(&document_xml(body)).unwrap();
        assert_eq!(paragraphs, vec!["Intro", "Outro"]);
    }

    #[test]
    fn text_box_text_stays_out_of_its_anchor_paragraph() {
        let body = "<w:p><w:r><w:t>Anchor</w:t></w:r><w:r><w:drawing><wps:txbx><w:txbxContent>\
                    <w:p><w:r><w:t>Boxed</w:t></w:r></w:p>\
                    </w:txbxContent></wps:txbx></w:drawing></w:r></w:p>";
        let paragraphs = parse_paragraphs(&document_xml(body)).unwrap();
        assert_eq!(paragraphs, vec!["Anchor"]);
    }

    #[test]
    fn tabs_and_breaks_inside_runs() {
        let body = "<w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr>\
                    <w:r><w:t>one</w:t><w:tab/><w:t>two</w:t><w:br/><w:t>three</w:t></w:r></w:p>";
        let paragraphs = parse_paragraphs(&document_xml(body)).unwrap();
        assert_eq!(paragraphs, vec!["one\ttwo\nthree"]);
    }

    #[test]
    fn entities_are_unescaped() {
        let body = "<w:p><w:r><w:t>Fish &amp; chips &lt;hot&gt;</w:t></w:r></w:p>";
        let paragraphs = parse_paragraphs(&document_xml(body)).unwrap();
        assert_eq!(paragraphs, vec!["Fish & chips <hot>"]);
    }

    #[test]
    fn not_a_zip_is_an_error() {
        let err = extract_docx(b"plain bytes").unwrap_err();
        assert!(matches!(err, ExtractionError::DocxError(_)));
    }

    #[test]
    fn missing_document_part_is_an_error() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<w:styles/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = extract_docx(&bytes).unwrap_err();
        assert!(err.to_string().contains(DOCUMENT_PART));
    }
}
