use std::io::{Cursor, Write};

use precis_ingest::{extract_file, extract_text, ExtractionError};
use precis_render::{write_summary_pdf, PageLayout};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const PANGRAM: &str = "The quick brown fox jumps over the lazy dog. ";

#[test]
fn txt_file_is_read_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pangram.txt");
    let text = PANGRAM.repeat(50);
    std::fs::write(&path, &text).unwrap();

    let doc = extract_file(&path).unwrap();
    assert_eq!(doc.file_type, "txt");
    assert_eq!(doc.full_text(), text);
    assert_eq!(doc.total_chars(), 2250);
}

#[test]
fn empty_txt_file_is_empty_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "").unwrap();

    let doc = extract_file(&path).unwrap();
    assert_eq!(doc.full_text(), "");
    assert_eq!(doc.total_chars(), 0);
}

#[test]
fn rendered_pdf_text_can_be_extracted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rendered.pdf");
    write_summary_pdf(PANGRAM.trim(), &path, &PageLayout::default()).unwrap();

    let doc = extract_file(&path).unwrap();
    assert_eq!(doc.file_type, "pdf");
    let text = doc.full_text();
    for word in ["quick", "brown", "fox", "lazy"] {
        assert!(text.contains(word), "missing {word:?} in {text:?}");
    }
}

/// A word too wide to share a line, so every word renders as its own line.
fn line_word(i: usize) -> String {
    format!("{i:02}{}", "W".repeat(26))
}

#[test]
fn pdf_pages_are_extracted_separately_and_joined_with_a_space() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two-pages.pdf");
    let summary: Vec<String> = (0..60).map(line_word).collect();
    let report = write_summary_pdf(&summary.join(" "), &path, &PageLayout::default()).unwrap();
    assert_eq!(report.line_count, 60);
    assert_eq!(report.page_count, 2);

    let doc = extract_file(&path).unwrap();
    assert_eq!(doc.pages.len(), 2);
    assert_eq!(doc.pages[0].page_number, 1);
    assert_eq!(doc.pages[1].page_number, 2);
    assert!(doc.pages[0].text.ends_with(&line_word(58)));
    assert_eq!(doc.pages[1].text, line_word(59));

    let text = doc.full_text();
    assert!(text.contains(&format!("{} {}", line_word(58), line_word(59))), "{text:?}");
    assert!(!text.contains('\x0C'));
}

fn build_docx(body: &str) -> Vec<u8> {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

#[test]
fn docx_file_paragraphs_are_joined() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Report.DOCX");
    let body = "<w:p><w:r><w:t>The quick brown fox.</w:t></w:r></w:p>\
                <w:p><w:r><w:t>Jumps over the lazy dog.</w:t></w:r></w:p>";
    std::fs::write(&path, build_docx(body)).unwrap();

    let doc = extract_file(&path).unwrap();
    assert_eq!(doc.file_type, "docx");
    assert_eq!(doc.full_text(), "The quick brown fox. Jumps over the lazy dog.");
}

#[test]
fn docx_bytes_dispatch_by_name() {
    let bytes = build_docx("<w:p><w:r><w:t>Body text.</w:t></w:r></w:p>");
    let doc = extract_text(&bytes, "notes.docx").unwrap();
    assert_eq!(doc.full_text(), "Body text.");

    let err = extract_text(b"not a zip", "notes.docx").unwrap_err();
    assert!(matches!(err, ExtractionError::DocxError(_)));
}

#[test]
fn corrupt_pdf_is_a_pdf_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"%PDF-1.4 this is not really a pdf").unwrap();

    let err = extract_file(&path).unwrap_err();
    assert!(matches!(err, ExtractionError::PdfError(_)), "{err}");
}

#[test]
fn missing_file_is_a_file_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = extract_file(dir.path().join("nowhere.docx")).unwrap_err();
    assert!(matches!(err, ExtractionError::FileAccess { .. }));
}

#[test]
fn unsupported_extension_is_rejected_before_reading() {
    let err = extract_file("does-not-exist.rtf").unwrap_err();
    assert_eq!(err.to_string(), "unsupported file type: .rtf");
}
