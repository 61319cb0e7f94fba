//! Document text extraction for `.txt`, `.pdf` and `.docx` inputs.

pub mod document;

pub use document::{extract_file, extract_text, ExtractedDocument, ExtractionError, PageContent};
