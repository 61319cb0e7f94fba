mod docx;
mod pdf;
mod txt;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file type: .{0}")]
    UnsupportedType(String),
    #[error("cannot read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("text is not valid UTF-8: {0}")]
    Decode(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("DOCX extraction failed: {0}")]
    DocxError(String),
}

/// A page of extracted text.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number (for PDFs). For TXT/DOCX, always 1.
    pub page_number: usize,
    /// The extracted text content.
    pub text: String,
}

/// Result of extracting text from a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename.
    pub filename: String,
    /// File type: "pdf", "txt", "docx"
    pub file_type: String,
    /// Extracted pages in document order.
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    /// All page text joined with single spaces.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Total character count across all pages.
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.text.chars().count()).sum()
    }
}

/// Lowercased extension of the last path component, without the dot.
fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Extract text from file bytes based on file type.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let ext = file_extension(filename);
    let file_type = ext.as_str();

    let pages = match file_type {
        "pdf" => pdf::extract_pdf(bytes)?,
        "txt" => txt::extract_txt(bytes)?,
        "docx" => docx::extract_docx(bytes)?,
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    Ok(ExtractedDocument {
        filename: filename.to_string(),
        file_type: file_type.to_string(),
        pages,
    })
}

/// Read `path` and extract its text.
///
/// The extension is checked before the file is opened, so an unsupported
/// type is reported even when the path does not exist.
pub fn extract_file(path: impl AsRef<Path>) -> Result<ExtractedDocument, ExtractionError> {
    let path = path.as_ref();
    let filename = path.to_string_lossy();

    let ext = file_extension(&filename);
    if !matches!(ext.as_str(), "pdf" | "txt" | "docx") {
        return Err(ExtractionError::UnsupportedType(ext));
    }

    let bytes = std::fs::read(path).map_err(|source| ExtractionError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read input document");

    extract_text(&bytes, &filename)
}
