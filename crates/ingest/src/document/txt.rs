use super::{ExtractionError, PageContent};

/// Plain text is taken verbatim; anything that is not UTF-8 is an error.
pub fn extract_txt(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ExtractionError::Decode(e.to_string()))?
        .to_string();

    Ok(vec![PageContent {
        page_number: 1,
        text,
    }])
}
