use super::{ExtractionError, PageContent};

pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    Ok(collect_pages(pages))
}

/// One entry per PDF page, numbered from 1. Blank pages are dropped;
/// numbering keeps the original page.
fn collect_pages(pages: Vec<String>) -> Vec<PageContent> {
    let pages: Vec<PageContent> = pages
        .into_iter()
        .enumerate()
        .filter(|(_, page_text)| !page_text.trim().is_empty())
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            text: page_text.trim().to_string(),
        })
        .collect();

    if pages.is_empty() {
        // No text layer at all: scanned or image-only PDF. There is no OCR.
        tracing::warn!(
            "PDF has no extractable text (scanned or image-only); summary will be empty"
        );
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn one_entry_per_page() {
        let pages = collect_pages(pages(&["Page one text.\n", "\nPage two text."]));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].text, "Page one text.");
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].text, "Page two text.");
    }

    #[test]
    fn blank_pages_are_dropped_but_numbering_kept() {
        let pages = collect_pages(pages(&["intro", "   \n", "closing"]));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].page_number, 3);
        assert_eq!(pages[1].text, "closing");
    }

    #[test]
    fn page_text_is_trimmed() {
        let pages = collect_pages(pages(&["\n\n  Single page body \n"]));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "Single page body");
    }

    #[test]
    fn empty_text_layer_yields_no_pages() {
        assert!(collect_pages(pages(&["  \n ", ""])).is_empty());
        assert!(collect_pages(Vec::new()).is_empty());
    }

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let err = extract_pdf(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::PdfError(_)));
    }
}
