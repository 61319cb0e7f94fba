//! PDF writer for laid-out summaries.
//!
//! Uses the standard Type1 Helvetica (not embedded) with WinAnsiEncoding.
//! No timestamps or IDs are written, so the same summary always produces the
//! same bytes.

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;
use tracing::{debug, info};

use crate::helvetica;
use crate::layout::{layout_summary, Page, PageLayout};

const FONT_RESOURCE: &str = "F1";
const PRODUCER: &str = "precis";
const TITLE: &str = "Summary";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot write {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PDF error: {0}")]
    Pdf(String),
}

/// An in-memory PDF plus what went into it.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub line_count: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    pub line_count: usize,
    pub page_count: usize,
    pub bytes_written: usize,
}

/// Lay out `summary` and serialize it to PDF bytes.
pub fn render_pdf(summary: &str, layout: &PageLayout) -> Result<RenderedPdf, RenderError> {
    let pages = layout_summary(summary, layout);
    let line_count = pages.iter().map(|p| p.lines.len()).sum();
    let page_count = pages.len();

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => helvetica::FONT_NAME,
        "Encoding" => helvetica::ENCODING,
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(page_count);
    for page in &pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, page_content(page, layout)?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count as i64,
        "Resources" => resources_id,
        "MediaBox" => media_box(layout),
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = info_dictionary(&mut doc);
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Pdf(format!("failed to serialize document: {e}")))?;

    debug!(pages = page_count, lines = line_count, bytes = bytes.len(), "Rendered PDF");

    Ok(RenderedPdf {
        bytes,
        line_count,
        page_count,
    })
}

/// Render `summary` and write it to `path`, replacing any existing file.
pub fn write_summary_pdf(
    summary: &str,
    path: &Path,
    layout: &PageLayout,
) -> Result<RenderReport, RenderError> {
    let rendered = render_pdf(summary, layout)?;
    std::fs::write(path, &rendered.bytes).map_err(|source| RenderError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        pages = rendered.page_count,
        lines = rendered.line_count,
        "Summary PDF written"
    );

    Ok(RenderReport {
        line_count: rendered.line_count,
        page_count: rendered.page_count,
        bytes_written: rendered.bytes.len(),
    })
}

fn page_content(page: &Page, layout: &PageLayout) -> Result<Vec<u8>, RenderError> {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), Object::Real(layout.font_size as f32)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Real(line.x as f32), Object::Real(line.y as f32)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(helvetica::encode(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    Content { operations }
        .encode()
        .map_err(|e| RenderError::Pdf(format!("failed to encode page content: {e}")))
}

fn media_box(layout: &PageLayout) -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(layout.page_width as f32),
        Object::Real(layout.page_height as f32),
    ]
}

fn info_dictionary(doc: &mut Document) -> ObjectId {
    doc.add_object(dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
        "Title" => Object::string_literal(TITLE),
    })
}
