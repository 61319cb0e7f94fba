//! Lays a summary out as left-aligned Helvetica text and writes it as a PDF.

pub mod helvetica;
pub mod layout;
pub mod pdf;

pub use layout::{layout_summary, paginate, wrap_words, Page, PageLayout, PlacedLine};
pub use pdf::{render_pdf, write_summary_pdf, RenderError, RenderReport, RenderedPdf};
