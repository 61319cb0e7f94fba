use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use precis_ingest::extract_file;
use precis_llm::{Summarizer, SummaryOutcome};
use precis_render::{write_summary_pdf, PageLayout, RenderReport};
use tracing::info;

use crate::terminal::Terminal;

/// Values already supplied on the command line; the rest are prompted for.
#[derive(Debug, Clone, Default)]
pub struct Presets {
    pub input: Option<PathBuf>,
    pub words: Option<usize>,
    pub output: Option<PathBuf>,
}

/// What one successful run did.
#[derive(Debug)]
pub struct RunReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub extracted_chars: usize,
    pub summary: SummaryOutcome,
    pub render: RenderReport,
}

/// Extract, summarize and render, prompting for anything not preset.
///
/// Prompts come in the order the work needs them: the input file before
/// extraction, the word count before summarizing, the output file before
/// rendering. The first failure ends the run.
pub async fn run<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    summarizer: &Summarizer,
    presets: &Presets,
    layout: &PageLayout,
) -> Result<RunReport> {
    let input = match &presets.input {
        Some(path) => path.clone(),
        None => term.ask_input_file()?,
    };
    let text = extract(&input)?;
    let extracted_chars = text.chars().count();

    let words = match presets.words {
        Some(words) => words,
        None => term.ask_word_count()?,
    };
    let summary = summarizer
        .summarize(&text, words)
        .await
        .context("summarization failed")?;

    let output = match &presets.output {
        Some(path) => path.clone(),
        None => term.ask_output_file()?,
    };
    let render = write_summary_pdf(&summary.text, &output, layout)
        .with_context(|| format!("failed to write summary to {}", output.display()))?;

    term.print_success("Summary saved successfully.")?;

    Ok(RunReport {
        input,
        output,
        extracted_chars,
        summary,
        render,
    })
}

fn extract(path: &Path) -> Result<String> {
    let document = extract_file(path)
        .with_context(|| format!("failed to extract text from {}", path.display()))?;
    info!(
        file = %document.filename,
        file_type = %document.file_type,
        pages = document.pages.len(),
        chars = document.total_chars(),
        "Extracted document text"
    );
    Ok(document.full_text())
}
