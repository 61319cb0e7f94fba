mod cli;
mod pipeline;
mod terminal;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use precis_core::config::load_dotenv;
use precis_llm::Summarizer;
use precis_render::PageLayout;

use crate::cli::CliArgs;
use crate::pipeline::Presets;
use crate::terminal::Terminal;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr so prompts on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    load_dotenv();
    let args = CliArgs::parse();
    let mut terminal = Terminal::new(io::stdin().lock(), io::stdout());

    match run(&args, &mut terminal).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Run failed");
            // Nothing more can be reported if stdout itself is gone.
            terminal.print_error(&format!("{e:#}")).ok();
            ExitCode::FAILURE
        }
    }
}

async fn run<R: io::BufRead, W: io::Write>(
    args: &CliArgs,
    terminal: &mut Terminal<R, W>,
) -> Result<()> {
    let config = args.resolve_config();

    if args.show_config {
        let json = serde_json::to_string_pretty(&config.redacted_summary())?;
        terminal.print_info(&json)?;
        return Ok(());
    }

    config.validate().context("invalid configuration")?;
    config.log_summary();

    let summarizer = Summarizer::from_config(&config)
        .context("failed to set up the summarization model")?;
    let settings = summarizer.settings();
    info!(
        model = %summarizer.model_description(),
        chunk_size = settings.chunk_size,
        min_length = settings.min_length,
        "Model ready"
    );

    let presets = Presets {
        input: args.input.clone(),
        words: args.words,
        output: args.output.clone(),
    };
    let report = pipeline::run(terminal, &summarizer, &presets, &PageLayout::default()).await?;

    info!(
        input = %report.input.display(),
        output = %report.output.display(),
        chars = report.extracted_chars,
        chunks = report.summary.chunk_count,
        raw_words = report.summary.raw_word_count,
        words = report.summary.word_count(),
        pages = report.render.page_count,
        bytes = report.render.bytes_written,
        "Run complete"
    );
    Ok(())
}
