use std::path::PathBuf;

use clap::Parser;
use precis_core::Config;

use crate::terminal::parse_word_count;

/// Summarize a document into a PDF of a chosen length.
///
/// Reads a .txt, .pdf or .docx file, summarizes it chunk by chunk with a
/// pretrained summarization model and writes the summary as a PDF. Anything
/// not given on the command line is asked for interactively.
#[derive(Parser, Debug, Default)]
#[command(name = "precis", version, about = "Summarize a document into a PDF")]
pub struct CliArgs {
    /// Document to summarize (.txt, .pdf or .docx)
    #[arg(long, short, env = "PRECIS_INPUT")]
    pub input: Option<PathBuf>,

    /// Number of words in the summary
    #[arg(long, short, env = "PRECIS_WORDS", value_parser = parse_word_count)]
    pub words: Option<usize>,

    /// Where to write the summary PDF
    #[arg(long, short, env = "PRECIS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Config profile; keys are read as {PROFILE}_{KEY} before {KEY}
    #[arg(long, env = "PRECIS_PROFILE")]
    pub profile: Option<String>,

    /// Model backend: huggingface, openai, anthropic or ollama
    #[arg(long)]
    pub provider: Option<String>,

    /// Model name override (uses the provider's configured model if not set)
    #[arg(long)]
    pub model: Option<String>,

    /// API key / token for the selected provider (overrides env)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Characters per chunk sent to the model
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Minimum summary length requested from the model per chunk
    #[arg(long)]
    pub min_length: Option<u32>,

    /// Print the resolved configuration (secrets redacted) and exit
    #[arg(long)]
    pub show_config: bool,
}

impl CliArgs {
    /// Load config for the selected profile and apply flag overrides on top.
    pub fn resolve_config(&self) -> Config {
        let mut config = match self.profile.as_deref() {
            Some(profile) => Config::for_profile(profile),
            None => Config::from_env(),
        };
        self.apply_overrides(&mut config);
        config
    }

    /// Flags win over environment values.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(provider) = &self.provider {
            config.llm.provider = provider.to_lowercase();
        }
        if let Some(chunk_size) = self.chunk_size {
            config.summary.chunk_size = chunk_size;
        }
        if let Some(min_length) = self.min_length {
            config.summary.min_length = min_length;
        }

        let provider = config.llm.provider.clone();
        if let Some(model) = &self.model {
            match provider.as_str() {
                "openai" => config.llm.openai_model = model.clone(),
                "anthropic" | "claude" => config.llm.anthropic_model = model.clone(),
                "ollama" => config.ollama.model = model.clone(),
                _ => config.huggingface.model = model.clone(),
            }
        }
        if let Some(key) = &self.api_key {
            match provider.as_str() {
                "openai" => config.llm.openai_api_key = Some(key.clone()),
                "anthropic" | "claude" => config.llm.anthropic_api_key = Some(key.clone()),
                "ollama" => {
                    tracing::warn!("--api-key is ignored for the ollama provider");
                }
                _ => config.huggingface.api_token = Some(key.clone()),
            }
        }
    }
}
