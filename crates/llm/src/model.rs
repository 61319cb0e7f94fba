//! The summarization capability the pipeline depends on.

use async_trait::async_trait;
use serde::Serialize;

use crate::provider::LlmError;

/// One call to a summarization model.
///
/// Lengths are in the model's own units: tokens for seq2seq checkpoints,
/// words for chat models prompted in natural language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRequest {
    pub text: String,
    pub max_length: u32,
    pub min_length: u32,
    /// Always false from the pipeline: decoding must be deterministic.
    pub do_sample: bool,
}

impl SummaryRequest {
    pub fn new(text: impl Into<String>, max_length: u32, min_length: u32) -> Self {
        Self {
            text: text.into(),
            max_length,
            min_length,
            do_sample: false,
        }
    }
}

/// A model that turns a passage into a shorter abstractive summary.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    /// Summarize `request.text`, returning the summary text.
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, LlmError>;

    /// Human-readable backend description for logs and the startup banner.
    fn describe(&self) -> String;
}
