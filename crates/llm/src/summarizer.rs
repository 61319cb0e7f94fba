//! Chunked summarization with an exact word budget.
//!
//! The text is cut into fixed-size character chunks, each chunk is sent to
//! the model on its own (strictly one after another), the fragments are
//! joined in chunk order and the result is cut to the requested word count.
//! Nothing is re-summarized after the cut, so the output may stop
//! mid-sentence.

use precis_core::config::{Config, SummaryConfig};
use thiserror::Error;
use tracing::{debug, info};

use crate::chunker::chunk_text;
use crate::model::{SummaryModel, SummaryRequest};
use crate::provider::LlmError;
use crate::providers::create_model;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("model failed on chunk {}: {source}", .chunk + 1)]
    Model {
        /// 0-based chunk index.
        chunk: usize,
        #[source]
        source: LlmError,
    },
    #[error(transparent)]
    Provider(#[from] LlmError),
}

/// Chunking and length settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarySettings {
    /// Characters per chunk.
    pub chunk_size: usize,
    /// `min_length` passed to the model, and the floor for `max_length`.
    pub min_length: u32,
}

impl Default for SummarySettings {
    fn default() -> Self {
        SummaryConfig::default().into()
    }
}

impl From<SummaryConfig> for SummarySettings {
    fn from(config: SummaryConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            min_length: config.min_length,
        }
    }
}

/// Everything the summarizer produced, for reporting.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub chunk_count: usize,
    /// Model output per chunk, in chunk order.
    pub fragments: Vec<String>,
    /// Words in the joined fragments before truncation.
    pub raw_word_count: usize,
    /// The final, truncated summary.
    pub text: String,
}

impl SummaryOutcome {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

pub struct Summarizer {
    model: Box<dyn SummaryModel>,
    settings: SummarySettings,
}

impl Summarizer {
    pub fn new(
        model: Box<dyn SummaryModel>,
        settings: SummarySettings,
    ) -> Result<Self, SummarizeError> {
        if settings.chunk_size == 0 {
            return Err(SummarizeError::InvalidInput(
                "chunk size must be at least 1 character".into(),
            ));
        }
        Ok(Self { model, settings })
    }

    /// Build from config, creating the configured model backend.
    pub fn from_config(config: &Config) -> Result<Self, SummarizeError> {
        let model = create_model(config)?;
        Self::new(model, config.summary.clone().into())
    }

    pub fn settings(&self) -> SummarySettings {
        self.settings
    }

    pub fn model_description(&self) -> String {
        self.model.describe()
    }

    /// `(max_length, min_length)` for a requested word count:
    /// `max = max(2 * desired, min_length)`.
    pub fn length_bounds(&self, desired_words: usize) -> (u32, u32) {
        let doubled = u32::try_from(desired_words.saturating_mul(2)).unwrap_or(u32::MAX);
        (doubled.max(self.settings.min_length), self.settings.min_length)
    }

    /// Summarize `text` down to at most `desired_words` words.
    pub async fn summarize(
        &self,
        text: &str,
        desired_words: usize,
    ) -> Result<SummaryOutcome, SummarizeError> {
        let chunks = chunk_text(text, self.settings.chunk_size);
        let (max_length, min_length) = self.length_bounds(desired_words);

        info!(
            chunks = chunks.len(),
            chunk_size = self.settings.chunk_size,
            max_length,
            min_length,
            "Summarizing with {}",
            self.model.describe()
        );

        let mut fragments = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            info!(chunk = chunk.index + 1, total = chunks.len(), "Summarizing chunk");
            let request = SummaryRequest::new(chunk.content.clone(), max_length, min_length);
            let fragment = self
                .model
                .summarize(&request)
                .await
                .map_err(|source| SummarizeError::Model {
                    chunk: chunk.index,
                    source,
                })?;
            let fragment = fragment.trim().to_string();
            debug!(
                chunk = chunk.index + 1,
                words = fragment.split_whitespace().count(),
                "Chunk summarized"
            );
            fragments.push(fragment);
        }

        let raw = fragments.join(" ");
        let raw_word_count = raw.split_whitespace().count();
        let text = truncate_words(&raw, desired_words);

        info!(
            raw_words = raw_word_count,
            final_words = text.split_whitespace().count(),
            "Summary assembled"
        );

        Ok(SummaryOutcome {
            chunk_count: chunks.len(),
            fragments,
            raw_word_count,
            text,
        })
    }
}

/// First `limit` whitespace-delimited words of `text`, joined by single spaces.
pub fn truncate_words(text: &str, limit: usize) -> String {
    text.split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Answers every chunk with a fixed fragment and records what it was asked.
    struct FakeModel {
        fragment: String,
        requests: Arc<Mutex<Vec<SummaryRequest>>>,
        fail_on: Option<usize>,
    }

    impl FakeModel {
        fn new(fragment: &str) -> (Self, Arc<Mutex<Vec<SummaryRequest>>>) {
            let requests = Arc::new(Mutex::new(Vec::new()));
            let model = Self {
                fragment: fragment.to_string(),
                requests: requests.clone(),
                fail_on: None,
            };
            (model, requests)
        }
    }

    #[async_trait]
    impl SummaryModel for FakeModel {
        async fn summarize(&self, request: &SummaryRequest) -> Result<String, LlmError> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            if self.fail_on == Some(requests.len() - 1) {
                return Err(LlmError::ApiError {
                    status: 503,
                    body: "model loading".into(),
                });
            }
            Ok(format!("{} ", self.fragment))
        }

        fn describe(&self) -> String {
            "fake".into()
        }
    }

    fn summarizer(model: FakeModel) -> Summarizer {
        Summarizer::new(Box::new(model), SummarySettings::default()).unwrap()
    }

    #[tokio::test]
    async fn pangram_document_yields_exact_word_count() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(50);
        let (model, requests) =
            FakeModel::new("A fox jumps over a dog. The dog does not react at all.");
        let outcome = summarizer(model).summarize(&text, 10).await.unwrap();

        assert_eq!(outcome.chunk_count, 5);
        assert_eq!(requests.lock().unwrap().len(), 5);
        assert_eq!(outcome.word_count(), 10);
        assert_eq!(outcome.text, "A fox jumps over a dog. The dog does not");
        assert_eq!(outcome.raw_word_count, 5 * 13);
    }

    #[tokio::test]
    async fn requests_follow_chunk_order_and_bounds() {
        let text = format!("{}{}", "a".repeat(500), "b".repeat(20));
        let (model, requests) = FakeModel::new("summary");
        summarizer(model).summarize(&text, 80).await.unwrap();

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].text, "a".repeat(500));
        assert_eq!(requests[1].text, "b".repeat(20));
        for r in requests.iter() {
            assert_eq!(r.max_length, 160);
            assert_eq!(r.min_length, 100);
            assert!(!r.do_sample);
        }
    }

    #[tokio::test]
    async fn short_raw_summary_is_returned_whole() {
        let (model, _) = FakeModel::new("only four words here");
        let outcome = summarizer(model).summarize("tiny input", 50).await.unwrap();
        assert_eq!(outcome.text, "only four words here");
        assert_eq!(outcome.raw_word_count, 4);
    }

    #[tokio::test]
    async fn empty_text_makes_no_model_calls() {
        let (model, requests) = FakeModel::new("never used");
        let outcome = summarizer(model).summarize("", 10).await.unwrap();
        assert_eq!(outcome.chunk_count, 0);
        assert!(outcome.fragments.is_empty());
        assert_eq!(outcome.text, "");
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn model_failure_names_the_chunk() {
        let (mut model, requests) = FakeModel::new("fragment");
        model.fail_on = Some(1);
        let text = "x".repeat(1200);
        let err = summarizer(model).summarize(&text, 10).await.unwrap_err();

        assert!(matches!(err, SummarizeError::Model { chunk: 1, .. }));
        assert!(err.to_string().starts_with("model failed on chunk 2"));
        // The run stops at the failing chunk.
        assert_eq!(requests.lock().unwrap().len(), 2);
    }

    #[test]
    fn zero_chunk_size_is_invalid() {
        let (model, _) = FakeModel::new("x");
        let settings = SummarySettings {
            chunk_size: 0,
            min_length: 100,
        };
        let err = Summarizer::new(Box::new(model), settings).err().unwrap();
        assert!(matches!(err, SummarizeError::InvalidInput(_)));
    }

    #[test]
    fn max_length_never_drops_below_min_length() {
        let (model, _) = FakeModel::new("x");
        let s = summarizer(model);
        assert_eq!(s.settings(), SummarySettings::default());
        assert_eq!(s.length_bounds(10), (100, 100));
        assert_eq!(s.length_bounds(50), (100, 100));
        assert_eq!(s.length_bounds(51), (102, 100));
        assert_eq!(s.length_bounds(0), (100, 100));
        assert_eq!(s.length_bounds(usize::MAX), (u32::MAX, 100));
    }

    #[test]
    fn truncation_law() {
        let raw = "one  two\tthree\nfour five six seven";
        let raw_words = raw.split_whitespace().count();
        for desired in 0..10 {
            let out = truncate_words(raw, desired);
            assert_eq!(out.split_whitespace().count(), desired.min(raw_words));
        }
        assert_eq!(truncate_words(raw, 3), "one two three");
        assert_eq!(truncate_words(raw, 0), "");
        assert_eq!(truncate_words("", 5), "");
    }
}
