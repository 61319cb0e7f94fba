//! Summaries from general chat models.
//!
//! Chat models have no `min_length`/`max_length` generation knobs, so the
//! bounds are stated in the prompt (as words) and the output token budget is
//! sized from `max_length`.

use async_trait::async_trait;

use crate::model::{SummaryModel, SummaryRequest};
use crate::provider::{LlmError, LlmProvider, Message};

const SYSTEM_PROMPT: &str = "You are an abstractive summarization model. \
Summarize the passage you are given in your own words. \
Reply with the summary text only, without preamble or formatting.";

/// Rough upper bound on tokens per English word, with headroom.
const TOKENS_PER_WORD: u32 = 2;
const MIN_TOKEN_BUDGET: u32 = 256;

pub struct ChatSummaryModel {
    provider: Box<dyn LlmProvider>,
    temperature: f32,
}

impl ChatSummaryModel {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32) -> Self {
        Self {
            provider,
            temperature,
        }
    }

    fn build_messages(request: &SummaryRequest) -> Vec<Message> {
        let user = format!(
            "Summarize the following text in at least {} and at most {} words.\n\n{}",
            request.min_length, request.max_length, request.text
        );
        vec![Message::system(SYSTEM_PROMPT), Message::user(user)]
    }

    fn token_budget(request: &SummaryRequest) -> u32 {
        request
            .max_length
            .saturating_mul(TOKENS_PER_WORD)
            .max(MIN_TOKEN_BUDGET)
    }
}

#[async_trait]
impl SummaryModel for ChatSummaryModel {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, LlmError> {
        let messages = Self::build_messages(request);
        // Sampling is never requested; temperature stays as configured (0 by default).
        let reply = self
            .provider
            .complete(messages, self.temperature, Self::token_budget(request))
            .await?;
        Ok(reply.trim().to_string())
    }

    fn describe(&self) -> String {
        self.provider.name()
    }
}
