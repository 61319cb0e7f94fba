//! Hugging Face Inference API, `summarization` task.
//!
//! Talks to seq2seq checkpoints (BART, Pegasus, T5) directly, so the length
//! bounds in a [`SummaryRequest`] are generation lengths in tokens.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::model::{SummaryModel, SummaryRequest};
use crate::provider::{check_status, LlmError};

pub struct HuggingFaceModel {
    client: reqwest::Client,
    url: String,
    model: String,
    api_token: Option<String>,
}

impl HuggingFaceModel {
    pub fn new(url: String, model: String, api_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_string(),
            model,
            api_token,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.url, self.model)
    }

    fn build_request_body(request: &SummaryRequest) -> serde_json::Value {
        json!({
            "inputs": request.text,
            "parameters": {
                "max_length": request.max_length,
                "min_length": request.min_length,
                "do_sample": request.do_sample,
            },
            // Block while a cold model loads instead of answering 503.
            "options": { "wait_for_model": true },
        })
    }

    /// The task returns `[{"summary_text": ...}]`; some deployments drop the array.
    fn parse_response(resp: &serde_json::Value) -> Result<String, LlmError> {
        let first = match resp {
            serde_json::Value::Array(items) => items
                .first()
                .ok_or_else(|| LlmError::ParseError("empty summarization result".into()))?,
            other => other,
        };
        first["summary_text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| LlmError::ParseError("missing summary_text".into()))
    }
}

#[async_trait]
impl SummaryModel for HuggingFaceModel {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, LlmError> {
        let url = self.endpoint();
        let body = Self::build_request_body(request);

        debug!(
            max_length = request.max_length,
            min_length = request.min_length,
            "Hugging Face request to {}",
            url
        );

        let mut builder = self.client.post(&url).json(&body);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await?;
        let resp: serde_json::Value = check_status(response).await?.json().await?;

        Self::parse_response(&resp)
    }

    fn describe(&self) -> String {
        format!("huggingface/{}", self.model)
    }
}
