use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::provider::{check_status, LlmError, LlmProvider, Message};

/// Local Ollama `/api/chat` backend.
pub struct OllamaProvider {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_string(),
            model,
        }
    }

    /// Ollama takes sampling settings under `options`; `num_predict` caps output tokens.
    fn build_request_body(
        &self,
        messages: &[Message],
        temperature: f32,
        max_tokens: u32,
    ) -> serde_json::Value {
        let api_messages: Vec<serde_json::Value> = messages
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();

        json!({
            "model": self.model,
            "messages": api_messages,
            "stream": false,
            "options": {
                "temperature": temperature,
                "num_predict": max_tokens,
            },
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.url);
        let body = self.build_request_body(&messages, temperature, max_tokens);

        debug!(model = %self.model, "Ollama request to {}", url);

        let response = self.client.post(&url).json(&body).send().await?;
        let resp: serde_json::Value = check_status(response).await?.json().await?;

        resp["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| LlmError::ParseError("missing message.content".into()))
    }

    fn name(&self) -> String {
        format!("ollama/{}", self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_disables_streaming_and_caps_tokens() {
        let provider = OllamaProvider::new("http://localhost:11434/".into(), "llama3.2".into());
        let body = provider.build_request_body(&[Message::user("text")], 0.0, 400);
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["num_predict"], 400);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(provider.url, "http://localhost:11434");
        assert_eq!(provider.name(), "ollama/llama3.2");
    }
}
