pub mod chat;
pub mod claude;
pub mod huggingface;
pub mod ollama;
pub mod openai;

use precis_core::config::Config;

use crate::model::SummaryModel;
use crate::provider::{LlmError, LlmProvider};

/// Create the summarization model named by `config.llm.provider`.
pub fn create_model(config: &Config) -> Result<Box<dyn SummaryModel>, LlmError> {
    match config.llm.provider.as_str() {
        "huggingface" | "hf" => {
            let hf = &config.huggingface;
            Ok(Box::new(huggingface::HuggingFaceModel::new(
                hf.url.clone(),
                hf.model.clone(),
                hf.api_token.clone(),
            )))
        }
        _ => {
            let provider = create_chat_provider(config)?;
            Ok(Box::new(chat::ChatSummaryModel::new(
                provider,
                config.llm.temperature,
            )))
        }
    }
}

/// Create a chat-completion provider for the prompt-driven backends.
pub fn create_chat_provider(config: &Config) -> Result<Box<dyn LlmProvider>, LlmError> {
    let llm_config = &config.llm;
    match llm_config.provider.as_str() {
        "openai" => {
            let api_key = llm_config
                .openai_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY not set".into()))?;
            let base_url = llm_config
                .openai_base_url
                .as_deref()
                .unwrap_or("https://api.openai.com");
            Ok(Box::new(openai::OpenAiProvider::new(
                api_key.clone(),
                llm_config.openai_model.clone(),
                base_url.to_string(),
            )))
        }
        "anthropic" | "claude" => {
            let api_key = llm_config
                .anthropic_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("ANTHROPIC_API_KEY not set".into()))?;
            Ok(Box::new(claude::ClaudeProvider::new(
                api_key.clone(),
                llm_config.anthropic_model.clone(),
            )))
        }
        "ollama" => Ok(Box::new(ollama::OllamaProvider::new(
            config.ollama.url.clone(),
            config.ollama.model.clone(),
        ))),
        other => Err(LlmError::NotConfigured(format!(
            "unknown LLM provider: '{}'",
            other
        ))),
    }
}
