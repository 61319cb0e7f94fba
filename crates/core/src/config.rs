use std::env;

use serde::{Deserialize, Serialize};

use crate::error::PrecisError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub summary: SummaryConfig,
    pub llm: LlmConfig,
    pub huggingface: HuggingFaceConfig,
    pub ollama: OllamaConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `PRECIS_PROFILE` env var. When set (e.g. `WORK`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("PRECIS_PROFILE", "");
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            summary: SummaryConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
            huggingface: HuggingFaceConfig::from_env_profiled(p),
            ollama: OllamaConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() {
            "default"
        } else {
            &self.profile
        }
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), PrecisError> {
        if self.summary.chunk_size == 0 {
            return Err(PrecisError::Config(
                "SUMMARY_CHUNK_SIZE must be at least 1".to_string(),
            ));
        }
        if !self.llm.is_configured() {
            return Err(PrecisError::Config(format!(
                "LLM provider '{}' is missing credentials",
                self.llm.provider
            )));
        }
        if self.llm.uses_huggingface() && self.huggingface.requires_token() {
            return Err(PrecisError::Config(format!(
                "HF_API_TOKEN is required for {}",
                self.huggingface.url
            )));
        }
        Ok(())
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  summary:     chunk_size={}, min_length={}",
            self.summary.chunk_size,
            self.summary.min_length
        );
        tracing::info!(
            "  llm:         provider={}, temperature={}",
            self.llm.provider,
            self.llm.temperature
        );
        tracing::info!("  huggingface: model={}", self.huggingface.model);
        tracing::info!("  ollama:      url={}", self.ollama.url);
    }

    /// Return a redacted view safe for printing (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "summary": {
                "chunk_size": self.summary.chunk_size,
                "min_length": self.summary.min_length,
            },
            "llm": {
                "provider": self.llm.provider,
                "temperature": self.llm.temperature,
                "configured": self.llm.is_configured(),
            },
            "huggingface": {
                "url": self.huggingface.url,
                "model": self.huggingface.model,
                "token_set": self.huggingface.api_token.is_some(),
            },
            "ollama": { "url": self.ollama.url, "model": self.ollama.model },
        })
    }
}

// ── Summary ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Characters per chunk handed to the model.
    pub chunk_size: usize,
    /// Lower bound passed to the model; also the floor for `max_length`.
    pub min_length: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            min_length: 100,
        }
    }
}

impl SummaryConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        Self {
            chunk_size: profiled_env_usize(p, "SUMMARY_CHUNK_SIZE", defaults.chunk_size),
            min_length: profiled_env_u32(p, "SUMMARY_MIN_LENGTH", defaults.min_length),
        }
    }
}

// ── LLM (OpenAI / Anthropic / Ollama / Hugging Face) ─────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "huggingface", "openai", "anthropic", "ollama"
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub temperature: f32,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", "huggingface"),
            openai_api_key: profiled_env_opt(p, "OPENAI_API_KEY"),
            openai_model: profiled_env_or(p, "OPENAI_MODEL", "gpt-4o-mini"),
            openai_base_url: profiled_env_opt(p, "OPENAI_BASE_URL"),
            anthropic_api_key: profiled_env_opt(p, "ANTHROPIC_API_KEY"),
            anthropic_model: profiled_env_or(p, "ANTHROPIC_MODEL", "claude-sonnet-4-5-20250929"),
            temperature: profiled_env_or(p, "LLM_TEMPERATURE", "0.0")
                .parse()
                .unwrap_or(0.0),
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "openai" => self.openai_api_key.is_some(),
            "anthropic" | "claude" => self.anthropic_api_key.is_some(),
            // Hugging Face tokens are checked against the endpoint in `Config::validate`.
            "huggingface" | "hf" | "ollama" => true,
            _ => false,
        }
    }

    pub fn uses_huggingface(&self) -> bool {
        matches!(self.provider.as_str(), "huggingface" | "hf")
    }
}

// ── Hugging Face Inference API ───────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    pub url: String,
    pub model: String,
    pub api_token: Option<String>,
}

impl HuggingFaceConfig {
    /// The hosted Inference API rejects anonymous calls; self-hosted
    /// endpoints may not need a token.
    pub fn requires_token(&self) -> bool {
        self.api_token.is_none() && self.url.contains("huggingface.co")
    }

    fn from_env_profiled(p: &str) -> Self {
        Self {
            url: profiled_env_or(
                p,
                "HF_API_URL",
                "https://router.huggingface.co/hf-inference/models",
            ),
            model: profiled_env_or(p, "HF_MODEL", "sshleifer/distilbart-cnn-12-6"),
            api_token: profiled_env_opt(p, "HF_API_TOKEN"),
        }
    }
}

// ── Ollama (local models) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
}

impl OllamaConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            url: profiled_env_or(p, "OLLAMA_URL", "http://localhost:11434"),
            model: profiled_env_or(p, "OLLAMA_MODEL", "llama3.2"),
        }
    }
}
