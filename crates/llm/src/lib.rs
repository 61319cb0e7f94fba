pub mod chunker;
pub mod model;
pub mod provider;
pub mod providers;
pub mod summarizer;

pub use chunker::{chunk_text, Chunk};
pub use model::{SummaryModel, SummaryRequest};
pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::create_model;
pub use summarizer::{truncate_words, SummarizeError, Summarizer, SummarySettings, SummaryOutcome};
