//! Document intelligence gateway: text summarization and question answering
//! over stored PDFs, backed by a hosted LLM.

pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod prompt;
pub mod provider;
pub mod splitter;

mod service;

pub use config::LlmConfig;
pub use error::IntelligenceError;
pub use service::DocumentIntelligence;
