//! Chat model layer.
//!
//! - [`base_llm`] - The [`BaseLLM`] trait, message type and error taxonomy
//! - [`providers`] - Concrete implementations talking to remote services

pub mod base_llm;
pub mod providers;

pub use base_llm::{BaseLLM, LLMError, LLMMessage, Role};
