//! Provider implementations of [`BaseLLM`](crate::llms::base_llm::BaseLLM).
//!
//! | Provider | Module |
//! |----------|--------|
//! | OpenAI Chat Completions | [`openai`] |

pub mod openai;

pub use openai::OpenAICompletion;
