//! Error types for the assistant core.

use thiserror::Error;

use crate::llms::base_llm::LLMError;

/// Errors produced while handling a submission.
///
/// Only [`AssistantError::EmptyInput`] is recovered from inside the crate
/// (it becomes a warning on the page). Everything else ends the request.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The submitted text was empty or whitespace only.
    #[error("質問や相談内容を入力してください")]
    EmptyInput,

    /// The label is not one of the registered personas.
    #[error("Unknown persona: {0}")]
    UnknownPersona(String),

    /// A persona table failed validation when it was built.
    #[error("Invalid persona registry: {0}")]
    InvalidRegistry(String),

    /// The remote completion call failed.
    #[error(transparent)]
    RemoteCall(#[from] LLMError),
}

impl AssistantError {
    /// Whether the error is a local validation failure rather than a fault.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AssistantError::EmptyInput)
    }
}
