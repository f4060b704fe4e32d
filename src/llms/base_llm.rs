//! Base chat-model abstraction.
//!
//! Provides the [`BaseLLM`] trait that the dispatcher talks to, the message
//! type it sends, and the error taxonomy every implementation reports.
//! Tests substitute their own implementations without touching transport
//! code.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Role of a message in a chat-completion exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sets the behavior of the model.
    System,
    /// Supplies the query.
    User,
    /// A reply produced by the model.
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in a chat-completion exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LLMMessage {
    pub role: Role,
    pub content: String,
}

impl LLMMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures reported by a chat model.
///
/// None of these are retried or recovered from; they travel to the caller
/// as-is.
#[derive(Debug, Error)]
pub enum LLMError {
    /// No API key was configured.
    #[error("API key not set. Set the OPENAI_API_KEY environment variable.")]
    MissingApiKey,

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote service rejected the credential.
    #[error("authentication failed ({status}): {body}")]
    Authentication { status: u16, body: String },

    /// The remote service refused the request because of quota or rate limits.
    #[error("rate limited: {body}")]
    RateLimited { body: String },

    /// Any other non-success HTTP status.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response body could not be interpreted as a chat completion.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

// ---------------------------------------------------------------------------
// Call ids
// ---------------------------------------------------------------------------

/// Generate a unique id used to correlate the log lines of one call.
pub fn generate_call_id() -> String {
    Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// BaseLLM trait
// ---------------------------------------------------------------------------

/// A remote chat-completion model.
///
/// `acall` is the single suspension point of a dispatch: it sends the
/// messages once and resolves to the text of the reply message, or to the
/// error that prevented it.
#[async_trait]
pub trait BaseLLM: Send + Sync + fmt::Debug {
    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Sampling temperature sent with every request.
    fn temperature(&self) -> f64;

    /// Provider name, used in log lines.
    fn provider(&self) -> &str {
        "openai"
    }

    /// Send `messages` and return the content of the reply message verbatim.
    async fn acall(&self, messages: Vec<LLMMessage>) -> Result<String, LLMError>;
}
