//! # Expert Assistant
//!
//! A small web assistant that answers free-text questions in the voice of
//! one of a few fixed expert personas.
//!
//! A question travels through three pieces:
//!
//! - [`persona::PersonaRegistry`] maps the selected label to a system prompt.
//! - [`dispatcher::ResponseDispatcher`] sends `[system prompt, question]` to
//!   a chat model ([`llms::BaseLLM`]) once and returns the reply verbatim.
//! - [`interaction::Interaction`] validates the submission and tracks its
//!   state; [`server`] renders it as a page.

pub mod dispatcher;
pub mod error;
pub mod interaction;
pub mod llms;
pub mod persona;
pub mod server;
pub mod utilities;

pub use dispatcher::ResponseDispatcher;
pub use error::AssistantError;
pub use interaction::{Answer, Interaction, InteractionState};
pub use llms::{BaseLLM, LLMError, LLMMessage};
pub use persona::{Persona, PersonaRegistry};
pub use utilities::AppConfig;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "expert-assistant";
