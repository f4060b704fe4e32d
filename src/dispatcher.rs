//! Response dispatcher: one persona-prefixed question, one model call.

use std::sync::Arc;

use crate::error::AssistantError;
use crate::llms::base_llm::{generate_call_id, BaseLLM, LLMMessage};
use crate::persona::PersonaRegistry;

/// Model identifier used for every dispatch.
pub const MODEL_ID: &str = "gpt-4o-mini";

/// Sampling temperature used for every dispatch.
pub const TEMPERATURE: f64 = 0.7;

/// Turns a question and a persona label into a single completion call.
///
/// The dispatcher does not validate the question: whitespace-only text is
/// forwarded as-is. Callers check emptiness first (see
/// [`crate::interaction::validate_input`]).
#[derive(Debug, Clone)]
pub struct ResponseDispatcher {
    registry: Arc<PersonaRegistry>,
    llm: Arc<dyn BaseLLM>,
}

impl ResponseDispatcher {
    pub fn new(registry: Arc<PersonaRegistry>, llm: Arc<dyn BaseLLM>) -> Self {
        Self { registry, llm }
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    /// Build the exchange for `label`: the persona prompt as the system
    /// message followed by `user_text` as the user message. Nothing else.
    pub fn build_exchange(
        &self,
        user_text: &str,
        label: &str,
    ) -> Result<Vec<LLMMessage>, AssistantError> {
        let prompt = self.registry.lookup(label)?;
        Ok(vec![LLMMessage::system(prompt), LLMMessage::user(user_text)])
    }

    /// Ask the model `user_text` in the voice of persona `label` and return
    /// its reply verbatim.
    ///
    /// Remote failures are returned unchanged inside
    /// [`AssistantError::RemoteCall`].
    pub async fn dispatch(&self, user_text: &str, label: &str) -> Result<String, AssistantError> {
        let messages = self.build_exchange(user_text, label)?;
        let call_id = generate_call_id();

        log::debug!(
            "dispatch[{}]: provider={}, model={}, persona={}, messages={}",
            call_id,
            self.llm.provider(),
            self.llm.model(),
            label,
            messages.len(),
        );

        match self.llm.acall(messages).await {
            Ok(answer) => {
                log::debug!("dispatch[{}]: reply of {} chars", call_id, answer.chars().count());
                Ok(answer)
            }
            Err(e) => {
                log::warn!("dispatch[{}]: remote call failed: {}", call_id, e);
                Err(e.into())
            }
        }
    }
}
