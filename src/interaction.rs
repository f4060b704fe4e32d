//! Per-submission interaction flow.
//!
//! ```text
//! Idle ─edit─▶ AwaitingInput ─submit─┬─ empty ──▶ Rejected
//!                                    └─ text ───▶ Dispatching ─┬─ ok ──▶ Displaying
//!                                                              └─ err ─▶ Fatal
//! ```
//!
//! Any edit from a terminal state goes back to `AwaitingInput`. Input is
//! validated in exactly one place, [`validate_input`], before the busy state
//! is entered and before any network call.

use serde::Serialize;

use crate::dispatcher::ResponseDispatcher;
use crate::error::AssistantError;

/// Heading shown above an answer from `label`.
pub fn answer_heading(label: &str) -> String {
    format!("{}からの回答", label)
}

/// Accept `text` if it has something besides whitespace.
///
/// Returns the text untouched; trimming is only used for the check.
pub fn validate_input(text: &str) -> Result<&str, AssistantError> {
    if text.trim().is_empty() {
        Err(AssistantError::EmptyInput)
    } else {
        Ok(text)
    }
}

/// A reply ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    /// Persona that answered.
    pub persona: String,
    /// `"{persona}からの回答"`.
    pub heading: String,
    /// Model reply, verbatim.
    pub answer: String,
}

/// Where a submission currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    AwaitingInput,
    Dispatching,
    Displaying(Answer),
    /// Submitted text was blank; holds the warning to show.
    Rejected { warning: String },
    /// The dispatch failed; no recovery is offered for this submission.
    Fatal { message: String },
}

impl InteractionState {
    fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::AwaitingInput => "awaiting_input",
            InteractionState::Dispatching => "dispatching",
            InteractionState::Displaying(_) => "displaying",
            InteractionState::Rejected { .. } => "rejected",
            InteractionState::Fatal { .. } => "fatal",
        }
    }
}

/// One user's persona selection, question text and submission state.
#[derive(Debug)]
pub struct Interaction {
    dispatcher: ResponseDispatcher,
    selected: String,
    text: String,
    state: InteractionState,
}

impl Interaction {
    /// Start idle with the first registered persona selected.
    pub fn new(dispatcher: ResponseDispatcher) -> Self {
        let selected = dispatcher.registry().default_label().to_string();
        Self {
            dispatcher,
            selected,
            text: String::new(),
            state: InteractionState::Idle,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn selected_persona(&self) -> &str {
        &self.selected
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Change the persona selection.
    ///
    /// The selector only offers registered labels, so an unknown one is a
    /// caller bug and leaves the interaction untouched.
    pub fn select_persona(&mut self, label: &str) -> Result<(), AssistantError> {
        if !self.dispatcher.registry().contains(label) {
            return Err(AssistantError::UnknownPersona(label.to_string()));
        }
        self.selected = label.to_string();
        self.transition(InteractionState::AwaitingInput);
        Ok(())
    }

    /// Replace the question text.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.transition(InteractionState::AwaitingInput);
    }

    /// Submit the current question to the selected persona.
    ///
    /// Blank text ends in `Rejected` and returns `Ok`: the warning is part of
    /// the resulting state. A dispatch failure ends in `Fatal` and the error is
    /// returned to the caller.
    pub async fn submit(&mut self) -> Result<&InteractionState, AssistantError> {
        if let Err(e) = validate_input(&self.text) {
            log::warn!("submission rejected: {}", e);
            self.transition(InteractionState::Rejected {
                warning: e.to_string(),
            });
            return Ok(&self.state);
        }

        self.transition(InteractionState::Dispatching);

        match self.dispatcher.dispatch(&self.text, &self.selected).await {
            Ok(answer) => {
                self.transition(InteractionState::Displaying(Answer {
                    persona: self.selected.clone(),
                    heading: answer_heading(&self.selected),
                    answer,
                }));
                Ok(&self.state)
            }
            Err(e) => {
                self.transition(InteractionState::Fatal {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn transition(&mut self, next: InteractionState) {
        log::debug!("interaction: {} -> {}", self.state.name(), next.name());
        self.state = next;
    }
}
