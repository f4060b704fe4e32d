//! Immutable persona lookup table.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::AssistantError;
use crate::persona::builtin::BUILTIN_PERSONAS;

/// One selectable persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    /// Human-readable label; doubles as the identifier sent by the selector.
    pub label: String,
    /// System prompt defining the persona's expertise and tone.
    pub prompt: String,
    /// Short description for the usage help.
    pub description: String,
}

impl Persona {
    pub fn new(
        label: impl Into<String>,
        prompt: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            prompt: prompt.into(),
            description: description.into(),
        }
    }
}

/// Ordered, read-only mapping from persona label to system prompt.
///
/// The mapping is total over its labels and is never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    /// Build a registry from `personas`, keeping their order.
    ///
    /// Rejects an empty table, duplicate labels, and blank labels or prompts.
    pub fn new(personas: Vec<Persona>) -> Result<Self, AssistantError> {
        if personas.is_empty() {
            return Err(AssistantError::InvalidRegistry(
                "at least one persona is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        for persona in &personas {
            if persona.label.trim().is_empty() {
                return Err(AssistantError::InvalidRegistry("blank persona label".into()));
            }
            if persona.prompt.trim().is_empty() {
                return Err(AssistantError::InvalidRegistry(format!(
                    "persona '{}' has an empty prompt",
                    persona.label
                )));
            }
            if !seen.insert(persona.label.as_str()) {
                return Err(AssistantError::InvalidRegistry(format!(
                    "duplicate persona label '{}'",
                    persona.label
                )));
            }
        }

        Ok(Self { personas })
    }

    /// The three built-in expert personas.
    pub fn builtin() -> Self {
        Self {
            personas: BUILTIN_PERSONAS
                .iter()
                .map(|(label, prompt, description)| Persona::new(*label, *prompt, *description))
                .collect(),
        }
    }

    /// Resolve `label` to its system prompt.
    pub fn lookup(&self, label: &str) -> Result<&str, AssistantError> {
        self.get(label)
            .map(|p| p.prompt.as_str())
            .ok_or_else(|| AssistantError::UnknownPersona(label.to_string()))
    }

    /// Full persona record for `label`, if registered.
    pub fn get(&self, label: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.label == label)
    }

    /// Whether `label` is registered.
    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Registered labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.personas.iter().map(|p| p.label.as_str())
    }

    /// All personas in display order.
    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    /// The label selected before the user picks one.
    pub fn default_label(&self) -> &str {
        // `new` and `builtin` both guarantee at least one entry.
        self.personas
            .first()
            .map(|p| p.label.as_str())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
