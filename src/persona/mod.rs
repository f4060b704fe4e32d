//! Persona registry: the fixed set of expert personas a question can be
//! addressed to.
//!
//! A persona is a display label (also the identifier submitted by the page),
//! the system prompt that steers the model, and a one-line description shown
//! in the usage help. The table is built once at startup and shared read-only.

pub mod builtin;
pub mod registry;

pub use registry::{Persona, PersonaRegistry};
