//! Review Agent - the single stateful component
//!
//! Owns the review table, talks to the inference and storage engines,
//! and normalizes whatever shapes they hand back. Agents are addressed
//! by name through an `AgentDirectory`; each name maps to one instance
//! with its own store.

pub mod prompt;
pub mod reviewer;
pub mod routes;
pub mod directory;

#[cfg(test)]
pub(crate) mod testing;

pub use reviewer::{ReviewAgent, HISTORY_LIMIT, SUGGESTION_SOURCE_LIMIT};
pub use directory::{AgentDirectory, AgentHandle};
