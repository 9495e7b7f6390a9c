//! # plaza-chat
//!
//! The conversational relay: one inbound message in, exactly one resolved
//! turn out, no matter how the external dialogue services behave.

pub mod orchestrator;

pub use orchestrator::{FallbackOrchestrator, OrchestratorSettings, ResolvedBy, Turn, FALLBACK_REPLY};
