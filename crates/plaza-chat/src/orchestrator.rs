//! Fallback orchestrator: routes one inbound chat message through the
//! primary dialogue backend, then the secondary, then a fixed apology.
//!
//! The chain always terminates in at least one reply. Backend failures are
//! logged here and never reach the caller.

use std::sync::Arc;
use std::time::Duration;

use plaza_core::traits::DialogueService;
use tokio::time::timeout;
use uuid::Uuid;

/// Emitted when both backends fail. Must reach the client verbatim.
pub const FALLBACK_REPLY: &str =
    "Something went wrong on our end. Please try again in a moment.";

#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Fixed sender identity forwarded to the backends.
    pub sender: String,
    /// Bounded wait on the primary backend.
    pub primary_timeout: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            sender: "plaza-web".to_string(),
            primary_timeout: Duration::from_secs(10),
        }
    }
}

/// Which link of the chain produced the turn's replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedBy {
    Primary,
    Secondary,
    Fallback,
}

/// The outcome of one inbound message: ordered replies, never empty.
#[derive(Debug, Clone)]
pub struct Turn {
    pub replies: Vec<String>,
    pub resolved_by: ResolvedBy,
}

pub struct FallbackOrchestrator {
    primary: Arc<dyn DialogueService>,
    secondary: Arc<dyn DialogueService>,
    settings: OrchestratorSettings,
}

impl FallbackOrchestrator {
    pub fn new(
        primary: Arc<dyn DialogueService>,
        secondary: Arc<dyn DialogueService>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            primary,
            secondary,
            settings,
        }
    }

    /// Resolve one turn. Infallible: every path ends in at least one reply.
    ///
    /// Each message is independent: no conversation memory, no retries
    /// within a backend, no circuit breaking across turns.
    pub async fn handle(&self, session: Uuid, text: &str) -> Turn {
        let bound = self.settings.primary_timeout;
        match timeout(bound, self.primary.converse(&self.settings.sender, text)).await {
            Ok(Ok(replies)) if !replies.is_empty() => {
                tracing::info!(%session, fragments = replies.len(), "turn resolved by primary");
                return Turn {
                    replies,
                    resolved_by: ResolvedBy::Primary,
                };
            }
            Ok(Ok(_)) => {
                tracing::warn!(%session, "primary dialogue service returned no replies");
            }
            Ok(Err(err)) => {
                tracing::warn!(%session, error = %err, "primary dialogue service failed");
            }
            Err(_) => {
                tracing::warn!(%session, timeout = ?bound, "primary dialogue service timed out");
            }
        }

        match self.secondary.converse(&self.settings.sender, text).await {
            Ok(replies) if !replies.is_empty() => {
                tracing::info!(%session, "turn resolved by secondary");
                Turn {
                    replies,
                    resolved_by: ResolvedBy::Secondary,
                }
            }
            Ok(_) => {
                tracing::error!(%session, "secondary dialogue service returned no candidates");
                Turn {
                    replies: vec![FALLBACK_REPLY.to_string()],
                    resolved_by: ResolvedBy::Fallback,
                }
            }
            Err(err) => {
                tracing::error!(%session, error = %err, "secondary dialogue service failed");
                Turn {
                    replies: vec![FALLBACK_REPLY.to_string()],
                    resolved_by: ResolvedBy::Fallback,
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
