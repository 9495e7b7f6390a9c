//! State shared across all Actix-web workers.

use crate::ws::SessionRegistry;
use plaza_chat::FallbackOrchestrator;
use plaza_core::traits::{BoardRepo, CredentialHasher, FileStore, PolicyRepo, UserRepo};
use std::sync::Arc;

/// Dynamic dispatch at every port, so the binary and the tests can wire in
/// different adapters. One store typically backs all three persistence
/// ports.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub board: Arc<dyn BoardRepo>,
    pub policies: Arc<dyn PolicyRepo>,
    pub files: Arc<dyn FileStore>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub chat: Arc<FallbackOrchestrator>,
    pub sessions: SessionRegistry,
}
