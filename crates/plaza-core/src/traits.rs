//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use crate::models::{Comment, Post, PostSummary, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Account persistence contract.
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Fails on a duplicate login id (unique constraint).
    async fn create_user(&self, user: User) -> anyhow::Result<()>;
    async fn find_by_login_id(&self, login_id: &str) -> anyhow::Result<Option<User>>;
}

/// Data persistence contract for posts and their comments.
#[async_trait]
pub trait BoardRepo: Send + Sync {
    // Post Operations
    async fn create_post(&self, post: Post) -> anyhow::Result<()>;
    async fn list_posts(&self) -> anyhow::Result<Vec<PostSummary>>;
    async fn get_post(&self, id: Uuid) -> anyhow::Result<Option<Post>>;
    /// Returns false when no post with that id existed. Removes the post's
    /// comments in the same transaction.
    async fn delete_post(&self, id: Uuid) -> anyhow::Result<bool>;

    // Comment Operations
    /// Returns false when the target post does not exist.
    async fn add_comment(&self, comment: Comment) -> anyhow::Result<bool>;
    /// Comments in insertion order, oldest first.
    async fn list_comments(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>>;
    async fn delete_comment(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Read-only lookup contract for regional policy reference data.
#[async_trait]
pub trait PolicyRepo: Send + Sync {
    async fn list_policy_names(&self, region: &str, field: &str) -> anyhow::Result<Vec<String>>;
    async fn find_description(&self, policy_name: &str) -> anyhow::Result<Option<String>>;
}

/// Upload storage contract.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Saves raw bytes and returns the stored filename for the Post model.
    /// The stored name is generated (not derived from wall-clock time), so
    /// two uploads with the same original name never collide.
    async fn store(&self, original_name: &str, data: Vec<u8>) -> anyhow::Result<String>;
    /// Public URL under which the stored file is served.
    fn public_url(&self, stored_name: &str) -> String;
}

/// Credential hashing contract.
pub trait CredentialHasher: Send + Sync {
    fn hash_password(&self, password: &str) -> anyhow::Result<String>;
    /// Constant-time verification of a password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> bool;
}

/// One conversational backend (the rules-based webhook or the LLM service).
///
/// Returns the ordered reply fragments for a single inbound message.
/// `Ok(vec![])` means the service answered but produced nothing usable;
/// the orchestrator treats that the same as an error.
#[async_trait]
pub trait DialogueService: Send + Sync {
    async fn converse(&self, sender: &str, message: &str) -> anyhow::Result<Vec<String>>;
}
