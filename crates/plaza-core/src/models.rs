//! # Domain Models
//!
//! These structs represent the core entities of Plaza.
//! We use UUID v7 for time-ordered, globally unique identification.
//! Serde renames keep the wire format the front-end already speaks
//! (`userName`, `userId`, `createdAt`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account. Created at signup; never updated or deleted.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    #[serde(rename = "userName")]
    pub name: String,
    /// The identifier used for login, unique across accounts.
    #[serde(rename = "userId")]
    pub login_id: String,
    /// Argon2 PHC string. Never leaves the process.
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(rename = "userJob")]
    pub job: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A bulletin-board entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub user_name: String,
    pub user_job: String,
    /// Stored filename of the optional attachment, as returned by the
    /// `FileStore`. The file content itself never touches the database.
    pub file: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The listing projection of a post (no content, no attachment).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub user_name: String,
    pub user_job: String,
    pub created_at: DateTime<Utc>,
}

/// A comment on a post. Comments are a real child entity with identity and
/// ordering, keyed by post id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            post_id,
            body: body.into(),
            created_at: Utc::now(),
        }
    }
}

/// Regional youth-policy reference data. Read-only at runtime; loaded by
/// `cmd/seed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub region: String,
    pub field: String,
    pub policy_name: String,
    pub description: String,
}
