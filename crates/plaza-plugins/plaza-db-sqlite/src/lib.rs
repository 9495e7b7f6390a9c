//! # plaza-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational
//! model and the `plaza-core` domain models. One pooled store backs all
//! three persistence ports (users, board, policies).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use plaza_core::models::{Comment, Policy, Post, PostSummary, User};
use plaza_core::traits::{BoardRepo, PolicyRepo, UserRepo};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

pub struct SqliteStore {
    pool: SqlitePool,
}

// UUIDs are stored as hyphenated TEXT. A row written by this store always
// parses back; the nil fallback only shows up on hand-edited data.
fn parse_uuid(text: &str) -> Uuid {
    Uuid::parse_str(text).unwrap_or_default()
}

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id            TEXT PRIMARY KEY,
        name          TEXT NOT NULL,
        login_id      TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        job           TEXT NOT NULL,
        created_at    TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS posts (
        id         TEXT PRIMARY KEY,
        title      TEXT NOT NULL,
        content    TEXT NOT NULL,
        user_name  TEXT NOT NULL,
        user_job   TEXT NOT NULL,
        file       TEXT,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS comments (
        id         TEXT PRIMARY KEY,
        post_id    TEXT NOT NULL,
        body       TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_comments_post ON comments (post_id)",
    "CREATE TABLE IF NOT EXISTS policies (
        region      TEXT NOT NULL,
        field       TEXT NOT NULL,
        policy_name TEXT NOT NULL,
        description TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_policies_region_field ON policies (region, field)",
];

impl SqliteStore {
    /// Connects a pool and creates the schema idempotently.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePool::connect(url).await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }
        tracing::debug!(%url, "schema ensured");
        Ok(Self { pool })
    }

    /// Bulk-loads policy reference rows. Used by `cmd/seed` and tests.
    pub async fn seed_policies(&self, policies: &[Policy]) -> anyhow::Result<u64> {
        let mut tx = self.pool.begin().await?;
        for policy in policies {
            sqlx::query(
                "INSERT INTO policies (region, field, policy_name, description) VALUES (?, ?, ?, ?)",
            )
            .bind(&policy.region)
            .bind(&policy.field)
            .bind(&policy.policy_name)
            .bind(&policy.description)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(policies.len() as u64)
    }
}

#[async_trait]
impl UserRepo for SqliteStore {
    async fn create_user(&self, user: User) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO users (id, name, login_id, password_hash, job, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(user.name)
        .bind(user.login_id)
        .bind(user.password_hash)
        .bind(user.job)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_login_id(&self, login_id: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE login_id = ?")
            .bind(login_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| User {
            id: parse_uuid(&row.get::<String, _>("id")),
            name: row.get("name"),
            login_id: row.get("login_id"),
            password_hash: row.get("password_hash"),
            job: row.get("job"),
            created_at: row.get::<DateTime<Utc>, _>("created_at"),
        }))
    }
}

#[async_trait]
impl BoardRepo for SqliteStore {
    async fn create_post(&self, post: Post) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO posts (id, title, content, user_name, user_job, file, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(post.id.to_string())
        .bind(post.title)
        .bind(post.content)
        .bind(post.user_name)
        .bind(post.user_job)
        .bind(post.file)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_posts(&self) -> anyhow::Result<Vec<PostSummary>> {
        let rows = sqlx::query(
            "SELECT id, title, user_name, user_job, created_at FROM posts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| PostSummary {
                id: parse_uuid(&row.get::<String, _>("id")),
                title: row.get("title"),
                user_name: row.get("user_name"),
                user_job: row.get("user_job"),
                created_at: row.get::<DateTime<Utc>, _>("created_at"),
            })
            .collect())
    }

    async fn get_post(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query("SELECT * FROM posts WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Post {
            id: parse_uuid(&row.get::<String, _>("id")),
            title: row.get("title"),
            content: row.get("content"),
            user_name: row.get("user_name"),
            user_job: row.get("user_job"),
            file: row.get("file"),
            created_at: row.get::<DateTime<Utc>, _>("created_at"),
        }))
    }

    /// Removes a post and its comments atomically.
    ///
    /// # Developer Note
    /// A transaction keeps us from stranding orphaned comments if the
    /// second delete fails.
    async fn delete_post(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE post_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_comment(&self, comment: Comment) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;

        let post_exists = sqlx::query("SELECT 1 FROM posts WHERE id = ?")
            .bind(comment.post_id.to_string())
            .fetch_optional(&mut *tx)
            .await?
            .is_some();

        if !post_exists {
            return Ok(false);
        }

        sqlx::query("INSERT INTO comments (id, post_id, body, created_at) VALUES (?, ?, ?, ?)")
            .bind(comment.id.to_string())
            .bind(comment.post_id.to_string())
            .bind(comment.body)
            .bind(comment.created_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn list_comments(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>> {
        // id is a v7 UUID, so it breaks created_at ties in insertion order.
        let rows = sqlx::query(
            "SELECT * FROM comments WHERE post_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(post_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Comment {
                id: parse_uuid(&row.get::<String, _>("id")),
                post_id: parse_uuid(&row.get::<String, _>("post_id")),
                body: row.get("body"),
                created_at: row.get::<DateTime<Utc>, _>("created_at"),
            })
            .collect())
    }

    async fn delete_comment(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PolicyRepo for SqliteStore {
    async fn list_policy_names(&self, region: &str, field: &str) -> anyhow::Result<Vec<String>> {
        let rows = sqlx::query("SELECT policy_name FROM policies WHERE region = ? AND field = ?")
            .bind(region)
            .bind(field)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.get("policy_name")).collect())
    }

    async fn find_description(&self, policy_name: &str) -> anyhow::Result<Option<String>> {
        let row = sqlx::query("SELECT description FROM policies WHERE policy_name = ?")
            .bind(policy_name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get("description")))
    }
}
