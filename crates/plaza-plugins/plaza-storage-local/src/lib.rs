//! # plaza-storage-local
//! Local filesystem implementation of `FileStore`.
//!
//! Stored names are generated UUIDs plus the sanitized original extension,
//! so identical original names never collide regardless of arrival time.

use async_trait::async_trait;
use plaza_core::traits::FileStore;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

pub struct LocalFileStore {
    /// Root directory for all uploads (e.g., "./uploads")
    root_path: PathBuf,
    /// Public URL prefix (e.g., "/uploads")
    url_prefix: String,
}

impl LocalFileStore {
    pub fn new(root: PathBuf, url_prefix: String) -> Self {
        Self {
            root_path: root,
            url_prefix,
        }
    }

    /// Keeps a short alphanumeric extension from the original name, lowercased.
    /// Anything else is dropped rather than written to disk.
    fn sanitized_extension(original_name: &str) -> Option<String> {
        let ext = Path::new(original_name).extension()?.to_str()?;
        if ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some(ext.to_ascii_lowercase())
        } else {
            None
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, original_name: &str, data: Vec<u8>) -> anyhow::Result<String> {
        let stored_name = match Self::sanitized_extension(original_name) {
            Some(ext) => format!("{}.{}", Uuid::new_v4().simple(), ext),
            None => Uuid::new_v4().simple().to_string(),
        };

        fs::create_dir_all(&self.root_path).await?;

        let target_path = self.root_path.join(&stored_name);
        fs::write(&target_path, &data).await?;

        tracing::debug!(original = original_name, stored = %stored_name, bytes = data.len(), "upload stored");
        Ok(stored_name)
    }

    fn public_url(&self, stored_name: &str) -> String {
        format!("{}/{}", self.url_prefix, stored_name)
    }
}
