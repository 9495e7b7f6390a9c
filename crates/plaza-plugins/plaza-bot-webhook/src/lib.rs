//! # plaza-bot-webhook
//!
//! `DialogueService` client for the rules-based dialogue engine's REST
//! webhook. One POST per turn: `{sender, message}` in, an ordered array of
//! reply objects out. Entries without text (images, buttons) are skipped.

use async_trait::async_trait;
use plaza_core::traits::DialogueService;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct WebhookRequest<'a> {
    sender: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct WebhookReply {
    text: Option<String>,
}

pub struct WebhookDialogue {
    http: reqwest::Client,
    url: String,
}

impl WebhookDialogue {
    pub fn new(url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl DialogueService for WebhookDialogue {
    async fn converse(&self, sender: &str, message: &str) -> anyhow::Result<Vec<String>> {
        let replies: Vec<WebhookReply> = self
            .http
            .post(&self.url)
            .json(&WebhookRequest { sender, message })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let fragments: Vec<String> = replies.into_iter().filter_map(|r| r.text).collect();
        tracing::debug!(fragments = fragments.len(), "webhook dialogue answered");
        Ok(fragments)
    }
}
