//! # Plaza Binary
//!
//! The entry point that assembles the application based on compile-time features.

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use plaza_api::state::AppState;
use plaza_api::ws::SessionRegistry;
use plaza_api::{configure_routes, middleware};
use plaza_chat::{FallbackOrchestrator, OrchestratorSettings};
use plaza_config::AppConfig;
use std::sync::Arc;
use std::time::Duration;

// Feature-gated imports: swap any adapter without touching the rest
#[cfg(feature = "db-sqlite")]
use plaza_db_sqlite::SqliteStore;

#[cfg(feature = "storage-local")]
use plaza_storage_local::LocalFileStore;

#[cfg(feature = "auth-argon2")]
use plaza_auth_argon2::Argon2Hasher;

#[cfg(feature = "bot-webhook")]
use plaza_bot_webhook::WebhookDialogue;

#[cfg(feature = "bot-llm")]
use plaza_bot_llm::LlmDialogue;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cfg = AppConfig::load()?;

    // 1. Persistence
    #[cfg(feature = "db-sqlite")]
    let store = Arc::new(SqliteStore::new(&cfg.database.url).await?);

    // 2. Upload storage; the directory must exist before actix-files mounts it
    tokio::fs::create_dir_all(&cfg.uploads.dir).await?;
    #[cfg(feature = "storage-local")]
    let files = Arc::new(LocalFileStore::new(
        cfg.uploads.dir.clone().into(),
        cfg.uploads.public_prefix.clone(),
    ));

    // 3. Credential hashing
    #[cfg(feature = "auth-argon2")]
    let hasher = Arc::new(Argon2Hasher::new());

    // 4. Dialogue backends and the fallback chain
    #[cfg(feature = "bot-webhook")]
    let primary = Arc::new(WebhookDialogue::new(cfg.chat.webhook.url.clone()));

    #[cfg(feature = "bot-llm")]
    let secondary = {
        let mut llm = LlmDialogue::new(
            cfg.chat.llm.endpoint.clone(),
            cfg.chat.llm.api_key.clone(),
            cfg.chat.llm.model.clone(),
            cfg.chat.llm.max_tokens,
        );
        if let Some(prompt) = cfg.chat.llm.system_prompt.clone() {
            llm = llm.with_system_prompt(prompt);
        }
        Arc::new(llm)
    };

    let orchestrator = Arc::new(FallbackOrchestrator::new(
        primary,
        secondary,
        OrchestratorSettings {
            sender: cfg.chat.sender.clone(),
            primary_timeout: Duration::from_secs(cfg.chat.primary_timeout_secs),
        },
    ));

    // 5. Wrap in AppState (dynamic dispatch so tests can swap any port)
    let state = web::Data::new(AppState {
        users: store.clone(),
        board: store.clone(),
        policies: store,
        files,
        hasher,
        chat: orchestrator,
        sessions: SessionRegistry::new(),
    });

    tracing::info!(host = %cfg.server.host, port = cfg.server.port, "plaza starting");

    let upload_dir = cfg.uploads.dir.clone();
    let upload_prefix = cfg.uploads.public_prefix.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy())
            .configure(configure_routes)
            .service(Files::new(&upload_prefix, &upload_dir))
    })
    .bind((cfg.server.host.as_str(), cfg.server.port))?
    .run()
    .await?;

    Ok(())
}
