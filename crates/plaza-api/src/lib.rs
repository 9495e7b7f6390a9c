//! # plaza-api
//!
//! The web routing and orchestration layer for Plaza.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod ws;

use actix_web::web;

/// Configures the routes for the board, policy lookup, auth, and chat relay.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the API under different paths if needed.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup", web::post().to(handlers::signup))
        .route("/login", web::post().to(handlers::login))
        .route("/ws", web::get().to(ws::chat_route))
        .service(
            web::scope("/api")
                .route("/submit-post", web::post().to(handlers::submit_post))
                .route("/posts", web::get().to(handlers::list_posts))
                .route("/posts/comment", web::post().to(handlers::add_comment))
                .service(
                    web::resource("/posts/{id}")
                        .route(web::get().to(handlers::get_post))
                        .route(web::delete().to(handlers::delete_post)),
                )
                .route(
                    "/posts/{id}/comments",
                    web::get().to(handlers::list_post_comments),
                )
                .route("/comments/{id}", web::delete().to(handlers::delete_comment))
                .route(
                    "/policies/{region}/{field}",
                    web::get().to(handlers::list_policies),
                )
                .route(
                    "/policy-description/{policy_name}",
                    web::get().to(handlers::policy_description),
                )
                .route("/socket-status", web::get().to(handlers::socket_status)),
        );
}
