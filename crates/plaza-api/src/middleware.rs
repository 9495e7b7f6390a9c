//! plaza/crates/plaza-api/src/middleware.rs Middleware
//!
//! Access logging and CORS for the Plaza API.

use actix_cors::Cors;
use actix_web::middleware::Logger;

// Returns the standard access-log middleware:
// remote-ip "request-line" status-code response-size "referrer" "user-agent"
pub fn standard_middleware() -> Logger {
    Logger::default()
}

// Configures CORS (Cross-Origin Resource Sharing).
// The front-end is served from a separate origin, so the API stays open to
// any origin for the methods it actually exposes.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "DELETE"])
        .allow_any_header()
        .max_age(3600)
}
