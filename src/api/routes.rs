//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    add_domain_handler, domain_details_handler, domain_list_handler,
    verified_domain_list_handler, verify_domain_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST /domains`               - Attach a custom domain
/// - `GET  /domains/all`           - List the caller's domains
/// - `GET  /domains/all/verified`  - List the caller's verified domains
/// - `GET  /domains/{id}`          - Full record of one domain
/// - `GET  /domains/{id}/verify`   - Verify ownership and activate
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/domains", post(add_domain_handler))
        .route("/domains/all", get(domain_list_handler))
        .route("/domains/all/verified", get(verified_domain_list_handler))
        .route("/domains/{id}", get(domain_details_handler))
        .route("/domains/{id}/verify", get(verify_domain_handler))
}
