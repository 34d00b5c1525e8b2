//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, DomainService};
use crate::infrastructure::persistence::{
    PgAccountRepository, PgDomainRepository, PgTokenRepository,
};

/// State shared across all request handlers.
///
/// Services are `Arc`'d so the state clones cheaply per request. The raw
/// pool is kept for the health check.
#[derive(Clone)]
pub struct AppState {
    pub domain_service: Arc<DomainService<PgDomainRepository, PgAccountRepository>>,
    pub auth_service: Arc<AuthService<PgTokenRepository>>,
    pub db: Arc<PgPool>,
}
