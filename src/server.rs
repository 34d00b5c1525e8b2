//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, service wiring, and the Axum
//! server lifecycle.

use crate::application::services::{AuthService, DomainService};
use crate::config::Config;
use crate::infrastructure::dns::HickoryCnameResolver;
use crate::infrastructure::persistence::{
    PgAccountRepository, PgDomainRepository, PgTokenRepository,
};
use crate::infrastructure::provision::ScriptProvisioner;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - System DNS resolver and the script provisioner
/// - Repository and service wiring
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The system resolver configuration cannot be read
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let resolver = HickoryCnameResolver::from_system_conf(Duration::from_secs(
        config.provisioning.dns_lookup_timeout,
    ))?;
    let provisioner = ScriptProvisioner::new(&config.provisioning);

    let pool = Arc::new(pool);
    let domain_repository = Arc::new(PgDomainRepository::new(pool.clone()));
    let account_repository = Arc::new(PgAccountRepository::new(pool.clone()));
    let token_repository = Arc::new(PgTokenRepository::new(pool.clone()));

    let domain_service = Arc::new(DomainService::new(
        domain_repository,
        account_repository,
        Arc::new(resolver),
        Arc::new(provisioner),
        &config.provisioning,
    ));
    let auth_service = Arc::new(AuthService::new(
        token_repository,
        config.token_signing_secret.clone(),
    ));

    let state = AppState {
        domain_service,
        auth_service,
        db: pool,
    };

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
