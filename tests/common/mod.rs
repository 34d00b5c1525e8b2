#![allow(dead_code)]

use async_trait::async_trait;
use axum::routing::{get, post};
use axum::{Extension, Router};
use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use linkly::api::handlers::{
    add_domain_handler, domain_details_handler, domain_list_handler,
    verified_domain_list_handler, verify_domain_handler,
};
use linkly::api::middleware::auth::CurrentAccount;
use linkly::application::services::{AuthService, DomainService};
use linkly::config::ProvisioningConfig;
use linkly::infrastructure::dns::{CnameResolver, ResolutionError};
use linkly::infrastructure::persistence::{
    PgAccountRepository, PgDomainRepository, PgTokenRepository,
};
use linkly::infrastructure::provision::{ProvisionError, Provisioner};
use linkly::state::AppState;

pub const CNAME_TARGET: &str = "edge.linkly.app";

pub fn provisioning_config() -> ProvisioningConfig {
    ProvisioningConfig {
        cname_target: CNAME_TARGET.to_string(),
        script_path: "/usr/local/bin/add-vhost.sh".into(),
        backend_service: "127.0.0.1:3000".to_string(),
        certbot_email: "ops@linkly.app".to_string(),
        dns_lookup_timeout: 5,
        provision_timeout: 180,
    }
}

/// Resolver returning canned answers, counting invocations.
pub struct StubResolver {
    answers: Vec<String>,
    fail: bool,
    pub calls: Arc<AtomicUsize>,
}

impl StubResolver {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            answers: Vec::new(),
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CnameResolver for StubResolver {
    async fn resolve_cname(&self, _hostname: &str) -> Result<Vec<String>, ResolutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ResolutionError::Lookup("stub resolver failure".to_string()))
        } else {
            Ok(self.answers.clone())
        }
    }
}

/// Provisioner recording every activation.
pub struct StubProvisioner {
    fail: bool,
    pub activations: Arc<Mutex<Vec<String>>>,
}

impl StubProvisioner {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            activations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            activations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn activated(&self) -> Vec<String> {
        self.activations.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provisioner for StubProvisioner {
    async fn activate(&self, hostname: &str) -> Result<(), ProvisionError> {
        self.activations.lock().unwrap().push(hostname.to_string());
        if self.fail {
            Err(ProvisionError::ScriptFailed {
                code: 1,
                stderr: "stub provisioner failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

pub async fn create_test_account(pool: &PgPool, email: &str, plan: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO accounts (email, plan) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(plan)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_domain(pool: &PgPool, owner_id: i64, hostname: &str) -> i64 {
    let cname_name = hostname.split('.').next().unwrap();
    sqlx::query_scalar(
        r#"
        INSERT INTO domains (owner_id, hostname, cname_name, cname_value)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(owner_id)
    .bind(hostname)
    .bind(cname_name)
    .bind(CNAME_TARGET)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_verified_domain(pool: &PgPool, owner_id: i64, hostname: &str) -> i64 {
    let id = create_test_domain(pool, owner_id, hostname).await;
    sqlx::query("UPDATE domains SET is_verified = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn domain_is_verified(pool: &PgPool, id: i64) -> bool {
    sqlx::query_scalar("SELECT is_verified FROM domains WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(
    pool: PgPool,
    resolver: Arc<dyn CnameResolver>,
    provisioner: Arc<dyn Provisioner>,
) -> AppState {
    let pool = Arc::new(pool);

    let domain_repo = Arc::new(PgDomainRepository::new(pool.clone()));
    let account_repo = Arc::new(PgAccountRepository::new(pool.clone()));
    let token_repo = Arc::new(PgTokenRepository::new(pool.clone()));

    let domain_service = Arc::new(DomainService::new(
        domain_repo,
        account_repo,
        resolver,
        provisioner,
        &provisioning_config(),
    ));
    let auth_service = Arc::new(AuthService::new(
        token_repo,
        "test-signing-secret".to_string(),
    ));

    AppState {
        domain_service,
        auth_service,
        db: pool,
    }
}

/// Builds a test server with the domain routes, bypassing Bearer auth by
/// injecting the caller identity directly.
pub fn make_server(state: AppState, account_id: i64) -> TestServer {
    let app = Router::new()
        .route("/api/domains", post(add_domain_handler))
        .route("/api/domains/all", get(domain_list_handler))
        .route("/api/domains/all/verified", get(verified_domain_list_handler))
        .route("/api/domains/{id}", get(domain_details_handler))
        .route("/api/domains/{id}/verify", get(verify_domain_handler))
        .layer(Extension(CurrentAccount(account_id)))
        .with_state(state);

    TestServer::new(app).unwrap()
}
