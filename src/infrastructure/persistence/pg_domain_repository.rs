//! PostgreSQL implementation of the domain repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{CnameRecord, Domain, NewDomain};
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for custom domain records.
///
/// Relies on the `domains_owner_hostname_key` unique constraint as the race
/// backstop for duplicate registrations; the unique violation surfaces as
/// [`AppError::DuplicateDomain`].
pub struct PgDomainRepository {
    pool: Arc<PgPool>,
}

impl PgDomainRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DomainRow {
    id: i64,
    owner_id: i64,
    hostname: String,
    cname_name: String,
    cname_value: String,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DomainRow> for Domain {
    fn from(row: DomainRow) -> Self {
        Domain {
            id: row.id,
            hostname: row.hostname,
            owner_id: row.owner_id,
            cname: CnameRecord {
                name: row.cname_name,
                value: row.cname_value,
            },
            is_verified: row.is_verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const DOMAIN_COLUMNS: &str =
    "id, owner_id, hostname, cname_name, cname_value, is_verified, created_at, updated_at";

#[async_trait]
impl DomainRepository for PgDomainRepository {
    async fn create(&self, new_domain: NewDomain) -> Result<Domain, AppError> {
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            r#"
            INSERT INTO domains (owner_id, hostname, cname_name, cname_value)
            VALUES ($1, $2, $3, $4)
            RETURNING {DOMAIN_COLUMNS}
            "#
        ))
        .bind(new_domain.owner_id)
        .bind(&new_domain.hostname)
        .bind(&new_domain.cname.name)
        .bind(&new_domain.cname.value)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Domain>, AppError> {
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            "SELECT {DOMAIN_COLUMNS} FROM domains WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_hostname(
        &self,
        owner_id: i64,
        hostname: &str,
    ) -> Result<Option<Domain>, AppError> {
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            "SELECT {DOMAIN_COLUMNS} FROM domains WHERE owner_id = $1 AND hostname = $2"
        ))
        .bind(owner_id)
        .bind(hostname)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn count_by_owner(&self, owner_id: i64) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM domains WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Domain>, AppError> {
        let rows = sqlx::query_as::<_, DomainRow>(&format!(
            "SELECT {DOMAIN_COLUMNS} FROM domains WHERE owner_id = $1 ORDER BY created_at"
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_verified_by_owner(&self, owner_id: i64) -> Result<Vec<Domain>, AppError> {
        let rows = sqlx::query_as::<_, DomainRow>(&format!(
            r#"
            SELECT {DOMAIN_COLUMNS} FROM domains
            WHERE owner_id = $1 AND is_verified = TRUE
            ORDER BY created_at
            "#
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn mark_verified(&self, id: i64) -> Result<Domain, AppError> {
        // Only ever sets the flag to true; there is no reverse operation.
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            r#"
            UPDATE domains
            SET is_verified = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING {DOMAIN_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::not_found("Domain not found", json!({"id": id})))
    }
}
