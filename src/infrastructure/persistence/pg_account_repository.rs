//! PostgreSQL implementation of the account repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Account;
use crate::domain::quota::PlanTier;
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for account lookups.
///
/// Plan tiers are stored as text and parsed into [`PlanTier`] here, so an
/// unrecognized tier string is caught at this boundary and reported as a
/// deployment defect rather than leaking into the quota policy.
pub struct PgAccountRepository {
    pool: Arc<PgPool>,
}

impl PgAccountRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn parse_plan(account_id: i64, plan: &str) -> Result<PlanTier, AppError> {
    plan.parse().map_err(|e| {
        AppError::internal(
            "Account has unrecognized plan tier",
            json!({"account_id": account_id, "plan": plan, "source": format!("{e}")}),
        )
    })
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_plan(&self, account_id: i64) -> Result<PlanTier, AppError> {
        let plan: Option<String> = sqlx::query_scalar("SELECT plan FROM accounts WHERE id = $1")
            .bind(account_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        let plan = plan.ok_or_else(|| {
            AppError::not_found("Account not found", json!({"account_id": account_id}))
        })?;

        parse_plan(account_id, &plan)
    }

    async fn create(&self, email: &str, plan: PlanTier) -> Result<Account, AppError> {
        let row: (i64, String, String, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO accounts (email, plan)
            VALUES ($1, $2)
            RETURNING id, email, plan, created_at
            "#,
        )
        .bind(email)
        .bind(plan.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Account {
            id: row.0,
            email: row.1,
            plan: parse_plan(row.0, &row.2)?,
            created_at: row.3,
        })
    }
}
