//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgDomainRepository`] - Custom domain records
//! - [`PgAccountRepository`] - Account plan lookups
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_account_repository;
pub mod pg_domain_repository;
pub mod pg_token_repository;

pub use pg_account_repository::PgAccountRepository;
pub use pg_domain_repository::PgDomainRepository;
pub use pg_token_repository::PgTokenRepository;
