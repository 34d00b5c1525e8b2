//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data
//! access operations following the Repository pattern. These traits are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`DomainRepository`] - Custom domain records
//! - [`AccountRepository`] - Account plan lookups
//! - [`TokenRepository`] - API token authentication

pub mod account_repository;
pub mod domain_repository;
pub mod token_repository;

pub use account_repository::AccountRepository;
pub use domain_repository::DomainRepository;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use domain_repository::MockDomainRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
