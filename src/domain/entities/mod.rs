//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Domain`] - A custom domain attached to an account
//! - [`CnameRecord`] - The DNS record proving ownership of a domain
//! - [`Account`] - The owning account (plan tier drives the quota)
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! `NewDomain` carries the fields the caller controls; ids and timestamps are
//! assigned by the store.

pub mod account;
pub mod domain;

pub use account::Account;
pub use domain::{CnameRecord, Domain, NewDomain};
