//! HTTP request handlers for API endpoints.

pub mod domains;
pub mod health;

pub use domains::{
    add_domain_handler, domain_details_handler, domain_list_handler, verified_domain_list_handler,
    verify_domain_handler,
};
pub use health::health_handler;
