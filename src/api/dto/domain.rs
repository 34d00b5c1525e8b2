//! DTOs for custom domain endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for hostname characters; the service applies the full
/// structural checks on top.
static HOSTNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.-]+$").unwrap());

/// Request to attach a custom domain.
#[derive(Debug, Deserialize, Validate)]
pub struct AddDomainRequest {
    /// Bare hostname without scheme or path (e.g. `shop.example.com`).
    #[validate(length(min = 1, max = 253))]
    #[validate(regex(path = "*HOSTNAME_REGEX"))]
    pub hostname: String,
}

/// The CNAME record the owner must publish.
#[derive(Debug, Serialize)]
pub struct CnameRecordDto {
    pub name: String,
    pub value: String,
}

/// Full domain record.
#[derive(Debug, Serialize)]
pub struct DomainDetails {
    pub id: i64,
    pub hostname: String,
    pub cname_record: CnameRecordDto,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response to a successful registration: the stored record, the record to
/// publish, and human-readable instructions.
#[derive(Debug, Serialize)]
pub struct AddDomainResponse {
    pub domain: DomainDetails,
    pub cname_record: CnameRecordDto,
    pub instructions: String,
}

/// Result of one verification attempt.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub is_verified: bool,
    pub message: String,
}

/// Projection for domain listings.
#[derive(Debug, Serialize)]
pub struct DomainItem {
    pub id: i64,
    pub hostname: String,
    pub is_verified: bool,
}

/// Response containing list of domains.
#[derive(Debug, Serialize)]
pub struct DomainListResponse {
    pub items: Vec<DomainItem>,
}
