//! Domain entity representing a customer-attached hostname.

use chrono::{DateTime, Utc};

/// The DNS record an owner must publish to prove control of a hostname.
///
/// `name` is the leftmost label of the hostname; `value` is the service-wide
/// CNAME target configured at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnameRecord {
    pub name: String,
    pub value: String,
}

impl CnameRecord {
    /// Derives the record an owner has to publish for `hostname`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let record = CnameRecord::for_hostname("shop.example.com", "edge.linkly.app");
    /// assert_eq!(record.name, "shop");
    /// assert_eq!(record.value, "edge.linkly.app");
    /// ```
    pub fn for_hostname(hostname: &str, target: &str) -> Self {
        let name = hostname.split('.').next().unwrap_or(hostname).to_string();
        Self {
            name,
            value: target.to_string(),
        }
    }
}

/// A custom domain attached to an account.
///
/// `hostname` and `owner_id` are immutable after creation. `is_verified`
/// starts false and only ever flips to true — the store never reverts it.
#[derive(Debug, Clone)]
pub struct Domain {
    pub id: i64,
    pub hostname: String,
    pub owner_id: i64,
    pub cname: CnameRecord,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for registering a new domain.
///
/// New domains always start unverified.
#[derive(Debug, Clone)]
pub struct NewDomain {
    pub hostname: String,
    pub owner_id: i64,
    pub cname: CnameRecord,
}
