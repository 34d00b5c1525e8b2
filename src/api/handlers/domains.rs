//! Handlers for custom domain endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::domain::{
    AddDomainRequest, AddDomainResponse, CnameRecordDto, DomainDetails, DomainItem,
    DomainListResponse, VerifyResponse,
};
use crate::api::middleware::auth::CurrentAccount;
use crate::application::services::VerificationOutcome;
use crate::domain::entities::Domain;
use crate::error::AppError;
use crate::state::AppState;

fn domain_to_details(d: Domain) -> DomainDetails {
    DomainDetails {
        id: d.id,
        hostname: d.hostname,
        cname_record: CnameRecordDto {
            name: d.cname.name,
            value: d.cname.value,
        },
        is_verified: d.is_verified,
        created_at: d.created_at,
        updated_at: d.updated_at,
    }
}

fn domain_to_item(d: Domain) -> DomainItem {
    DomainItem {
        id: d.id,
        hostname: d.hostname,
        is_verified: d.is_verified,
    }
}

/// Attaches a custom domain to the caller's account.
///
/// # Endpoint
///
/// `POST /api/domains`
///
/// # Errors
///
/// Returns 400 if the hostname is invalid, the plan quota is reached, or the
/// domain was already added.
pub async fn add_domain_handler(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    Json(payload): Json<AddDomainRequest>,
) -> Result<(StatusCode, Json<AddDomainResponse>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::bad_request("Invalid hostname", json!({"errors": e.to_string()})))?;

    let registration = state
        .domain_service
        .add_domain(account.0, payload.hostname)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddDomainResponse {
            domain: domain_to_details(registration.domain),
            cname_record: CnameRecordDto {
                name: registration.cname.name,
                value: registration.cname.value,
            },
            instructions: registration.instructions,
        }),
    ))
}

/// Verifies domain ownership via DNS and activates the domain.
///
/// # Endpoint
///
/// `GET /api/domains/{id}/verify`
///
/// Already-verified domains return success without re-checking. A 400 with
/// `is_verified: false` means the CNAME target was not found yet — the owner
/// retries after their DNS propagates.
///
/// # Errors
///
/// Returns 404/403 on the ownership guards, 500 when resolution or
/// provisioning fails.
pub async fn verify_domain_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
) -> Result<(StatusCode, Json<VerifyResponse>), AppError> {
    let outcome = state.domain_service.verify_ownership(account.0, id).await?;

    let (status, message) = match outcome {
        VerificationOutcome::AlreadyVerified => {
            (StatusCode::OK, "Domain ownership already verified")
        }
        VerificationOutcome::Verified => {
            (StatusCode::OK, "Domain ownership verified successfully")
        }
        VerificationOutcome::Pending => (
            StatusCode::BAD_REQUEST,
            "CNAME target not found, DNS changes may still be propagating... try again later",
        ),
    };

    Ok((
        status,
        Json(VerifyResponse {
            is_verified: outcome.is_verified(),
            message: message.to_string(),
        }),
    ))
}

/// Returns the full record of one domain.
///
/// # Endpoint
///
/// `GET /api/domains/{id}`
///
/// # Errors
///
/// Returns 404 if the domain does not exist, 403 if the caller does not own it.
pub async fn domain_details_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
) -> Result<Json<DomainDetails>, AppError> {
    let domain = state.domain_service.get_domain(account.0, id).await?;

    Ok(Json(domain_to_details(domain)))
}

/// Lists all domains owned by the caller.
///
/// # Endpoint
///
/// `GET /api/domains/all`
pub async fn domain_list_handler(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
) -> Result<Json<DomainListResponse>, AppError> {
    let domains = state.domain_service.list_domains(account.0).await?;

    Ok(Json(DomainListResponse {
        items: domains.into_iter().map(domain_to_item).collect(),
    }))
}

/// Lists the caller's verified domains.
///
/// # Endpoint
///
/// `GET /api/domains/all/verified`
pub async fn verified_domain_list_handler(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
) -> Result<Json<DomainListResponse>, AppError> {
    let domains = state.domain_service.list_verified_domains(account.0).await?;

    Ok(Json(DomainListResponse {
        items: domains.into_iter().map(domain_to_item).collect(),
    }))
}
