//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Caller identity resolved from the presented API token.
///
/// Inserted into request extensions by [`layer`]; handlers extract it with
/// `Extension<CurrentAccount>`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentAccount(pub i64);

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Resolve the token hash to an account via the database
/// 3. Update `last_used_at` timestamp
/// 4. Insert [`CurrentAccount`] and continue to the handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is not found or revoked
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let mut req = Request::from_parts(parts, body);

    let account_id = st.auth_service.authenticate(&token).await?;
    req.extensions_mut().insert(CurrentAccount(account_id));

    Ok(next.run(req).await)
}
