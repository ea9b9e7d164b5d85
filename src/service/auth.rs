use crate::auth::jwt;
use crate::error::ApiError;
use crate::models::members::{LoginRequest, LoginResponse};
use crate::store::Store;

/// Authenticate a member by email and credential secret.
///
/// Secrets are compared verbatim against the stored record (parity with the
/// original data files). Success returns the sanitized member plus a bearer
/// token for mutating calls; any mismatch is a uniform AuthError.
pub async fn login(
    store: &Store,
    secret: &str,
    credentials: LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let member = store
        .list_members()
        .await?
        .into_iter()
        .find(|m| m.email == credentials.email && m.password == credentials.password)
        .ok_or(ApiError::Auth)?;

    let token = jwt::issue_token(&member, secret)
        .map_err(|e| ApiError::Internal(format!("token encoding failed: {e}")))?;

    Ok(LoginResponse {
        user: member.into(),
        token,
    })
}
