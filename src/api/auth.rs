//! Auth Endpoints

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{RegisterRequest, TokenRequest, TokenResponse};

/// `POST /auth/token` (form-encoded)
pub async fn fetch_token(client: &ApiClient, username: &str, password: &str) -> ApiResult<TokenResponse> {
    client
        .post_form("/auth/token", &TokenRequest { username, password })
        .await?
        .json()
}

/// `POST /auth/register`
pub async fn register_user(client: &ApiClient, request: &RegisterRequest<'_>) -> ApiResult<()> {
    client.post_json("/auth/register", request).await?;
    Ok(())
}

/// `GET /auth/verify`; any success means the stored credential is valid
pub async fn verify_token(client: &ApiClient) -> ApiResult<()> {
    client.send(super::Method::Get, "/auth/verify", super::Body::Empty).await?;
    Ok(())
}
