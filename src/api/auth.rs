//! Current-user resolution from the request's bearer token.

use anyhow::Result;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use sea_orm::DatabaseConnection;

use super::{ApiError, AppState};
use crate::entities::user;
use crate::services::UserService;

/// The authenticated user for the request being handled.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub user::Model);

/// Resolve the `Authorization: Bearer <token>` header to a user, if any.
pub async fn resolve_bearer_user(
    conn: &DatabaseConnection,
    headers: &HeaderMap,
) -> Result<Option<user::Model>> {
    let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        return Ok(None);
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return Ok(None);
    };

    UserService::find_by_token(conn, token.trim()).await
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = resolve_bearer_user(&state.db, &parts.headers)
            .await
            .map_err(ApiError::Internal)?;

        match user {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                log::error!("Unknown user tried {} {}", parts.method, parts.uri.path());
                Err(ApiError::Unauthorized)
            }
        }
    }
}
