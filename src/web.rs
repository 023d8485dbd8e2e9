//! Entry pages: landing, about, contact and the error view.
//!
//! The session-oriented counterpart of the REST API. A request that
//! resolves to a known user is sent straight to their todo listing;
//! everything else renders small static pages.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect};
use uuid::Uuid;

use crate::api::auth::resolve_bearer_user;
use crate::api::{ApiError, AppState};

/// GET / — landing page, or a redirect into the todo listing for
/// authenticated users.
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(user) = resolve_bearer_user(&state.db, &headers)
        .await
        .map_err(ApiError::Internal)?
    {
        log::info!("Redirecting {} to their todo listing", user.email);
        return Ok(Redirect::to("/api/todoitems").into_response());
    }

    Ok(Html(
        "<h1>todolist</h1><p>A simple to-do list. Sign in to manage your tasks.</p>",
    )
    .into_response())
}

/// GET /about
pub async fn about() -> Html<&'static str> {
    Html("<h1>About</h1><p>Your application description page.</p>")
}

/// GET /contact
pub async fn contact() -> Html<&'static str> {
    Html("<h1>Contact</h1><p>Your contact page.</p>")
}

/// GET /error — error view carrying a request-correlation id.
pub async fn error_page(headers: HeaderMap) -> Html<String> {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Html(format!(
        "<h1>Error</h1><p>An error occurred while processing your request.</p><p>Request ID: {request_id}</p>"
    ))
}
