//! REST handlers for `/api/todoitems`.
//!
//! Handlers are thin shims: resolve the user, hand off to
//! [`TodoService`], translate the result into a status code.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use super::auth::CurrentUser;
use super::dto::TodoItemDto;
use super::{ApiError, AppState};
use crate::services::TodoService;
use crate::validation;

/// GET /api/todoitems — every item the user owns, complete first.
pub async fn get_all(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let mut items = TodoService::get_complete_items(&state.db, user.id).await?;
    items.extend(TodoService::get_incomplete_items(&state.db, user.id).await?);

    log::info!("Returned all items to {}", user.email);
    Ok(Json(items))
}

/// GET /api/todoitems/complete
pub async fn get_complete(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let items = TodoService::get_complete_items(&state.db, user.id).await?;

    log::info!("Returned all complete items to {}", user.email);
    Ok(Json(items))
}

/// GET /api/todoitems/incomplete
pub async fn get_incomplete(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let items = TodoService::get_incomplete_items(&state.db, user.id).await?;

    log::info!("Returned all incomplete items to {}", user.email);
    Ok(Json(items))
}

/// GET /api/todoitems/recent
pub async fn get_recent(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let items = TodoService::get_recently_added_items(&state.db, user.id).await?;

    log::info!("Returned recently added items to {}", user.email);
    Ok(Json(items))
}

/// GET /api/todoitems/bytag/{tag}
pub async fn get_by_tag(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let items = TodoService::get_items_by_tag(&state.db, user.id, &tag).await?;

    log::info!("Returned all items with tag {tag} to {}", user.email);
    Ok(Json(items))
}

/// GET /api/todoitems/{id}
pub async fn get_by_id(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(item) = TodoService::get_item(&state.db, id).await? else {
        log::error!("Item with id {id} not found");
        return Err(ApiError::NotFound);
    };

    log::info!("Returned item with id {id}");
    Ok(Json(item))
}

/// POST /api/todoitems
pub async fn create(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<TodoItemDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(dto) = payload.map_err(|rejection| {
        log::error!("Received unreadable item: {rejection}");
        ApiError::BadRequest
    })?;

    let errors = validation::validate_todo(&dto.title, dto.content.as_deref());
    if !errors.is_empty() {
        log::error!("Received invalid item from {}", user.email);
        return Err(ApiError::Validation(errors));
    }

    let item = dto.into_new_item(user.id);
    if !TodoService::add_item(&state.db, item.clone(), user.id).await? {
        return Err(ApiError::BadRequest);
    }

    log::info!("Created new item with id {}", item.id);
    let location = format!("/api/todoitems/{}", item.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(item),
    ))
}

/// PUT /api/todoitems/{id}
pub async fn update(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<TodoItemDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(dto) = payload.map_err(|rejection| {
        log::error!("Received unreadable item: {rejection}");
        ApiError::BadRequest
    })?;

    let errors = validation::validate_todo(&dto.title, dto.content.as_deref());
    if !errors.is_empty() {
        log::error!("Received invalid item from {}", user.email);
        return Err(ApiError::Validation(errors));
    }

    let Some(existing) = TodoService::get_item(&state.db, id).await? else {
        log::error!("Item with id {id} not found");
        return Err(ApiError::NotFound);
    };

    let updated = dto.apply_to(&existing);
    let ok = if updated.done {
        TodoService::update_done(&state.db, id, user.id).await?
    } else {
        TodoService::update_todo(&state.db, updated, user.id).await?
    };

    if ok {
        log::info!("Updated item with id {id}");
    } else {
        log::warn!("Update of item {id} by {} had no effect", user.email);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/todoitems/{id}
pub async fn delete_item(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if TodoService::delete_todo(&state.db, id, user.id).await? {
        log::info!("Removed item with id {id}");
    } else {
        log::warn!("Delete of item {id} by {} had no effect", user.email);
    }
    Ok(StatusCode::NO_CONTENT)
}
