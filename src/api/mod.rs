//! HTTP surface: router construction, shared state, authentication and
//! the error envelope.

pub mod auth;
pub mod dto;
pub mod error;
pub mod todo_items;

use axum::routing::get;
use axum::Router;
use sea_orm::DatabaseConnection;

pub use auth::CurrentUser;
pub use error::ApiError;

use crate::web;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Build the full application router: entry pages plus the REST API.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(web::index))
        .route("/about", get(web::about))
        .route("/contact", get(web::contact))
        .route("/error", get(web::error_page))
        .route(
            "/api/todoitems",
            get(todo_items::get_all).post(todo_items::create),
        )
        .route("/api/todoitems/complete", get(todo_items::get_complete))
        .route("/api/todoitems/incomplete", get(todo_items::get_incomplete))
        .route("/api/todoitems/recent", get(todo_items::get_recent))
        .route("/api/todoitems/bytag/:tag", get(todo_items::get_by_tag))
        .route(
            "/api/todoitems/:id",
            get(todo_items::get_by_id)
                .put(todo_items::update)
                .delete(todo_items::delete_item),
        )
        .with_state(state)
}
