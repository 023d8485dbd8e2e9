//! Request payloads for the todo item endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::todo;

/// Create/update payload. Timestamps deserialize from RFC 3339 and are
/// normalized to UTC on the way in.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoItemDto {
    pub title: String,
    pub content: Option<String>,
    pub done: Option<bool>,
    pub tag: Option<String>,
    pub due_to: Option<DateTime<Utc>>,
}

impl TodoItemDto {
    /// Build a fresh item owned by `user_id`.
    pub fn into_new_item(self, user_id: Uuid) -> todo::Model {
        todo::Model {
            id: Uuid::new_v4(),
            user_id,
            title: self.title,
            content: self.content,
            done: self.done.unwrap_or(false),
            tag: self.tag,
            added_at: Utc::now(),
            due_to: self.due_to,
        }
    }

    /// Map this payload onto an existing item, keeping its identity and
    /// creation time.
    pub fn apply_to(self, existing: &todo::Model) -> todo::Model {
        todo::Model {
            id: existing.id,
            user_id: existing.user_id,
            title: self.title,
            content: self.content,
            done: self.done.unwrap_or(false),
            tag: self.tag,
            added_at: existing.added_at,
            due_to: self.due_to,
        }
    }
}
