//! Todo item service: every mutation and query over todo rows goes
//! through here. Controllers never touch the entities directly.
//!
//! All operations are scoped to the acting user unless noted. Failures
//! the caller can act on are reported as `Ok(false)` / `Ok(None)`;
//! store errors propagate as `Err` and are fatal to the request.

use anyhow::Result;
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::constants::{DUE_SOON_WINDOW_HOURS, RECENT_ITEMS_LIMIT};
use crate::entities::{file_info, todo};
use crate::validation;

/// Service for todo-related database operations.
pub struct TodoService;

impl TodoService {
    /// Get the user's items that are not done yet, in stable insertion order.
    pub async fn get_incomplete_items<C>(conn: &C, user_id: Uuid) -> Result<Vec<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::UserId.eq(user_id))
            .filter(todo::Column::Done.eq(false))
            .order_by_asc(todo::Column::AddedAt)
            .order_by_asc(todo::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get the user's completed items, in stable insertion order.
    pub async fn get_complete_items<C>(conn: &C, user_id: Uuid) -> Result<Vec<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::UserId.eq(user_id))
            .filter(todo::Column::Done.eq(true))
            .order_by_asc(todo::Column::AddedAt)
            .order_by_asc(todo::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get the user's most recently added items, newest first.
    pub async fn get_recently_added_items<C>(conn: &C, user_id: Uuid) -> Result<Vec<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::UserId.eq(user_id))
            .order_by_desc(todo::Column::AddedAt)
            .order_by_desc(todo::Column::Id)
            .limit(RECENT_ITEMS_LIMIT)
            .all(conn)
            .await?)
    }

    /// Get the user's not-done items due within the next 48 hours.
    pub async fn get_due_soon_items<C>(conn: &C, user_id: Uuid) -> Result<Vec<todo::Model>>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        let horizon = now + Duration::hours(DUE_SOON_WINDOW_HOURS);
        Ok(todo::Entity::find()
            .filter(todo::Column::UserId.eq(user_id))
            .filter(todo::Column::Done.eq(false))
            .filter(todo::Column::DueTo.gte(now))
            .filter(todo::Column::DueTo.lte(horizon))
            .order_by_asc(todo::Column::DueTo)
            .all(conn)
            .await?)
    }

    /// Get the user's items carrying a specific tag.
    pub async fn get_items_by_tag<C>(conn: &C, user_id: Uuid, tag: &str) -> Result<Vec<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::UserId.eq(user_id))
            .filter(todo::Column::Tag.eq(tag))
            .order_by_asc(todo::Column::AddedAt)
            .order_by_asc(todo::Column::Id)
            .all(conn)
            .await?)
    }

    /// Look up a single item by id. Ownership is enforced by the caller.
    pub async fn get_item<C>(conn: &C, id: Uuid) -> Result<Option<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find_by_id(id).one(conn).await?)
    }

    /// Check whether an item exists without loading it.
    pub async fn exists<C>(conn: &C, id: Uuid) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let count = todo::Entity::find()
            .filter(todo::Column::Id.eq(id))
            .count(conn)
            .await?;
        Ok(count > 0)
    }

    /// Persist a new item owned by `user_id`.
    ///
    /// Returns `Ok(false)` when the payload violates the title/content
    /// constraints; nothing is written in that case.
    pub async fn add_item<C>(conn: &C, item: todo::Model, user_id: Uuid) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        if !validation::validate_todo(&item.title, item.content.as_deref()).is_empty() {
            return Ok(false);
        }

        let model = todo::ActiveModel {
            id: ActiveValue::Set(item.id),
            user_id: ActiveValue::Set(user_id),
            title: ActiveValue::Set(item.title),
            content: ActiveValue::Set(item.content),
            done: ActiveValue::Set(item.done),
            tag: ActiveValue::Set(item.tag),
            added_at: ActiveValue::Set(item.added_at),
            due_to: ActiveValue::Set(item.due_to),
        };
        todo::Entity::insert(model).exec(conn).await?;

        Ok(true)
    }

    /// Full update of a non-done item.
    ///
    /// Returns `Ok(false)` when the item is missing, owned by someone
    /// else, already done, or the payload fails validation.
    pub async fn update_todo<C>(conn: &C, item: todo::Model, user_id: Uuid) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let Some(existing) = todo::Entity::find_by_id(item.id).one(conn).await? else {
            return Ok(false);
        };
        if existing.user_id != user_id || existing.done {
            return Ok(false);
        }
        if !validation::validate_todo(&item.title, item.content.as_deref()).is_empty() {
            return Ok(false);
        }

        let mut model = existing.into_active_model();
        model.title = ActiveValue::Set(item.title);
        model.content = ActiveValue::Set(item.content);
        model.tag = ActiveValue::Set(item.tag);
        model.due_to = ActiveValue::Set(item.due_to);
        model.update(conn).await?;

        Ok(true)
    }

    /// Mark an item as done. Idempotent: an already-done item stays done
    /// and the call still succeeds.
    pub async fn update_done<C>(conn: &C, id: Uuid, user_id: Uuid) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let Some(existing) = todo::Entity::find_by_id(id).one(conn).await? else {
            return Ok(false);
        };
        if existing.user_id != user_id {
            return Ok(false);
        }
        if existing.done {
            return Ok(true);
        }

        let mut model = existing.into_active_model();
        model.done = ActiveValue::Set(true);
        model.update(conn).await?;

        Ok(true)
    }

    /// Delete an item and its attached file metadata.
    ///
    /// Returns `Ok(false)` when the item is missing or owned by someone
    /// else; the caller decides whether that is worth surfacing.
    pub async fn delete_todo<C>(conn: &C, id: Uuid, user_id: Uuid) -> Result<bool>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let Some(existing) = todo::Entity::find_by_id(id).one(conn).await? else {
            return Ok(false);
        };
        if existing.user_id != user_id {
            return Ok(false);
        }

        // The schema cascades files -> todos, but the pragma backing that
        // is per-connection in SQLite, so the file row goes explicitly.
        let txn = conn.begin().await?;
        file_info::Entity::delete_by_id(id).exec(&txn).await?;
        existing.delete(&txn).await?;
        txn.commit().await?;

        Ok(true)
    }

    /// Attach or replace the file metadata of an owned, existing item.
    pub async fn save_file<C>(
        conn: &C,
        todo_id: Uuid,
        user_id: Uuid,
        path: &str,
        size: i64,
    ) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let Some(existing) = todo::Entity::find_by_id(todo_id).one(conn).await? else {
            return Ok(false);
        };
        if existing.user_id != user_id {
            return Ok(false);
        }

        match file_info::Entity::find_by_id(todo_id).one(conn).await? {
            Some(file) => {
                let mut model = file.into_active_model();
                model.path = ActiveValue::Set(path.to_string());
                model.size = ActiveValue::Set(size);
                model.update(conn).await?;
            }
            None => {
                let model = file_info::ActiveModel {
                    todo_id: ActiveValue::Set(todo_id),
                    path: ActiveValue::Set(path.to_string()),
                    size: ActiveValue::Set(size),
                };
                file_info::Entity::insert(model).exec(conn).await?;
            }
        }

        Ok(true)
    }

    /// Get the file metadata attached to an item, if any.
    pub async fn get_file<C>(conn: &C, todo_id: Uuid) -> Result<Option<file_info::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(file_info::Entity::find_by_id(todo_id).one(conn).await?)
    }
}
