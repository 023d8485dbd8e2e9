//! User service: the narrow seam in front of the identity collaborator.
//!
//! Requests carry a bearer token; everything the rest of the application
//! knows about a user comes from the lookup here.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::user;

/// Service for user lookups and registration.
pub struct UserService;

impl UserService {
    /// Resolve a user from an API token. `None` means the request is
    /// unauthenticated.
    pub async fn find_by_token<C>(conn: &C, token: &str) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find()
            .filter(user::Column::ApiToken.eq(token))
            .one(conn)
            .await?)
    }

    /// Look up a user by id.
    pub async fn find_by_id<C>(conn: &C, id: Uuid) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find_by_id(id).one(conn).await?)
    }

    /// All registered users. Used by the reminder loop.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find().all(conn).await?)
    }

    /// Register a user and mint their API token.
    pub async fn create_user<C>(
        conn: &C,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<user::Model>
    where
        C: ConnectionTrait,
    {
        let model = user::Model {
            id: Uuid::new_v4(),
            email: email.to_string(),
            display_name: display_name.map(str::to_string),
            api_token: Uuid::new_v4().simple().to_string(),
            created_at: Utc::now(),
        };

        let active = user::ActiveModel {
            id: ActiveValue::Set(model.id),
            email: ActiveValue::Set(model.email.clone()),
            display_name: ActiveValue::Set(model.display_name.clone()),
            api_token: ActiveValue::Set(model.api_token.clone()),
            created_at: ActiveValue::Set(model.created_at),
        };
        user::Entity::insert(active).exec(conn).await?;

        Ok(model)
    }
}
