use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use super::migrations;

/// Database handle for the todolist server.
///
/// Wraps the SeaORM connection pool and guarantees the schema is current
/// before anything else touches it.
pub struct Storage {
    pub conn: DatabaseConnection,
}

impl Storage {
    /// Open the database at `url` and bring the schema up to date.
    pub async fn open(url: &str) -> Result<Self> {
        let mut options = ConnectOptions::new(url.to_owned());
        options
            .min_connections(1)
            .max_connections(4)
            .sqlx_logging(false);

        let conn = Database::connect(options).await?;
        migrations::run(&conn).await?;

        Ok(Storage { conn })
    }

    /// Open a private in-memory database, for tests and ad-hoc runs.
    ///
    /// Uses a named shared-cache URL so every pooled connection sees the
    /// same data.
    pub async fn open_in_memory(name: &str) -> Result<Self> {
        let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
        Self::open(&url).await
    }
}
