//! Versioned schema migrations.
//!
//! The schema lives here as explicit SQL, decoupled from the entity types.
//! Applied versions are recorded in `schema_migrations`; pending steps run
//! in order inside a transaction at startup.

use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement, TransactionTrait};

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial_schema",
        sql: r"
            CREATE TABLE users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                display_name TEXT,
                api_token TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            );

            CREATE TABLE todos (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                content TEXT,
                done BOOLEAN NOT NULL DEFAULT 0,
                added_at TEXT NOT NULL,
                due_to TEXT,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
            );

            CREATE TABLE files (
                todo_id TEXT PRIMARY KEY,
                path TEXT NOT NULL,
                size INTEGER NOT NULL,
                FOREIGN KEY (todo_id) REFERENCES todos(id) ON DELETE CASCADE
            );

            CREATE INDEX idx_todos_user_done ON todos(user_id, done);
        ",
    },
    Migration {
        version: 2,
        name: "add_todo_tag",
        sql: r"
            ALTER TABLE todos ADD COLUMN tag TEXT;
            CREATE INDEX idx_todos_tag ON todos(tag);
        ",
    },
];

async fn applied_version(conn: &DatabaseConnection) -> Result<i64> {
    conn.execute_unprepared(
        r"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )
        ",
    )
    .await?;

    let row = conn
        .query_one(Statement::from_string(
            conn.get_database_backend(),
            "SELECT COALESCE(MAX(version), 0) AS version FROM schema_migrations".to_string(),
        ))
        .await?;

    match row {
        Some(row) => Ok(row.try_get::<i64>("", "version")?),
        None => Ok(0),
    }
}

/// Apply all migrations newer than the recorded schema version.
pub async fn run(conn: &DatabaseConnection) -> Result<()> {
    let current = applied_version(conn).await?;

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        let txn = conn.begin().await?;
        txn.execute_unprepared(migration.sql)
            .await
            .with_context(|| format!("migration {} ({}) failed", migration.version, migration.name))?;
        txn.execute_unprepared(&format!(
            "INSERT INTO schema_migrations (version, name, applied_at) VALUES ({}, '{}', '{}')",
            migration.version,
            migration.name,
            chrono::Utc::now().to_rfc3339()
        ))
        .await?;
        txn.commit().await?;

        log::info!("Applied migration {} ({})", migration.version, migration.name);
    }

    Ok(())
}

/// Highest migration version this build knows about.
pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}
