use std::sync::Arc;

use anyhow::{Context, Result};

use todolist::api::{build_router, AppState};
use todolist::config::Config;
use todolist::logger;
use todolist::services::{reminders, Mailer, SendGridMailer};
use todolist::storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    logger::init(&config.logging)?;

    let storage = Storage::open(&config.database.url)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.url))?;

    if config.email.enabled {
        match std::env::var(&config.email.api_key_env) {
            Ok(api_key) => {
                let mailer: Arc<dyn Mailer> = Arc::new(SendGridMailer::new(
                    api_key,
                    config.email.base_url.clone(),
                    config.email.from_address.clone(),
                ));
                reminders::start_reminder_loop(
                    storage.conn.clone(),
                    mailer,
                    config.email.reminder_interval_minutes,
                );
            }
            Err(_) => {
                log::warn!(
                    "Email is enabled but {} is not set; reminders disabled",
                    config.email.api_key_env
                );
            }
        }
    }

    let state = AppState {
        db: storage.conn.clone(),
    };
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("Listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
