//! Background reminder loop.
//!
//! Every interval, each user with items due in the next 48 hours gets a
//! single summary email. Delivery is best-effort: every failure is
//! logged and the loop keeps going.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::constants::REMINDER_EMAIL_SUBJECT;
use crate::entities::todo;
use crate::services::email::Mailer;
use crate::services::todos::TodoService;
use crate::services::users::UserService;

fn format_reminder(items: &[todo::Model]) -> String {
    let mut body = String::from("The following tasks are due within the next two days:\n\n");
    for item in items {
        body.push_str("- ");
        body.push_str(&item.title);
        if let Some(due) = item.due_to {
            body.push_str(&format!(" (due {})", due.format("%Y-%m-%d %H:%M UTC")));
        }
        body.push('\n');
    }
    body
}

/// One pass over all users. Split out from the loop so tests can drive it.
pub async fn send_due_reminders(conn: &DatabaseConnection, mailer: &dyn Mailer) {
    let users = match UserService::get_all(conn).await {
        Ok(users) => users,
        Err(err) => {
            log::error!("Reminder pass could not list users: {err:#}");
            return;
        }
    };

    for user in users {
        let items = match TodoService::get_due_soon_items(conn, user.id).await {
            Ok(items) => items,
            Err(err) => {
                log::error!("Reminder pass failed for {}: {err:#}", user.email);
                continue;
            }
        };
        if items.is_empty() {
            continue;
        }

        let body = format_reminder(&items);
        if let Err(err) = mailer
            .send_email(&user.email, REMINDER_EMAIL_SUBJECT, &body)
            .await
        {
            log::error!("Reminder email to {} failed: {err:#}", user.email);
        }
    }
}

/// Spawn the periodic reminder task.
pub fn start_reminder_loop(
    conn: DatabaseConnection,
    mailer: Arc<dyn Mailer>,
    interval_minutes: u64,
) {
    if interval_minutes == 0 {
        return;
    }

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_minutes * 60));
        // The first tick fires immediately; skip it so startup stays quiet.
        interval.tick().await;

        loop {
            interval.tick().await;
            send_due_reminders(&conn, mailer.as_ref()).await;
        }
    });
}
