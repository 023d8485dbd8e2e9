//! Transactional email over SendGrid.
//!
//! The sender is best-effort: the provider's response status is logged
//! and otherwise ignored, so a rejected message never fails the caller's
//! request. Only a transport failure surfaces as an error.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;

/// Outgoing email seam. Production uses [`SendGridMailer`]; tests can
/// substitute anything.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Mailer backed by the SendGrid v3 HTTP API.
pub struct SendGridMailer {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    from_address: String,
}

impl SendGridMailer {
    pub fn new(api_key: String, base_url: String, from_address: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            from_address,
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let payload = json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.from_address },
            "subject": subject,
            "content": [{ "type": "text/plain", "value": body }],
        });

        let response = self
            .http
            .post(format!("{}/v3/mail/send", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("sendgrid request failed")?;

        if response.status().is_success() {
            log::info!("Sent email to {to}");
        } else {
            log::error!("SendGrid rejected email to {to}: {}", response.status());
        }

        Ok(())
    }
}
