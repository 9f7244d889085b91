//! Webhook notification delivery.

use chrono::Utc;
use tracing::info;

use crate::error::PollError;

pub struct Notifier {
    http: reqwest::Client,
    webhook_url: String,
    enabled: bool,
}

impl Notifier {
    pub fn new(http: reqwest::Client, webhook_url: String, enabled: bool) -> Self {
        Self {
            http,
            webhook_url,
            enabled,
        }
    }

    /// Deliver one batched notification for the cycle's matches.
    ///
    /// An empty batch only logs a diagnostic line. With delivery disabled
    /// the message is logged instead of posted. Failures are not retried;
    /// the caller logs them and lets the cycle end.
    pub async fn notify(&self, urls: &[String], interval_minutes: u64) -> Result<(), PollError> {
        if urls.is_empty() {
            info!(at = %Utc::now(), "no new comments");
            return Ok(());
        }

        let message = format_message(urls, interval_minutes);
        if !self.enabled {
            info!(%message, "notification delivery disabled, logging instead");
            return Ok(());
        }

        let resp = self
            .http
            .post(&self.webhook_url)
            .json(&serde_json::json!({ "text": message }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PollError::Notify {
                status: status.as_u16(),
            });
        }

        info!(count = urls.len(), "notification delivered");
        Ok(())
    }
}

fn format_message(urls: &[String], interval_minutes: u64) -> String {
    format!(
        "Found {} comments with 0 replies in the last {} minutes:\n{}",
        urls.len(),
        interval_minutes,
        urls.join("\n")
    )
}
