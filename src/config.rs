//! Configuration loaded from environment variables.
//!
//! Everything the process needs is fixed at startup: endpoints, the bearer
//! token, the poll cadence, the backdate multiplier, and the set of comment
//! ids exempted from notification.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;

const DEFAULT_GRAPHQL_URL: &str = "https://api.producthunt.com/v2/api/graphql";
const DEFAULT_POST_SLUG: &str = "neurelo";
const DEFAULT_INTERVAL_MINUTES: u64 = 3;
const DEFAULT_BACKDATE_MULTIPLIER: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Comment API endpoint.
    pub graphql_url: String,
    /// Bearer token for the comment API.
    pub bearer_token: String,
    /// Slug of the post whose comments are monitored.
    pub post_slug: String,
    /// Notification webhook endpoint. May be empty when delivery is disabled.
    pub webhook_url: String,
    /// Poll cadence in minutes.
    pub interval_minutes: u64,
    /// The backdate window is `interval_minutes * backdate_multiplier`.
    pub backdate_multiplier: u64,
    /// When false, notifications are logged instead of delivered.
    pub notify_enabled: bool,
    /// Run one cycle and exit instead of polling forever.
    pub run_once: bool,
    /// Comment ids that never trigger a notification.
    pub excluded_ids: HashSet<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bearer_token = std::env::var("REPLYWATCH_BEARER_TOKEN")
            .context("REPLYWATCH_BEARER_TOKEN is not set")?;

        let notify_enabled = match std::env::var("REPLYWATCH_NOTIFY") {
            Ok(v) => parse_bool(&v).context("REPLYWATCH_NOTIFY is not a boolean")?,
            Err(_) => true,
        };

        let webhook_url = std::env::var("REPLYWATCH_WEBHOOK_URL").unwrap_or_default();
        if notify_enabled && webhook_url.is_empty() {
            bail!("REPLYWATCH_WEBHOOK_URL is not set (required while notifications are enabled)");
        }

        let run_once = match std::env::var("REPLYWATCH_RUN_ONCE") {
            Ok(v) => parse_bool(&v).context("REPLYWATCH_RUN_ONCE is not a boolean")?,
            Err(_) => false,
        };

        let interval_minutes = env_u64("REPLYWATCH_INTERVAL_MINUTES", DEFAULT_INTERVAL_MINUTES)?;
        if interval_minutes == 0 {
            bail!("REPLYWATCH_INTERVAL_MINUTES must be at least 1");
        }

        Ok(Self {
            graphql_url: std::env::var("REPLYWATCH_GRAPHQL_URL")
                .unwrap_or_else(|_| DEFAULT_GRAPHQL_URL.to_string()),
            bearer_token,
            post_slug: std::env::var("REPLYWATCH_POST_SLUG")
                .unwrap_or_else(|_| DEFAULT_POST_SLUG.to_string()),
            webhook_url,
            interval_minutes,
            backdate_multiplier: env_u64(
                "REPLYWATCH_BACKDATE_MULTIPLIER",
                DEFAULT_BACKDATE_MULTIPLIER,
            )?,
            notify_enabled,
            run_once,
            excluded_ids: parse_excluded(
                &std::env::var("REPLYWATCH_EXCLUDED_IDS").unwrap_or_default(),
            ),
        })
    }

    /// How far back a comment's creation time may be to still count as
    /// recent. Wider than the poll interval by design: a comment created
    /// near a cycle boundary must not slip through because of scheduler
    /// jitter, so this is `interval * multiplier`, never `interval` alone.
    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::minutes((self.interval_minutes * self.backdate_multiplier) as i64)
    }

    /// Tick period for the poll loop.
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.interval_minutes * 60)
    }
}

fn env_u64(name: &str, default: u64) -> Result<u64> {
    match std::env::var(name) {
        Ok(v) => v
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{name} is not a non-negative integer: {v:?}")),
        Err(_) => Ok(default),
    }
}

fn parse_bool(v: &str) -> Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}

/// Comma-separated id list; whitespace and empty entries are dropped.
fn parse_excluded(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
