//! replywatch: unanswered-comment watcher.
//!
//! Polls a Product Hunt post's comments over the public GraphQL API on a
//! fixed cadence and posts one batched webhook message whenever comments
//! with zero replies were created inside the backdate window. No state
//! survives a cycle; every cycle is evaluated independently.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

mod client;
mod config;
mod error;
mod filter;
mod model;
mod notify;
mod poller;

use client::CommentClient;
use config::Config;
use notify::Notifier;
use poller::Poller;

/// Bound on any single request so a hung remote cannot stall the loop.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "replywatch=info".into()),
        )
        .with_target(false)
        .init();

    info!("📡 replywatch v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;

    info!(
        slug = %config.post_slug,
        interval_minutes = config.interval_minutes,
        window_minutes = config.window().num_minutes(),
        notify_enabled = config.notify_enabled,
        excluded = config.excluded_ids.len(),
        "configuration loaded"
    );

    let http = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let client = CommentClient::new(
        http.clone(),
        config.graphql_url.clone(),
        config.bearer_token.clone(),
        config.post_slug.clone(),
    );
    let notifier = Notifier::new(http, config.webhook_url.clone(), config.notify_enabled);
    let poller = Poller::new(
        client,
        notifier,
        config.interval_minutes,
        config.window(),
        config.excluded_ids.clone(),
    );

    if config.run_once {
        // Single-run mode: one cycle, non-zero exit on any failure.
        return poller.run_cycle().await.context("Poll cycle failed");
    }

    let poll_handle = tokio::spawn(poller::run_poller(poller, config.poll_interval()));

    // Wait for shutdown signal (ctrl-c or SIGTERM)
    let shutdown = async {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            let mut sigterm =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("failed to register SIGTERM handler");
            tokio::select! {
                _ = ctrl_c => info!("received ctrl-c, shutting down"),
                _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
            }
        }

        #[cfg(not(unix))]
        {
            ctrl_c.await.ok();
            info!("received ctrl-c, shutting down");
        }
    };

    tokio::select! {
        () = shutdown => {}
        _ = poll_handle => {
            warn!("poll loop exited unexpectedly");
        }
    }

    info!("replywatch stopped");
    Ok(())
}
