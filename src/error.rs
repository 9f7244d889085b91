//! Cycle-level errors. None of these are fatal in continuous mode; the
//! poll loop logs them and waits for the next tick.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PollError {
    /// Connection-level failure talking to either remote (DNS, refused,
    /// timeout). Handled like `Transport`: the cycle is abandoned.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the comment API.
    #[error("comment API returned HTTP {status}")]
    Transport { status: u16 },

    /// Response body did not match the expected shape, or a `createdAt`
    /// value was not in the exact `YYYY-MM-DDTHH:MM:SSZ` wire format.
    #[error("malformed comment API response: {reason}")]
    Parse { reason: String },

    /// The webhook rejected the notification. Not retried.
    #[error("webhook returned HTTP {status}")]
    Notify { status: u16 },
}
