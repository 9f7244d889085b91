//! The filter rule: which comments warrant a notification.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use crate::model::Comment;

/// Collect the URLs of comments that have zero replies, were created within
/// `window` of `now`, and are not on the exclusion list.
///
/// Output order follows input order. The upstream returns newest-first and
/// that ordering is part of the notification contract, so nothing here
/// re-sorts.
pub fn filter_unanswered(
    comments: &[Comment],
    now: DateTime<Utc>,
    window: Duration,
    excluded: &HashSet<String>,
) -> Vec<String> {
    comments
        .iter()
        .filter(|c| c.reply_count == 0)
        .filter(|c| now - c.created_at <= window)
        .filter(|c| !excluded.contains(&c.id))
        .map(|c| c.url.clone())
        .collect()
}
