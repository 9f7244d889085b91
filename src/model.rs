//! Wire types for the comment API response, and the in-memory snapshot the
//! filter operates on.
//!
//! The upstream returns
//! `{data: {post: {comments: {totalCount, nodes: [...]}}}}` with comments
//! ordered newest-first. That ordering is a property of the response and is
//! preserved all the way into the notification batch.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::PollError;

/// Exact creation-timestamp wire format: UTC, second precision, no
/// fractional seconds. Anything else is a parse failure.
pub const WIRE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One comment, snapshotted fresh each cycle. Never persisted.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub reply_count: u64,
}

/// The comment connection of one fetch, in upstream order.
#[derive(Debug)]
pub struct CommentPage {
    pub total_count: u64,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub data: Option<QueryData>,
}

#[derive(Debug, Deserialize)]
pub struct QueryData {
    pub post: Option<Post>,
}

#[derive(Debug, Deserialize)]
pub struct Post {
    pub comments: CommentConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentConnection {
    pub total_count: u64,
    pub nodes: Vec<CommentNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    pub id: String,
    pub url: String,
    pub created_at: String,
    pub replies: ReplyConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyConnection {
    pub total_count: u64,
}

/// Parse a `createdAt` value in the exact wire format.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, PollError> {
    NaiveDateTime::parse_from_str(raw, WIRE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| PollError::Parse {
            reason: format!("bad createdAt {raw:?}: {e}"),
        })
}

impl CommentPage {
    /// Lower a deserialized response into comment snapshots, rejecting
    /// bodies without a post (unknown slug) and unparseable timestamps.
    pub fn from_response(resp: QueryResponse) -> Result<Self, PollError> {
        let data = resp.data.ok_or_else(|| PollError::Parse {
            reason: "response has no data".to_string(),
        })?;
        let post = data.post.ok_or_else(|| PollError::Parse {
            reason: "response has no post (unknown slug?)".to_string(),
        })?;

        let mut comments = Vec::with_capacity(post.comments.nodes.len());
        for node in post.comments.nodes {
            comments.push(Comment {
                created_at: parse_timestamp(&node.created_at)?,
                id: node.id,
                url: node.url,
                reply_count: node.replies.total_count,
            });
        }

        Ok(Self {
            total_count: post.comments.total_count,
            comments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_exact_format() {
        let parsed = parse_timestamp("2024-01-01T00:10:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 10, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_deviations() {
        // fractional seconds
        assert!(parse_timestamp("2024-01-01T00:10:00.000Z").is_err());
        // numeric offset instead of Z
        assert!(parse_timestamp("2024-01-01T00:10:00+00:00").is_err());
        // missing Z
        assert!(parse_timestamp("2024-01-01T00:10:00").is_err());
        // date only
        assert!(parse_timestamp("2024-01-01").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_from_response_full_body() {
        let body = serde_json::json!({
            "data": {"post": {"comments": {
                "totalCount": 2,
                "nodes": [
                    {"id": "10", "url": "https://example.com/c/10",
                     "createdAt": "2024-01-01T00:18:00Z",
                     "replies": {"totalCount": 0}},
                    {"id": "11", "url": "https://example.com/c/11",
                     "createdAt": "2024-01-01T00:10:00Z",
                     "replies": {"totalCount": 3}},
                ]
            }}}
        });
        let resp: QueryResponse = serde_json::from_value(body).unwrap();
        let page = CommentPage::from_response(resp).unwrap();

        assert_eq!(page.total_count, 2);
        assert_eq!(page.comments.len(), 2);
        // upstream order preserved
        assert_eq!(page.comments[0].id, "10");
        assert_eq!(page.comments[1].id, "11");
        assert_eq!(page.comments[0].reply_count, 0);
        assert_eq!(page.comments[1].reply_count, 3);
    }

    #[test]
    fn test_from_response_missing_post_is_parse_error() {
        let resp: QueryResponse =
            serde_json::from_value(serde_json::json!({"data": {"post": null}})).unwrap();
        assert!(matches!(
            CommentPage::from_response(resp),
            Err(PollError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_response_bad_timestamp_is_parse_error() {
        let body = serde_json::json!({
            "data": {"post": {"comments": {
                "totalCount": 1,
                "nodes": [
                    {"id": "10", "url": "https://example.com/c/10",
                     "createdAt": "January 1st",
                     "replies": {"totalCount": 0}},
                ]
            }}}
        });
        let resp: QueryResponse = serde_json::from_value(body).unwrap();
        assert!(matches!(
            CommentPage::from_response(resp),
            Err(PollError::Parse { .. })
        ));
    }

    #[test]
    fn test_node_missing_field_fails_deserialization() {
        // no `url`
        let body = serde_json::json!({
            "data": {"post": {"comments": {
                "totalCount": 1,
                "nodes": [
                    {"id": "10", "createdAt": "2024-01-01T00:18:00Z",
                     "replies": {"totalCount": 0}},
                ]
            }}}
        });
        assert!(serde_json::from_value::<QueryResponse>(body).is_err());
    }
}
