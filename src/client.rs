//! Authenticated client for the comment API.

use reqwest::header::ACCEPT;
use tracing::debug;

use crate::error::PollError;
use crate::model::{CommentPage, QueryResponse};

pub struct CommentClient {
    http: reqwest::Client,
    graphql_url: String,
    bearer_token: String,
    post_slug: String,
}

impl CommentClient {
    pub fn new(
        http: reqwest::Client,
        graphql_url: String,
        bearer_token: String,
        post_slug: String,
    ) -> Self {
        Self {
            http,
            graphql_url,
            bearer_token,
            post_slug,
        }
    }

    /// Issue the fixed query and lower the response into comment snapshots.
    ///
    /// One page of up to 1000 comments, newest first; no pagination beyond
    /// that. Non-200 responses become `Transport`, undeserializable bodies
    /// and bad timestamps become `Parse`.
    pub async fn fetch(&self) -> Result<CommentPage, PollError> {
        let resp = self
            .http
            .post(&self.graphql_url)
            .bearer_auth(&self.bearer_token)
            .header(ACCEPT, "*/*")
            .json(&query_body(&self.post_slug))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PollError::Transport {
                status: status.as_u16(),
            });
        }

        // Read the body as text first so decode failures classify as Parse
        // rather than surfacing as an opaque reqwest decode error.
        let body = resp.text().await?;
        let parsed: QueryResponse =
            serde_json::from_str(&body).map_err(|e| PollError::Parse {
                reason: e.to_string(),
            })?;

        let page = CommentPage::from_response(parsed)?;
        debug!(
            total = page.total_count,
            fetched = page.comments.len(),
            "fetched comment page"
        );
        Ok(page)
    }
}

/// The fixed query payload. Only the slug varies, and only via config.
fn query_body(slug: &str) -> serde_json::Value {
    serde_json::json!({
        "query": format!(
            r#"
    {{
        post(slug: "{slug}") {{
            comments(first: 1000, order: NEWEST) {{
                totalCount
                nodes {{
                    replies {{
                        totalCount
                    }}
                    url
                    createdAt
                    id
                }}
            }}
        }}
    }}
    "#
        )
    })
}
