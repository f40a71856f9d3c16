//! Log service client and pagination model for the access-log table.

use anyhow::{Context, Result};
use chrono::DateTime;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};

/// Page sizes offered by the table, cycled with `+`/`-`.
pub const PAGE_SIZES: [u32; 4] = [5, 10, 20, 50];

/// One access-log entry: a helmet-detection event and the door decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    /// Path of the captured frame, if one was stored
    pub image: Option<String>,
    /// Whether the door was opened for this event
    pub is_open: bool,
    /// ISO8601 creation timestamp
    pub created_at: String,
}

impl LogEntry {
    /// Badge text derived from the door decision.
    #[must_use]
    pub const fn badge(&self) -> &'static str {
        if self.is_open { "Open" } else { "Closed" }
    }

    /// Format `created_at` as "MMM DD, YYYY, hh:mm:ss AM/PM"; falls back to
    /// the raw string when the timestamp does not parse.
    #[must_use]
    pub fn format_created_at(&self) -> String {
        DateTime::parse_from_rfc3339(&self.created_at).map_or_else(
            |_| self.created_at.clone(),
            |dt| dt.format("%b %d, %Y, %I:%M:%S %p").to_string(),
        )
    }
}

/// Pagination metadata returned alongside each page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub total_pages: u32,
}

impl Pagination {
    /// Number of pages needed for `total` entries at `limit` per page.
    /// At least 1 so an empty table still has a current page.
    #[must_use]
    pub const fn pages_for(total: u32, limit: u32) -> u32 {
        if limit == 0 || total == 0 {
            1
        } else {
            total.div_ceil(limit)
        }
    }
}

/// Response shape of `GET /logs?page=&limit=`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsPage {
    pub data: Vec<LogEntry>,
    pub pagination: Pagination,
}

/// Client for the log endpoint of the helmet-detection backend.
#[derive(Clone)]
pub struct LogsClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl LogsClient {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch one page of access logs.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_page(&self, page: u32, limit: u32) -> Result<LogsPage> {
        let url = format!("{}/logs?page={}&limit={}", self.base_url, page, limit);
        let logs = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Log request failed")?
            .error_for_status()
            .with_context(|| "Log request rejected")?
            .json()
            .await
            .with_context(|| "Failed to parse logs response")?;
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(47, 10, 5)] // the canonical example
    #[case(50, 10, 5)]
    #[case(51, 10, 6)]
    #[case(1, 10, 1)]
    #[case(0, 10, 1)]
    #[case(47, 5, 10)]
    #[case(47, 50, 1)]
    fn test_pages_for(#[case] total: u32, #[case] limit: u32, #[case] expected: u32) {
        assert_eq!(Pagination::pages_for(total, limit), expected);
    }

    #[test]
    fn test_pages_for_zero_limit_does_not_divide_by_zero() {
        assert_eq!(Pagination::pages_for(47, 0), 1);
    }

    #[test]
    fn test_logs_page_parses_documented_schema() {
        let body = r#"{
            "data": [
                {
                    "id": "log-01",
                    "image": "/uploads/log-01.jpg",
                    "isOpen": true,
                    "createdAt": "2026-08-30T09:12:45.000Z"
                },
                {
                    "id": "log-02",
                    "image": null,
                    "isOpen": false,
                    "createdAt": "2026-08-30T09:10:02.000Z"
                }
            ],
            "pagination": { "page": 1, "limit": 10, "total": 47, "totalPages": 5 }
        }"#;

        let page: LogsPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.pagination.total_pages, 5);
        assert!(page.data[0].image.is_some());
        assert!(page.data[1].image.is_none());
        assert_eq!(page.data[0].badge(), "Open");
        assert_eq!(page.data[1].badge(), "Closed");
    }

    #[test]
    fn test_created_at_formatting() {
        let entry = LogEntry {
            id: "log-01".into(),
            image: None,
            is_open: true,
            created_at: "2026-08-30T21:05:09+07:00".into(),
        };
        assert_eq!(entry.format_created_at(), "Aug 30, 2026, 09:05:09 PM");
    }

    #[test]
    fn test_created_at_falls_back_to_raw_string() {
        let entry = LogEntry {
            id: "log-02".into(),
            image: None,
            is_open: false,
            created_at: "not-a-timestamp".into(),
        };
        assert_eq!(entry.format_created_at(), "not-a-timestamp");
    }
}
