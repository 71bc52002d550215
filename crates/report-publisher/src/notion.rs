//! Notion page sink: appends heading/divider/paragraph/image blocks to a
//! configured page via the public HTTP API.

use async_trait::async_trait;
use report_core::ReportError;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::{Report, ReportSink};

const NOTION_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

pub struct NotionSink {
    client: Client,
    token: String,
    page_id: String,
}

impl NotionSink {
    pub fn new(token: impl Into<String>, page_id: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token: token.into(),
            page_id: page_id.into(),
        }
    }

    /// Build a sink from `NOTION_TOKEN` / `NOTION_PAGE_ID`; `None` when
    /// either is unset (publishing is optional).
    pub fn from_env() -> Option<Self> {
        let token = std::env::var("NOTION_TOKEN").ok()?;
        let page_id = std::env::var("NOTION_PAGE_ID").ok()?;
        Some(Self::new(token, page_id))
    }
}

#[async_trait]
impl ReportSink for NotionSink {
    async fn publish(&self, report: &Report) -> Result<(), ReportError> {
        let body = json!({ "children": build_blocks(report) });
        let url = format!("{}/blocks/{}/children", NOTION_API_BASE, self.page_id);

        tracing::info!(
            "Publishing report for {} ({} images) to Notion",
            report.date,
            report.images.len()
        );

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ReportError::PublishError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ReportError::PublishError(format!(
                "Notion returned HTTP {}: {}",
                status, detail
            )));
        }

        tracing::info!("Notion page updated");
        Ok(())
    }
}

/// Assemble the block list: date heading, divider, commentary paragraphs,
/// then a heading + external image per chart.
pub fn build_blocks(report: &Report) -> Vec<Value> {
    let mut blocks = vec![
        json!({
            "object": "block",
            "type": "heading_1",
            "heading_1": {
                "rich_text": [{"type": "text", "text": {"content": format!("Daily Metal Report: {}", report.date)}}]
            }
        }),
        json!({ "object": "block", "type": "divider", "divider": {} }),
    ];

    for line in &report.commentary {
        blocks.push(json!({
            "object": "block",
            "type": "paragraph",
            "paragraph": {
                "rich_text": [{"type": "text", "text": {"content": line}}]
            }
        }));
    }

    for image in &report.images {
        blocks.push(json!({
            "object": "block",
            "type": "heading_3",
            "heading_3": {
                "rich_text": [{"type": "text", "text": {"content": image.title}}]
            }
        }));
        blocks.push(json!({
            "object": "block",
            "type": "image",
            "image": {
                "type": "external",
                "external": {"url": image.url}
            }
        }));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReportImage;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[test]
    fn test_build_blocks_layout() {
        let report = Report {
            date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            commentary: vec!["Gold positioning increased.".to_string()],
            images: vec![ReportImage {
                title: "1 Gold Premium".to_string(),
                path: PathBuf::from("charts/1_Gold_Premium.png"),
                url: "https://example.com/1_Gold_Premium.png?t=1".to_string(),
            }],
        };

        let blocks = build_blocks(&report);
        // heading + divider + 1 paragraph + (heading + image)
        assert_eq!(blocks.len(), 5);
        assert_eq!(blocks[0]["type"], "heading_1");
        assert_eq!(blocks[1]["type"], "divider");
        assert_eq!(blocks[2]["type"], "paragraph");
        assert_eq!(blocks[4]["image"]["external"]["url"], "https://example.com/1_Gold_Premium.png?t=1");
    }

    #[test]
    fn test_build_blocks_no_images() {
        let report = Report {
            date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            commentary: vec![],
            images: vec![],
        };
        assert_eq!(build_blocks(&report).len(), 2);
    }
}
