//! Report assembly and publishing.
//!
//! One configurable component replaces the older per-report publishing
//! scripts: callers hand it an ordered image manifest, the charts
//! directory, and the day's commentary; it skips anything whose backing
//! file is missing and pushes the rest to the configured sink.

mod manifest;
mod notion;

pub use manifest::{default_manifest, title_from_filename, ManifestEntry};
pub use notion::NotionSink;

use async_trait::async_trait;
use chrono::NaiveDate;
use report_core::ReportError;
use std::path::{Path, PathBuf};

/// One image section of the assembled report.
#[derive(Debug, Clone)]
pub struct ReportImage {
    pub title: String,
    pub path: PathBuf,
    /// Externally reachable URL for the image (the sink cannot read local
    /// files).
    pub url: String,
}

/// A fully assembled daily report, ready for any sink.
#[derive(Debug, Clone)]
pub struct Report {
    pub date: NaiveDate,
    pub commentary: Vec<String>,
    pub images: Vec<ReportImage>,
}

/// Destination for an assembled report.
#[async_trait]
pub trait ReportSink {
    async fn publish(&self, report: &Report) -> Result<(), ReportError>;
}

/// Assemble a report from the manifest, dropping entries whose chart file
/// does not exist so the published page never carries broken references.
pub fn assemble_report(
    date: NaiveDate,
    charts_dir: &Path,
    manifest: &[ManifestEntry],
    asset_base_url: &str,
    commentary: Vec<String>,
) -> Report {
    let cache_buster = chrono::Utc::now().timestamp();

    let images = manifest
        .iter()
        .filter_map(|entry| {
            let path = charts_dir.join(&entry.filename);
            if !path.exists() {
                tracing::warn!("Skipping {}: chart file missing", entry.filename);
                return None;
            }
            Some(ReportImage {
                title: entry.title.clone(),
                url: format!(
                    "{}/{}?t={}",
                    asset_base_url.trim_end_matches('/'),
                    entry.filename,
                    cache_buster
                ),
                path,
            })
        })
        .collect();

    Report {
        date,
        commentary,
        images,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_assemble_skips_missing_files() {
        let dir = std::env::temp_dir().join("report_publisher_test_assemble");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("present.png"), b"png").unwrap();

        let manifest = vec![
            ManifestEntry::new("present.png", "Present"),
            ManifestEntry::new("missing.png", "Missing"),
        ];

        let report = assemble_report(
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            &dir,
            &manifest,
            "https://example.com/charts/",
            vec!["commentary".to_string()],
        );

        assert_eq!(report.images.len(), 1);
        assert_eq!(report.images[0].title, "Present");
        assert!(report.images[0].url.starts_with("https://example.com/charts/present.png?t="));
    }
}
