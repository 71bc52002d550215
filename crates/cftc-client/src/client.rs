use std::io::{Cursor, Read};
use std::time::Duration;

use csv::ReaderBuilder;
use report_core::{PositionRecord, ReportError};
use reqwest::{Client, StatusCode};
use zip::ZipArchive;

use crate::columns::ColumnMapping;
use crate::normalize::normalize_row;

const ARCHIVE_BASE_URL: &str = "https://www.cftc.gov/files/dea/history";

/// The CFTC endpoint rejects default library user agents.
const USER_AGENT: &str = "Mozilla/5.0";

/// Client for the CFTC commitment-of-traders yearly archives.
#[derive(Clone)]
pub struct CftcClient {
    client: Client,
}

impl Default for CftcClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CftcClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(90))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    fn archive_url(year: i32) -> String {
        format!("{}/deacot{}.zip", ARCHIVE_BASE_URL, year)
    }

    /// Fetch and normalize one year's report archive.
    ///
    /// HTTP 404 means the year has not been published yet and yields an
    /// empty record set, not an error. A file whose header cannot be
    /// mapped also yields an empty set (logged with the detected columns).
    pub async fn fetch_year(&self, year: i32) -> Result<Vec<PositionRecord>, ReportError> {
        let url = Self::archive_url(year);
        tracing::info!("Fetching commitment-of-traders archive: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ReportError::ApiError(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ReportError::ApiError(e.to_string()))?;

        let records = interpret_archive_response(status, &bytes, &url)?;
        tracing::info!("Parsed {} position records for {}", records.len(), year);
        Ok(records)
    }

    /// Fetch the previous and current year, merged and date-sorted.
    ///
    /// A failed year is logged and contributes nothing; the other year
    /// still counts. This keeps the weekly series usable across the
    /// January boundary when the new year's file is not out yet.
    pub async fn fetch_recent(&self, current_year: i32) -> Vec<PositionRecord> {
        let mut all = Vec::new();
        for year in [current_year - 1, current_year] {
            match self.fetch_year(year).await {
                Ok(records) => all.extend(records),
                Err(e) => tracing::warn!("Skipping {} archive: {}", year, e),
            }
        }
        all.sort_by_key(|r| r.date);
        all
    }
}

/// Map an archive response to records.
///
/// 404 means "year not yet published" and is a valid empty outcome, not
/// an error; any other non-success status is. The body is only parsed on
/// success.
fn interpret_archive_response(
    status: StatusCode,
    body: &[u8],
    url: &str,
) -> Result<Vec<PositionRecord>, ReportError> {
    if status == StatusCode::NOT_FOUND {
        tracing::info!("Archive {} not yet published (404), skipping", url);
        return Ok(Vec::new());
    }
    if !status.is_success() {
        return Err(ReportError::ApiError(format!(
            "HTTP {} fetching {}",
            status, url
        )));
    }
    parse_archive(body)
}

/// Extract and normalize the single CSV member of a report ZIP.
pub fn parse_archive(zip_bytes: &[u8]) -> Result<Vec<PositionRecord>, ReportError> {
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes))
        .map_err(|e| ReportError::ArchiveError(e.to_string()))?;

    if archive.len() == 0 {
        return Err(ReportError::ArchiveError(
            "archive contains no files".to_string(),
        ));
    }

    let mut member = archive
        .by_index(0)
        .map_err(|e| ReportError::ArchiveError(e.to_string()))?;

    let mut raw = Vec::new();
    member
        .read_to_end(&mut raw)
        .map_err(|e| ReportError::ArchiveError(e.to_string()))?;

    // Older archives are Latin-1; the columns we consume are ASCII, so a
    // lossy conversion is safe.
    let text = String::from_utf8_lossy(&raw);
    Ok(parse_report_csv(&text))
}

/// Normalize report CSV text into records.
///
/// Returns an empty set when the header cannot be mapped; the detected
/// column list is logged so an operator can diagnose schema drift.
pub fn parse_report_csv(text: &str) -> Vec<PositionRecord> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let labels: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(|s| s.to_string()).collect(),
        Err(e) => {
            tracing::warn!("Unreadable report header: {}", e);
            return Vec::new();
        }
    };

    let mapping = match ColumnMapping::discover(&labels) {
        Some(m) => m,
        None => {
            tracing::warn!(
                "Report schema not recognized; detected columns: {:?}",
                labels
            );
            return Vec::new();
        }
    };

    reader
        .records()
        .filter_map(|row| row.ok())
        .filter_map(|row| normalize_row(&mapping, &row))
        .collect()
}
