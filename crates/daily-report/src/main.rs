//! daily-report: Fetch metals data, render the chart set, and publish the
//! daily report page.
//!
//! Runs every task independently: gold, silver, platinum, palladium, the
//! forward-curve structure, and CFTC speculative positioning. A failing
//! feed marks its own task Failed/Empty and the rest still run.
//!
//! Usage:
//!   cargo run -p daily-report
//!   cargo run -p daily-report -- --output-dir charts_final
//!   cargo run -p daily-report -- --skip-publish

mod tasks;

use cftc_client::CftcClient;
use chart_gen::ChartWriter;
use chrono::Utc;
use market_data::MarketDataClient;
use report_core::{Metal, TaskOutcome, Thresholds};
use report_publisher::{assemble_report, default_manifest, NotionSink, ReportSink};
use tasks::TaskRun;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_report=info,market_data=info,cftc_client=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let skip_publish = args.iter().any(|a| a == "--skip-publish");
    let output_dir = args
        .iter()
        .position(|a| a == "--output-dir")
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
        .unwrap_or("charts_final")
        .to_string();

    let today = Utc::now().date_naive();
    let thresholds = Thresholds::from_env();
    tracing::info!(
        "Daily metal report for {} (charts -> {}/)",
        today,
        output_dir
    );

    let charts = ChartWriter::new(&output_dir)?;
    let market = MarketDataClient::new();
    let cftc = CftcClient::new();

    // Tasks run sequentially; the sources are rate-sensitive and the whole
    // set finishes in a couple of minutes either way.
    let runs = vec![
        tasks::run_gold_task(&market, &charts, today, &thresholds).await,
        tasks::run_silver_task(&market, &charts, today, &thresholds).await,
        tasks::run_pgm_task(&market, &charts, today, Metal::Platinum).await,
        tasks::run_pgm_task(&market, &charts, today, Metal::Palladium).await,
        tasks::run_forward_curve_task(&market, &charts, today).await,
        tasks::run_cftc_task(&cftc, &charts, today, &thresholds).await,
    ];

    let mut commentary = Vec::new();
    for run in &runs {
        log_outcome(run);
        commentary.extend(run.commentary.iter().cloned());
    }

    if skip_publish {
        tracing::info!("--skip-publish set; leaving charts on disk");
        return Ok(());
    }

    let sink = match NotionSink::from_env() {
        Some(sink) => sink,
        None => {
            tracing::warn!("NOTION_TOKEN / NOTION_PAGE_ID unset; skipping publish");
            return Ok(());
        }
    };

    let base_url = match asset_base_url(&output_dir) {
        Some(url) => url,
        None => {
            tracing::warn!(
                "Neither ASSET_BASE_URL nor GITHUB_REPOSITORY is set; \
                 published images would be unreachable, skipping publish"
            );
            return Ok(());
        }
    };

    let report = assemble_report(
        today,
        charts.output_dir(),
        &default_manifest(),
        &base_url,
        commentary,
    );
    if report.images.is_empty() {
        tracing::warn!("No charts to publish; leaving the page untouched");
        return Ok(());
    }
    sink.publish(&report).await?;

    Ok(())
}

fn log_outcome(run: &TaskRun) {
    match &run.outcome {
        TaskOutcome::Completed { artifacts } => {
            tracing::info!("[{}] completed with {} chart(s)", run.name, artifacts.len())
        }
        TaskOutcome::Empty { reason } => {
            tracing::warn!("[{}] produced nothing: {}", run.name, reason)
        }
        TaskOutcome::Failed { reason } => tracing::error!("[{}] failed: {}", run.name, reason),
    }
}

/// Where the published page will load chart images from. Defaults to the
/// raw-content URL of the repository that runs the workflow, since the
/// workflow commits the charts back to it. `None` when no origin can be
/// formed; publishing with a broken base URL would only litter the page
/// with dead image references.
fn asset_base_url(output_dir: &str) -> Option<String> {
    if let Ok(base) = std::env::var("ASSET_BASE_URL") {
        if !base.trim().is_empty() {
            return Some(base);
        }
    }
    let repo = std::env::var("GITHUB_REPOSITORY").unwrap_or_default();
    if repo.trim().is_empty() {
        return None;
    }
    Some(format!(
        "https://raw.githubusercontent.com/{}/main/{}",
        repo, output_dir
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns both env vars; splitting it would race under the
    // parallel test runner.
    #[test]
    fn test_asset_base_url_requires_an_origin() {
        std::env::remove_var("ASSET_BASE_URL");
        std::env::remove_var("GITHUB_REPOSITORY");
        assert_eq!(asset_base_url("charts_final"), None);

        std::env::set_var("GITHUB_REPOSITORY", "desk/metals-report");
        assert_eq!(
            asset_base_url("charts_final").as_deref(),
            Some("https://raw.githubusercontent.com/desk/metals-report/main/charts_final")
        );

        std::env::set_var("ASSET_BASE_URL", "https://cdn.example.com/charts");
        assert_eq!(
            asset_base_url("charts_final").as_deref(),
            Some("https://cdn.example.com/charts")
        );

        std::env::remove_var("ASSET_BASE_URL");
        std::env::remove_var("GITHUB_REPOSITORY");
    }
}
