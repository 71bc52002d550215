//! The independent report tasks.
//!
//! Each task fetches its own sources, renders its charts, and reports a
//! `TaskOutcome`. Failures stay inside the task: a dead feed or a render
//! error yields an Empty/Failed outcome and the next task still runs.

use std::path::PathBuf;

use chart_gen::ChartWriter;
use cftc_client::{net_position_series, CftcClient};
use chrono::{Datelike, Duration, NaiveDate};
use market_data::{BenchmarkCurrency, MarketDataClient};
use metal_analysis::{
    classify_net_change, forward_spread_series, normalized_comparison, premium_series, since,
    turnover_series, BenchmarkConversion, Comparison,
};
use report_core::{DailyBar, Metal, TaskOutcome, Thresholds};

/// Lookback window for the daily charts.
const WINDOW_DAYS: i64 = 180;
/// Weekly positioning points kept on the CFTC charts (about 7 months).
const CFTC_CHART_WEEKS: usize = 30;

/// One finished task: its outcome plus any commentary lines it produced
/// for the published report.
pub struct TaskRun {
    pub name: &'static str,
    pub outcome: TaskOutcome,
    pub commentary: Vec<String>,
}

impl TaskRun {
    fn new(name: &'static str, outcome: TaskOutcome) -> Self {
        Self {
            name,
            outcome,
            commentary: Vec::new(),
        }
    }
}

/// Gold: onshore premium vs COMEX, volume/open-interest, single volume.
pub async fn run_gold_task(
    market: &MarketDataClient,
    charts: &ChartWriter,
    today: NaiveDate,
    thresholds: &Thresholds,
) -> TaskRun {
    let name = "gold";
    let cutoff = today - Duration::days(WINDOW_DAYS);

    let shfe = match market.fetch_domestic_daily("au0").await {
        Ok(bars) if !bars.is_empty() => since(&bars, cutoff),
        Ok(_) => return TaskRun::new(name, TaskOutcome::empty("SHFE au0 returned no rows")),
        Err(e) => return TaskRun::new(name, TaskOutcome::failed(e.to_string())),
    };
    let comex = match market.fetch_foreign_daily("GC").await {
        Ok(bars) => since(&bars, cutoff),
        Err(e) => return TaskRun::new(name, TaskOutcome::failed(e.to_string())),
    };
    let fx = market.fetch_fx_usd_cny().await;

    let mut artifacts: Vec<PathBuf> = Vec::new();

    let premium = premium_series(
        &shfe,
        &comex,
        &fx,
        BenchmarkConversion::UsdPerOunceToCnyPerGram,
    );
    if let Some(last) = premium.last() {
        let title = format!("Gold Onshore Premium: {:.2}%", last.premium_pct);
        match charts.premium("1_Gold_Premium.png", &title, &premium) {
            Ok(path) => artifacts.push(path),
            Err(e) => tracing::warn!("Gold premium chart failed: {}", e),
        }
    } else {
        tracing::warn!("No overlapping gold sessions; premium chart skipped");
    }

    match charts.volume_open_interest(
        "2_Gold_Vol_OI.png",
        "Gold (SHFE): Vol vs Open Interest",
        &shfe,
    ) {
        Ok(path) => artifacts.push(path),
        Err(e) => tracing::warn!("Gold vol/OI chart failed: {}", e),
    }
    match charts.volume_only("3_Gold_Vol_Single.png", "Gold Volume (SHFE Only)", &shfe) {
        Ok(path) => artifacts.push(path),
        Err(e) => tracing::warn!("Gold volume chart failed: {}", e),
    }

    let comparison = normalized_comparison(&shfe, &comex);
    if let Some(cmp) = &comparison {
        let (domestic, benchmark) = rebased_legs(cmp);
        match charts.comparison(
            "Fig_Compare_Gold.png",
            "Gold: SHFE vs COMEX (Start=100)",
            "SHFE au0",
            &domestic,
            "COMEX GC",
            &benchmark,
        ) {
            Ok(path) => artifacts.push(path),
            Err(e) => tracing::warn!("Gold comparison chart failed: {}", e),
        }
    }

    let mut run = finish(name, artifacts);
    run.commentary = turnover_commentary("Gold", &shfe, thresholds);
    run.commentary
        .extend(strength_commentary("Gold", comparison.as_ref()));
    run
}

/// Silver: premium vs COMEX, volume/open-interest, single volume, stocks.
pub async fn run_silver_task(
    market: &MarketDataClient,
    charts: &ChartWriter,
    today: NaiveDate,
    thresholds: &Thresholds,
) -> TaskRun {
    let name = "silver";
    let cutoff = today - Duration::days(WINDOW_DAYS);

    let shfe = match market.fetch_domestic_daily("ag0").await {
        Ok(bars) if !bars.is_empty() => since(&bars, cutoff),
        Ok(_) => return TaskRun::new(name, TaskOutcome::empty("SHFE ag0 returned no rows")),
        Err(e) => return TaskRun::new(name, TaskOutcome::failed(e.to_string())),
    };
    let comex = match market.fetch_foreign_daily("SI").await {
        Ok(bars) => since(&bars, cutoff),
        Err(e) => return TaskRun::new(name, TaskOutcome::failed(e.to_string())),
    };
    let fx = market.fetch_fx_usd_cny().await;

    let mut artifacts: Vec<PathBuf> = Vec::new();

    let premium = premium_series(
        &shfe,
        &comex,
        &fx,
        BenchmarkConversion::UsdPerOunceToCnyPerKg,
    );
    if let Some(last) = premium.last() {
        let title = format!("Silver Onshore Premium: {:.2}%", last.premium_pct);
        match charts.premium("4_Silver_Premium.png", &title, &premium) {
            Ok(path) => artifacts.push(path),
            Err(e) => tracing::warn!("Silver premium chart failed: {}", e),
        }
    }

    match charts.volume_open_interest(
        "5_Silver_Vol_OI.png",
        "Silver (SHFE): Vol vs Open Interest",
        &shfe,
    ) {
        Ok(path) => artifacts.push(path),
        Err(e) => tracing::warn!("Silver vol/OI chart failed: {}", e),
    }
    match charts.volume_only("6_Silver_Vol_Single.png", "Silver Volume (SHFE Only)", &shfe) {
        Ok(path) => artifacts.push(path),
        Err(e) => tracing::warn!("Silver volume chart failed: {}", e),
    }

    // Exchange stocks; the feed goes dark during maintenance windows.
    let receipts = market
        .fetch_warehouse_receipts("silver", today, WINDOW_DAYS)
        .await;
    if receipts.is_empty() {
        tracing::warn!("Silver warehouse receipts unavailable; stocks chart skipped");
    } else {
        match charts.warehouse_stocks(
            "7_Silver_Stocks.png",
            "Silver SHFE Stocks (Warehouse Receipts)",
            &receipts,
        ) {
            Ok(path) => artifacts.push(path),
            Err(e) => tracing::warn!("Silver stocks chart failed: {}", e),
        }
    }

    let comparison = normalized_comparison(&shfe, &comex);
    if let Some(cmp) = &comparison {
        let (domestic, benchmark) = rebased_legs(cmp);
        match charts.comparison(
            "Fig_Compare_Silver.png",
            "Silver: SHFE vs COMEX (Start=100)",
            "SHFE ag0",
            &domestic,
            "COMEX SI",
            &benchmark,
        ) {
            Ok(path) => artifacts.push(path),
            Err(e) => tracing::warn!("Silver comparison chart failed: {}", e),
        }
    }

    let mut run = finish(name, artifacts);
    run.commentary = turnover_commentary("Silver", &shfe, thresholds);
    run.commentary
        .extend(strength_commentary("Silver", comparison.as_ref()));
    run
}

/// Platinum/palladium: active-contract search, benchmark fallback chain,
/// premium and volume/open-interest charts.
pub async fn run_pgm_task(
    market: &MarketDataClient,
    charts: &ChartWriter,
    today: NaiveDate,
    metal: Metal,
) -> TaskRun {
    let (name, root, premium_file, vol_file) = match metal {
        Metal::Platinum => (
            "platinum",
            "pt",
            "8_Platinum_Premium.png",
            "9_Platinum_Vol_OI.png",
        ),
        Metal::Palladium => (
            "palladium",
            "pa",
            "Palladium_Premium.png",
            "Palladium_Vol_OI.png",
        ),
        _ => return TaskRun::new("pgm", TaskOutcome::failed("not a PGM metal")),
    };

    let (code, bars) = match market.find_active_contract(root, today).await {
        Some(found) => found,
        None => {
            return TaskRun::new(
                name,
                TaskOutcome::empty(format!("no active {} contract found", root)),
            )
        }
    };
    let cutoff = today - Duration::days(WINDOW_DAYS);
    let domestic = since(&bars, cutoff);

    let mut artifacts: Vec<PathBuf> = Vec::new();

    match market.fetch_pgm_benchmark(metal).await {
        Some(benchmark) => {
            let bench_bars = since(&benchmark.bars, cutoff);
            let (fx, conversion) = match benchmark.currency {
                BenchmarkCurrency::Usd => (
                    market.fetch_fx_usd_cny().await,
                    BenchmarkConversion::UsdPerOunceToCnyPerGram,
                ),
                BenchmarkCurrency::Cny => (
                    report_core::FxSeries::fixed(market_data::FX_FALLBACK),
                    BenchmarkConversion::None,
                ),
            };

            let premium = premium_series(&domestic, &bench_bars, &fx, conversion);
            if let Some(last) = premium.last() {
                let title = format!(
                    "{} Premium ({} vs {}): {:.2}%",
                    metal.name(),
                    code,
                    benchmark.source,
                    last.premium_pct
                );
                match charts.premium(premium_file, &title, &premium) {
                    Ok(path) => artifacts.push(path),
                    Err(e) => tracing::warn!("{} premium chart failed: {}", metal.name(), e),
                }
            } else {
                tracing::warn!("No overlap between {} and its benchmark", code);
            }
        }
        None => tracing::warn!("{} has no usable benchmark; premium skipped", metal.name()),
    }

    let title = format!("{} ({}): Vol vs Open Interest", metal.name(), code);
    match charts.volume_open_interest(vol_file, &title, &domestic) {
        Ok(path) => artifacts.push(path),
        Err(e) => tracing::warn!("{} vol/OI chart failed: {}", metal.name(), e),
    }

    finish(name, artifacts)
}

/// Forward-curve structure across gold, silver and platinum.
pub async fn run_forward_curve_task(
    market: &MarketDataClient,
    charts: &ChartWriter,
    today: NaiveDate,
) -> TaskRun {
    let name = "forward-curve";
    let cutoff = today - Duration::days(WINDOW_DAYS);

    // (root, near months ahead, far months ahead). Platinum lists fewer
    // deliveries, so its far leg is the quarter month.
    let legs: [(&str, u32, u32); 3] = [("au", 6, 12), ("ag", 6, 12), ("pt", 6, 9)];

    let mut serieses = Vec::new();
    for (root, near_ahead, far_ahead) in legs {
        let near_code = format!("{}{}", root, contract_month_code(today, near_ahead));
        let far_code = format!("{}{}", root, contract_month_code(today, far_ahead));

        let near = match market.fetch_domestic_daily(&near_code).await {
            Ok(bars) if !bars.is_empty() => bars,
            Ok(_) => {
                tracing::warn!("Near contract {} has no data", near_code);
                continue;
            }
            Err(e) => {
                tracing::warn!("Near contract {} failed: {}", near_code, e);
                continue;
            }
        };
        let far = match market.fetch_domestic_daily(&far_code).await {
            Ok(bars) if !bars.is_empty() => bars,
            Ok(_) => {
                tracing::warn!("Far contract {} has no data", far_code);
                continue;
            }
            Err(e) => {
                tracing::warn!("Far contract {} failed: {}", far_code, e);
                continue;
            }
        };

        let spreads = forward_spread_series(&near, &far, cutoff);
        if let Some(last) = spreads.last() {
            tracing::info!(
                "{}: latest {}-{} spread {:.2}%",
                root,
                near_code,
                far_code,
                last.spread_pct
            );
            serieses.push((format!("{} ({}-{})", root, near_code, far_code), spreads));
        }
    }

    if serieses.is_empty() {
        return TaskRun::new(name, TaskOutcome::empty("no contract pair had usable data"));
    }

    match charts.forward_spreads(
        "Fig6_Forward_Structure.png",
        "Forward Curve Structure (Implied Roll Yield)",
        &serieses,
    ) {
        Ok(path) => finish(name, vec![path]),
        Err(e) => TaskRun::new(name, TaskOutcome::failed(e.to_string())),
    }
}

/// CFTC speculative positioning: one chart per metal plus the
/// week-over-week commentary line used by the published report.
pub async fn run_cftc_task(
    cftc: &CftcClient,
    charts: &ChartWriter,
    today: NaiveDate,
    thresholds: &Thresholds,
) -> TaskRun {
    let name = "cftc-positioning";

    let records = cftc.fetch_recent(today.year()).await;
    if records.is_empty() {
        return TaskRun::new(name, TaskOutcome::empty("no archive data available"));
    }

    let metals: [(Metal, &str); 3] = [
        (Metal::Gold, "Fig_CFTC_Gold.png"),
        (Metal::Silver, "Fig3_CFTC_Silver.png"),
        (Metal::Platinum, "Fig4_CFTC_Platinum.png"),
    ];

    let mut artifacts: Vec<PathBuf> = Vec::new();
    let mut commentary = Vec::new();

    for (metal, filename) in metals {
        let code = match metal.cftc_code() {
            Some(code) => code,
            None => continue,
        };
        let series = net_position_series(&records, code);
        if series.is_empty() {
            tracing::warn!("No positioning rows for {} ({})", metal.name(), code);
            continue;
        }

        let signal = classify_net_change(&series, thresholds);
        commentary.push(signal.describe(metal.name()));

        let window_start = series.len().saturating_sub(CFTC_CHART_WEEKS);
        match charts.net_positions(filename, metal.name(), &series[window_start..]) {
            Ok(path) => artifacts.push(path),
            Err(e) => tracing::warn!("{} positioning chart failed: {}", metal.name(), e),
        }
    }

    let mut run = finish(name, artifacts);
    run.commentary = commentary;
    run
}

/// Flag unusually active sessions: a commentary line when the latest
/// session's volume/open-interest ratio clears the configured threshold.
fn turnover_commentary(metal_name: &str, bars: &[DailyBar], thresholds: &Thresholds) -> Vec<String> {
    let turnover = turnover_series(bars, thresholds);
    match turnover.last() {
        Some(latest) if latest.high_turnover => vec![format!(
            "{}: high turnover on {} (volume {:.1}x open interest)",
            metal_name, latest.date, latest.ratio
        )],
        _ => Vec::new(),
    }
}

/// Split a comparison into its two rebased legs for the chart renderer.
fn rebased_legs(cmp: &Comparison) -> (Vec<(NaiveDate, f64)>, Vec<(NaiveDate, f64)>) {
    cmp.points
        .iter()
        .map(|p| ((p.date, p.a_rebased), (p.date, p.b_rebased)))
        .unzip()
}

/// Relative strength of the onshore contract versus its international
/// benchmark, both rebased to 100 at the start of the window.
fn strength_commentary(metal_name: &str, comparison: Option<&Comparison>) -> Vec<String> {
    match comparison {
        Some(cmp) => {
            let lead = if cmp.latest_strength_diff >= 0.0 {
                "ahead of"
            } else {
                "behind"
            };
            vec![format!(
                "{}: onshore contract running {:.1} pts {} the international benchmark over the window",
                metal_name,
                cmp.latest_strength_diff.abs(),
                lead
            )]
        }
        None => Vec::new(),
    }
}

/// Delivery-month code `yymm` for `months_ahead` months after `today`.
fn contract_month_code(today: NaiveDate, months_ahead: u32) -> String {
    let total = today.year() * 12 + today.month0() as i32 + months_ahead as i32;
    let year = total / 12;
    let month = total % 12 + 1;
    format!("{:02}{:02}", year % 100, month)
}

fn finish(name: &'static str, artifacts: Vec<PathBuf>) -> TaskRun {
    if artifacts.is_empty() {
        TaskRun::new(name, TaskOutcome::empty("no chart could be produced"))
    } else {
        TaskRun::new(name, TaskOutcome::Completed { artifacts })
    }
}
