//! PNG chart rendering for the daily report.
//!
//! Every renderer draws to a temporary file and renames it into place, so
//! a failed render leaves a missing chart plus a log line, never a
//! truncated image for the publisher to pick up.

mod render;

pub use render::{LabeledSeries, SeriesStyle};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use metal_analysis::{PremiumPoint, SpreadPoint};
use report_core::{DailyBar, NetPoint, ReportError, WarehouseReceipt};

pub struct ChartWriter {
    output_dir: PathBuf,
}

impl ChartWriter {
    /// Create a writer rooted at `output_dir`, creating the directory if
    /// needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| {
            ReportError::ChartError(format!(
                "cannot create output dir {}: {}",
                output_dir.display(),
                e
            ))
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Net speculative positions line chart (one marker per report week).
    pub fn net_positions(
        &self,
        filename: &str,
        metal_name: &str,
        series: &[NetPoint],
    ) -> Result<PathBuf, ReportError> {
        let points: Vec<(NaiveDate, f64)> =
            series.iter().map(|p| (p.date, p.net as f64)).collect();
        let latest = series
            .last()
            .map(|p| format!("Latest: {} ({})", p.net, p.date))
            .unwrap_or_default();
        let title = format!("CFTC {} Speculative Net Positions  {}", metal_name, latest);

        self.write_atomic(filename, |path| {
            render::line_with_zero_axis(path, &title, "Net Long Contracts", &points)
        })
    }

    /// Premium/discount area chart, shaded red above zero and green below.
    pub fn premium(
        &self,
        filename: &str,
        title: &str,
        series: &[PremiumPoint],
    ) -> Result<PathBuf, ReportError> {
        let points: Vec<(NaiveDate, f64)> =
            series.iter().map(|p| (p.date, p.premium_pct)).collect();
        self.write_atomic(filename, |path| {
            render::signed_area(path, title, "Premium / Discount (%)", &points)
        })
    }

    /// Volume bars with open interest on a secondary axis.
    pub fn volume_open_interest(
        &self,
        filename: &str,
        title: &str,
        bars: &[DailyBar],
    ) -> Result<PathBuf, ReportError> {
        let volume: Vec<(NaiveDate, f64)> = bars
            .iter()
            .filter_map(|b| b.volume.map(|v| (b.date, v)))
            .collect();
        let open_interest: Vec<(NaiveDate, f64)> = bars
            .iter()
            .filter_map(|b| b.open_interest.map(|oi| (b.date, oi)))
            .collect();
        self.write_atomic(filename, |path| {
            render::dual_axis(path, title, "Volume", "Open Interest", &volume, &open_interest)
        })
    }

    /// Single volume line (used when no comparable counterparty series
    /// exists).
    pub fn volume_only(
        &self,
        filename: &str,
        title: &str,
        bars: &[DailyBar],
    ) -> Result<PathBuf, ReportError> {
        let points: Vec<(NaiveDate, f64)> = bars
            .iter()
            .filter_map(|b| b.volume.map(|v| (b.date, v)))
            .collect();
        self.write_atomic(filename, |path| {
            render::line_with_zero_axis(path, title, "Daily Volume", &points)
        })
    }

    /// Warehouse-receipt (stocks) area chart.
    pub fn warehouse_stocks(
        &self,
        filename: &str,
        title: &str,
        series: &[WarehouseReceipt],
    ) -> Result<PathBuf, ReportError> {
        let points: Vec<(NaiveDate, f64)> =
            series.iter().map(|r| (r.date, r.receipts)).collect();
        self.write_atomic(filename, |path| {
            render::signed_area(path, title, "Warehouse Receipts", &points)
        })
    }

    /// Multi-series forward-curve spread chart.
    pub fn forward_spreads(
        &self,
        filename: &str,
        title: &str,
        serieses: &[(String, Vec<SpreadPoint>)],
    ) -> Result<PathBuf, ReportError> {
        let styles = [SeriesStyle::Red, SeriesStyle::Blue, SeriesStyle::Green];
        let labeled: Vec<LabeledSeries> = serieses
            .iter()
            .zip(styles.iter().cycle())
            .map(|((label, points), style)| LabeledSeries {
                label: label.clone(),
                style: *style,
                points: points.iter().map(|p| (p.date, p.spread_pct)).collect(),
            })
            .collect();
        self.write_atomic(filename, |path| {
            render::multi_line(
                path,
                title,
                "Spread % (Far vs Near) — negative = backwardation",
                &labeled,
            )
        })
    }

    /// Normalized two-series comparison chart (both rebased to 100).
    pub fn comparison(
        &self,
        filename: &str,
        title: &str,
        label_a: &str,
        series_a: &[(NaiveDate, f64)],
        label_b: &str,
        series_b: &[(NaiveDate, f64)],
    ) -> Result<PathBuf, ReportError> {
        let labeled = vec![
            LabeledSeries {
                label: label_a.to_string(),
                style: SeriesStyle::Red,
                points: series_a.to_vec(),
            },
            LabeledSeries {
                label: label_b.to_string(),
                style: SeriesStyle::Blue,
                points: series_b.to_vec(),
            },
        ];
        self.write_atomic(filename, |path| {
            render::multi_line(path, title, "Relative Performance (Start=100)", &labeled)
        })
    }

    /// Render via `draw` into a temp file, then move it into place.
    fn write_atomic<F>(&self, filename: &str, draw: F) -> Result<PathBuf, ReportError>
    where
        F: FnOnce(&Path) -> Result<(), ReportError>,
    {
        let target = self.output_dir.join(filename);
        let tmp = self.output_dir.join(format!("{}.tmp", filename));

        if let Err(e) = draw(&tmp) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        fs::rename(&tmp, &target).map_err(|e| {
            ReportError::ChartError(format!("cannot move chart into place: {}", e))
        })?;
        tracing::info!("Wrote chart {}", target.display());
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_writer(name: &str) -> ChartWriter {
        let dir = std::env::temp_dir().join(format!("chart_gen_test_{}", name));
        let _ = fs::remove_dir_all(&dir);
        ChartWriter::new(dir).unwrap()
    }

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn test_net_positions_chart_written() {
        let writer = temp_writer("net");
        let series: Vec<NetPoint> = (0..10)
            .map(|i| NetPoint {
                date: d(1, 7) + chrono::Duration::weeks(i),
                net: 100_000 + i * 1_000,
            })
            .collect();

        let path = writer
            .net_positions("Fig_CFTC_Gold.png", "Gold", &series)
            .unwrap();
        assert!(path.exists());
        // No temp file left behind.
        assert!(!writer.output_dir().join("Fig_CFTC_Gold.png.tmp").exists());
    }

    #[test]
    fn test_empty_series_fails_without_artifact() {
        let writer = temp_writer("empty");
        let result = writer.net_positions("empty.png", "Gold", &[]);
        assert!(result.is_err());
        assert!(!writer.output_dir().join("empty.png").exists());
        assert!(!writer.output_dir().join("empty.png.tmp").exists());
    }

    #[test]
    fn test_comparison_chart_written() {
        let writer = temp_writer("comparison");
        let a: Vec<(NaiveDate, f64)> = (0..15)
            .map(|i| (d(2, 3) + chrono::Duration::days(i), 100.0 + i as f64))
            .collect();
        let b: Vec<(NaiveDate, f64)> = (0..15)
            .map(|i| (d(2, 3) + chrono::Duration::days(i), 100.0 + i as f64 * 0.4))
            .collect();

        let path = writer
            .comparison("cn_vs_comex.png", "Gold: SHFE vs COMEX", "SHFE", &a, "COMEX", &b)
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_premium_chart_written() {
        let writer = temp_writer("premium");
        let series: Vec<metal_analysis::PremiumPoint> = (0..20)
            .map(|i| metal_analysis::PremiumPoint {
                date: d(3, 1) + chrono::Duration::days(i),
                premium_pct: (i as f64 - 10.0) / 4.0,
            })
            .collect();

        let path = writer
            .premium("1_Gold_Premium.png", "Gold Premium", &series)
            .unwrap();
        assert!(path.exists());
    }
}
