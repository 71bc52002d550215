//! Active-contract discovery and the PGM benchmark fallback chain.
//!
//! Newer exchanges (GFEX platinum/palladium) have no continuous symbol,
//! so "the active contract" is found by brute force: try the plausible
//! delivery months and keep whichever code returns the most history.

use chrono::{Datelike, NaiveDate};
use report_core::{DailyBar, Metal};

use crate::{Benchmark, BenchmarkCurrency, MarketDataClient};

/// A candidate needs at least this many rows to count as tradeable.
const MIN_CONTRACT_ROWS: usize = 5;

/// Candidate contract codes for `root` as of `today`: the next six
/// delivery months plus the nearest Decembers (the usual back-month for
/// metals), deduplicated, e.g. "pt2601".
pub fn candidate_codes(root: &str, today: NaiveDate) -> Vec<String> {
    let mut months: Vec<(i32, u32)> = Vec::new();

    let mut year = today.year();
    let mut month = today.month();
    for _ in 0..6 {
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
        months.push((year, month));
    }
    // December back-months: last year's (still trading through Q1) and
    // this year's.
    months.push((today.year() - 1, 12));
    months.push((today.year(), 12));

    let mut codes: Vec<String> = months
        .into_iter()
        .map(|(y, m)| format!("{}{:02}{:02}", root, y % 100, m))
        .collect();
    codes.dedup();
    codes.sort();
    codes.dedup();
    codes
}

impl MarketDataClient {
    /// Brute-force search for the active contract of `root`.
    ///
    /// Fetches every candidate and keeps the one with the most rows;
    /// candidates that fail to fetch are simply skipped. Returns the
    /// locked-in code and its history, or `None` when nothing qualifies.
    pub async fn find_active_contract(
        &self,
        root: &str,
        today: NaiveDate,
    ) -> Option<(String, Vec<DailyBar>)> {
        tracing::info!("Searching for the active {} contract", root);

        let mut best: Option<(String, Vec<DailyBar>)> = None;
        for code in candidate_codes(root, today) {
            let bars = match self.fetch_domestic_daily(&code).await {
                Ok(bars) => bars,
                Err(e) => {
                    tracing::debug!("Candidate {} skipped: {}", code, e);
                    continue;
                }
            };
            if bars.len() < MIN_CONTRACT_ROWS {
                continue;
            }
            if best.as_ref().map_or(true, |(_, b)| bars.len() > b.len()) {
                best = Some((code, bars));
            }
        }

        match &best {
            Some((code, bars)) => {
                tracing::info!("Locked active contract {} ({} rows)", code, bars.len())
            }
            None => tracing::warn!("No active {} contract found", root),
        }
        best
    }

    /// Benchmark series for a PGM metal.
    ///
    /// NYMEX futures first; when that feed is dead, fall back to the SGE
    /// spot fix (which turns the premium into a futures-vs-spot basis).
    /// Palladium has no spot fallback.
    pub async fn fetch_pgm_benchmark(&self, metal: Metal) -> Option<Benchmark> {
        let foreign_symbol = match metal {
            Metal::Platinum => "PL",
            Metal::Palladium => "PA",
            _ => return None,
        };

        match self.fetch_foreign_daily(foreign_symbol).await {
            Ok(bars) if !bars.is_empty() => {
                tracing::info!("Using NYMEX {} as {} benchmark", foreign_symbol, metal.name());
                return Some(Benchmark {
                    bars,
                    currency: BenchmarkCurrency::Usd,
                    source: "NYMEX Futures",
                });
            }
            Ok(_) => tracing::warn!("NYMEX {} returned no rows", foreign_symbol),
            Err(e) => tracing::warn!("NYMEX {} unavailable: {}", foreign_symbol, e),
        }

        if metal != Metal::Platinum {
            tracing::warn!("No spot fallback exists for {}", metal.name());
            return None;
        }

        match self.fetch_sge_spot("Pt99.95").await {
            Ok(bars) if !bars.is_empty() => {
                tracing::info!("Falling back to SGE Pt99.95 spot as Platinum benchmark");
                Some(Benchmark {
                    bars,
                    currency: BenchmarkCurrency::Cny,
                    source: "SGE Spot",
                })
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("SGE spot fallback failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_candidates_early_january() {
        let codes = candidate_codes("pt", d(2026, 1, 5));
        // Feb..Jul 2026 plus the two December back-months.
        for expected in ["pt2602", "pt2607", "pt2512", "pt2612"] {
            assert!(codes.contains(&expected.to_string()), "missing {}", expected);
        }
    }

    #[test]
    fn test_candidates_wrap_year_end() {
        let codes = candidate_codes("au", d(2025, 11, 20));
        assert!(codes.contains(&"au2512".to_string()));
        assert!(codes.contains(&"au2605".to_string()));
    }

    #[test]
    fn test_candidates_deduplicated() {
        let codes = candidate_codes("pt", d(2025, 8, 1));
        let mut sorted = codes.clone();
        sorted.dedup();
        assert_eq!(codes, sorted);
    }
}
