pub mod client;
pub mod columns;
pub mod normalize;
pub mod series;

pub use client::{parse_archive, parse_report_csv, CftcClient};
pub use columns::{ColumnMapping, ColumnRole};
pub use normalize::{normalize_market_code, normalize_row, parse_interest, parse_report_date};
pub use series::net_position_series;
