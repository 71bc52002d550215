//! Header discovery for the commitment-of-traders CSV.
//!
//! The CFTC has renamed columns across years, so the four fields we need
//! are located by keyword match against whatever labels the file actually
//! carries, rather than by fixed position or exact name.

/// Logical roles a report column can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Date,
    MarketCode,
    LongInterest,
    ShortInterest,
}

impl ColumnRole {
    /// Evaluation order. Every role must resolve for a file to be accepted.
    pub const ALL: [ColumnRole; 4] = [
        ColumnRole::Date,
        ColumnRole::MarketCode,
        ColumnRole::LongInterest,
        ColumnRole::ShortInterest,
    ];

    /// Keywords that must ALL appear (case-insensitive, any order) in a
    /// label for it to fill this role.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            // e.g. "As_of_Date_In_Form_YYMMDD"
            ColumnRole::Date => &["DATE", "YYMMDD"],
            // e.g. "CFTC_Contract_Market_Code"
            ColumnRole::MarketCode => &["CODE", "MARKET"],
            // e.g. "NonComm_Positions_Long_All"
            ColumnRole::LongInterest => &["NON", "LONG", "ALL"],
            // e.g. "NonComm_Positions_Short_All"
            ColumnRole::ShortInterest => &["NON", "SHORT", "ALL"],
        }
    }

    /// First label (by natural column order) matching this role.
    pub fn find_in(&self, labels: &[String]) -> Option<usize> {
        labels.iter().position(|label| {
            let upper = label.to_uppercase();
            self.keywords().iter().all(|k| upper.contains(k))
        })
    }
}

/// Resolved association from the four roles to column indices of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: usize,
    pub market_code: usize,
    pub long_interest: usize,
    pub short_interest: usize,
}

impl ColumnMapping {
    /// Resolve all four roles against the file's header labels.
    ///
    /// Fail-closed: if any role is missing the whole mapping is rejected.
    /// A partially-mapped schema is assumed unreliable, so no partial
    /// records are ever emitted from such a file.
    pub fn discover(labels: &[String]) -> Option<Self> {
        Some(Self {
            date: ColumnRole::Date.find_in(labels)?,
            market_code: ColumnRole::MarketCode.find_in(labels)?,
            long_interest: ColumnRole::LongInterest.find_in(labels)?,
            short_interest: ColumnRole::ShortInterest.find_in(labels)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_discover_current_schema() {
        let cols = labels(&[
            "Market_and_Exchange_Names",
            "As_of_Date_In_Form_YYMMDD",
            "CFTC_Contract_Market_Code",
            "Open_Interest_All",
            "NonComm_Positions_Long_All",
            "NonComm_Positions_Short_All",
        ]);
        let mapping = ColumnMapping::discover(&cols).unwrap();
        assert_eq!(mapping.date, 1);
        assert_eq!(mapping.market_code, 2);
        assert_eq!(mapping.long_interest, 4);
        assert_eq!(mapping.short_interest, 5);
    }

    #[test]
    fn test_discover_is_case_insensitive_and_position_independent() {
        let cols = labels(&[
            "noncomm_positions_short_all",
            "cftc_contract_market_code",
            "noncomm_positions_long_all",
            "as_of_date_in_form_yymmdd",
        ]);
        let mapping = ColumnMapping::discover(&cols).unwrap();
        assert_eq!(mapping.date, 3);
        assert_eq!(mapping.market_code, 1);
        assert_eq!(mapping.long_interest, 2);
        assert_eq!(mapping.short_interest, 0);
    }

    #[test]
    fn test_first_match_wins() {
        // Two labels satisfy the date keywords; natural order breaks the tie.
        let cols = labels(&[
            "Report_Date_as_YYMMDD",
            "As_of_Date_In_Form_YYMMDD",
            "CFTC_Contract_Market_Code",
            "NonComm_Positions_Long_All",
            "NonComm_Positions_Short_All",
        ]);
        let mapping = ColumnMapping::discover(&cols).unwrap();
        assert_eq!(mapping.date, 0);
    }

    #[test]
    fn test_missing_role_rejects_whole_file() {
        // No column satisfies the short-interest keywords.
        let cols = labels(&[
            "As_of_Date_In_Form_YYMMDD",
            "CFTC_Contract_Market_Code",
            "NonComm_Positions_Long_All",
        ]);
        assert_eq!(ColumnMapping::discover(&cols), None);
    }

    #[test]
    fn test_empty_header_rejected() {
        assert_eq!(ColumnMapping::discover(&[]), None);
    }
}
