//! The ordered chart manifest for the daily metals page.

/// One manifest row: a chart filename and its page heading.
#[derive(Debug, Clone)]
pub struct ManifestEntry {
    pub filename: String,
    pub title: String,
}

impl ManifestEntry {
    pub fn new(filename: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            title: title.into(),
        }
    }

    /// Entry whose title is derived from the filename.
    pub fn from_filename(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let title = title_from_filename(&filename);
        Self { filename, title }
    }
}

/// Derive a human heading from a chart filename:
/// "Fig3_CFTC_Silver.png" -> "3 CFTC Silver".
pub fn title_from_filename(filename: &str) -> String {
    filename
        .trim_end_matches(".png")
        .replace("Fig", "")
        .replace('_', " ")
        .trim()
        .to_string()
}

/// Page order for the full daily report. Order here decides display
/// order on the published page.
pub fn default_manifest() -> Vec<ManifestEntry> {
    [
        // Core overview
        "1_Gold_Premium.png",
        "4_Silver_Premium.png",
        "8_Platinum_Premium.png",
        // Onshore vs offshore relative strength
        "Fig_Compare_Gold.png",
        "Fig_Compare_Silver.png",
        // Forward structure
        "Fig6_Forward_Structure.png",
        // CFTC speculative positioning
        "Fig_CFTC_Gold.png",
        "Fig3_CFTC_Silver.png",
        "Fig4_CFTC_Platinum.png",
        // Supply, demand and stocks
        "2_Gold_Vol_OI.png",
        "3_Gold_Vol_Single.png",
        "5_Silver_Vol_OI.png",
        "6_Silver_Vol_Single.png",
        "7_Silver_Stocks.png",
        "9_Platinum_Vol_OI.png",
    ]
    .into_iter()
    .map(ManifestEntry::from_filename)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("Fig3_CFTC_Silver.png"), "3 CFTC Silver");
        assert_eq!(title_from_filename("1_Gold_Premium.png"), "1 Gold Premium");
    }

    #[test]
    fn test_default_manifest_order() {
        let manifest = default_manifest();
        assert_eq!(manifest.len(), 15);
        assert_eq!(manifest[0].filename, "1_Gold_Premium.png");
        // Comparison figures sit between the premiums and the curve chart.
        assert_eq!(manifest[3].filename, "Fig_Compare_Gold.png");
        assert_eq!(manifest[4].filename, "Fig_Compare_Silver.png");
        assert_eq!(manifest[5].filename, "Fig6_Forward_Structure.png");
    }
}
