//! Macro event-risk scan over recent headlines.

use crate::domain::entities::headline::Headline;

/// Headlines considered per scan.
pub const MAX_HEADLINES: usize = 8;

/// Matched as uppercase substrings. "FED " keeps its trailing space so that
/// "FEDEX" and "FEDERAL" do not match.
pub const FED_KEYWORDS: [&str; 7] = ["FED ", "POWELL", "FOMC", "CPI", "INFLATION", "PPI", "RATE HIKE"];

pub struct EventRiskScanner {
    keywords: Vec<String>,
}

impl EventRiskScanner {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_uppercase()).collect(),
        }
    }

    /// Risky headlines among the first [`MAX_HEADLINES`], in input order.
    pub fn scan(&self, headlines: &[Headline]) -> Vec<Headline> {
        headlines
            .iter()
            .take(MAX_HEADLINES)
            .filter(|h| self.is_risky(h))
            .cloned()
            .collect()
    }

    pub fn is_risky(&self, headline: &Headline) -> bool {
        let title = headline.title.to_uppercase();
        self.keywords.iter().any(|kw| title.contains(kw.as_str()))
    }
}

impl Default for EventRiskScanner {
    fn default() -> Self {
        Self::new(FED_KEYWORDS.iter().map(|k| k.to_string()).collect())
    }
}
