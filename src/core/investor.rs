use serde::{Deserialize, Serialize};

/// An investor suggested by the backend. Rendered as received.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InvestorMatch {
    pub name: String,
    #[serde(default)]
    pub firm: String,
    #[serde(default)]
    pub match_score: f64,
    #[serde(default)]
    pub investment_range: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub portfolio: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Sorts best matches first. Scores that do not compare keep their order.
pub fn rank_matches(investors: &mut [InvestorMatch]) {
    investors.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
