use serde::{Deserialize, Serialize};

/// One AI-synthesized destination suggestion. `cost` and `best_time` are
/// opaque display strings (e.g. "$1500 per week"), never parsed numerics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub city: String,
    pub country: String,
    pub reason: String,
    pub cost: String,
    pub best_time: String,
    pub photo_url: String,
    pub details: DisplayHints,
}

/// Decorative values for the client cards. Both are randomly generated at
/// synthesis time and are NOT provider-sourced ratings; clients should not
/// present them as verified data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayHints {
    /// Random in 3..=5.
    pub rating_guess: u8,
    /// Random in 1..=3.
    pub price_level_guess: u8,
}
