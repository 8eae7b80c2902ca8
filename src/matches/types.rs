use chrono::NaiveDate;
use serde::Deserialize;

use super::models::PlayerScore;

/// Request payload for creating or replacing a match.
/// `total_pins` is always derived server-side from the scoresheet.
#[derive(Debug, Deserialize)]
pub struct MatchWriteRequest {
    pub date: NaiveDate,
    pub opponent: String,
    #[serde(default)]
    pub player_scores: Vec<PlayerScore>,
}

/// Query parameters for listing matches
#[derive(Debug, Deserialize)]
pub struct MatchListQuery {
    pub player_id: Option<String>,
}
