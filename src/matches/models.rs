use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One player's line in a match scoresheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player_id: String,
    pub shots_attempted: u32,
    pub shots_missed: u32,
    pub won_set: bool,
}

impl PlayerScore {
    /// Pins knocked down by this player: shots attempted minus misses
    pub fn pins(&self) -> u32 {
        self.shots_attempted - self.shots_missed
    }
}

/// Database model for a match document.
///
/// `total_pins` is derived from the scoresheet and recomputed on every
/// write. Match results never feed the player aggregate block; only
/// training records do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchModel {
    pub id: String, // UUID v4 as string
    pub date: NaiveDate,
    pub opponent: String,
    pub player_scores: Vec<PlayerScore>,
    pub total_pins: u32,
}

impl MatchModel {
    /// Creates a new match model with a generated ID and derived total.
    /// Caller guarantees `shots_missed <= shots_attempted` per entry.
    pub fn new(date: NaiveDate, opponent: String, player_scores: Vec<PlayerScore>) -> Self {
        let total_pins = Self::total_pins_of(&player_scores);
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            opponent,
            player_scores,
            total_pins,
        }
    }

    pub fn total_pins_of(player_scores: &[PlayerScore]) -> u32 {
        player_scores.iter().map(PlayerScore::pins).sum()
    }

    /// Whether a given player appears in this match's scoresheet
    pub fn involves_player(&self, player_id: &str) -> bool {
        self.player_scores
            .iter()
            .any(|score| score.player_id == player_id)
    }
}
