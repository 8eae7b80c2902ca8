use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database model for a player document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerModel {
    pub id: String, // UUID v4 as string
    pub full_name: String,
    pub position: Option<String>,
    #[serde(flatten)]
    pub stats: PlayerStats,
}

impl PlayerModel {
    /// Creates a new player model with a generated ID and a zeroed
    /// aggregate block
    pub fn new(full_name: String, position: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            full_name,
            position,
            stats: PlayerStats::default(),
        }
    }
}

/// Partial update of player identity fields. Fields left as `None`
/// keep their stored value. The aggregate block is never touched here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerUpdate {
    pub full_name: Option<String>,
    pub position: Option<String>,
}

/// Aggregate training statistics maintained for each player.
///
/// The block is a pure sum/max reduction over the player's stored
/// training records: replaying all non-deleted records in any order
/// yields the same counters. Averages collapse to 0 when no trainings
/// are recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub training_count: u32,
    pub total_shots: u32,
    pub total_misses: u32,
    pub average_score: f64,
    pub average_misses: f64,
    pub best_training_score: u32,
}

impl PlayerStats {
    /// Returns the aggregate block with one training added.
    /// Caller guarantees `shots_missed <= shots_attempted`.
    pub fn with_training(&self, shots_attempted: u32, shots_missed: u32) -> Self {
        let training_count = self.training_count + 1;
        let total_shots = self.total_shots + shots_attempted;
        let total_misses = self.total_misses + shots_missed;
        let score = shots_attempted - shots_missed;

        Self {
            training_count,
            total_shots,
            total_misses,
            average_score: f64::from(total_shots - total_misses) / f64::from(training_count),
            average_misses: f64::from(total_misses) / f64::from(training_count),
            best_training_score: self.best_training_score.max(score),
        }
    }

    /// Returns the aggregate block with one training removed.
    ///
    /// The best training score is not recomputed: removing the record
    /// that produced it does not lower it. Counters saturate at zero.
    pub fn without_training(&self, shots_attempted: u32, shots_missed: u32) -> Self {
        let training_count = self.training_count.saturating_sub(1);
        let total_shots = self.total_shots.saturating_sub(shots_attempted);
        let total_misses = self.total_misses.saturating_sub(shots_missed);

        let (average_score, average_misses) = if training_count > 0 {
            (
                f64::from(total_shots.saturating_sub(total_misses)) / f64::from(training_count),
                f64::from(total_misses) / f64::from(training_count),
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            training_count,
            total_shots,
            total_misses,
            average_score,
            average_misses,
            best_training_score: self.best_training_score,
        }
    }
}
