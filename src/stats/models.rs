use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database model for a training record.
///
/// Training records are immutable once written: they are created by an
/// explicit "add training" action and removed by an explicit "delete
/// training" action, nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingModel {
    pub id: String, // UUID v4 as string
    pub date: NaiveDate,
    pub shots_attempted: u32,
    pub shots_missed: u32,
}

impl TrainingModel {
    /// Creates a new training record with a generated ID.
    /// Caller guarantees `shots_missed <= shots_attempted`.
    pub fn new(date: NaiveDate, shots_attempted: u32, shots_missed: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            shots_attempted,
            shots_missed,
        }
    }

    /// The session score: shots attempted minus shots missed
    pub fn score(&self) -> u32 {
        self.shots_attempted - self.shots_missed
    }
}
