use chrono::NaiveDate;
use serde::Deserialize;

/// Request payload for recording a training session
#[derive(Debug, Deserialize)]
pub struct TrainingCreateRequest {
    pub date: NaiveDate,
    pub shots_attempted: u32,
    pub shots_missed: u32,
}
