use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database model for a club document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubModel {
    pub id: String, // UUID v4 as string
    pub name: String,
}

impl ClubModel {
    /// Creates a new club model with a generated ID
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
        }
    }
}
