use serde::Deserialize;

/// Request payload for creating a new club
#[derive(Debug, Deserialize)]
pub struct ClubCreateRequest {
    pub name: String,
}
