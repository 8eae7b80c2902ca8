use serde::Deserialize;

/// Request payload for adding a player to a club
#[derive(Debug, Deserialize)]
pub struct PlayerCreateRequest {
    pub full_name: String,
    pub position: Option<String>,
}

/// Query parameters for listing players
#[derive(Debug, Deserialize)]
pub struct PlayerListQuery {
    pub position: Option<String>,
}
