use serde::{Deserialize, Serialize};

use crate::matches::models::PlayerScore;

/// External dataset shape for one-shot bulk imports.
///
/// Dates arrive as `YYYY-MM-DD` strings and are parsed into the
/// store's native date representation during import.
#[derive(Debug, Deserialize)]
pub struct ImportDataset {
    pub clubs: Vec<ImportClub>,
}

#[derive(Debug, Deserialize)]
pub struct ImportClub {
    pub name: String,
    #[serde(default)]
    pub players: Vec<ImportPlayer>,
    #[serde(default)]
    pub games: Vec<ImportGame>,
}

#[derive(Debug, Deserialize)]
pub struct ImportPlayer {
    pub full_name: String,
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportGame {
    pub date: String,
    pub opponent: String,
    #[serde(default)]
    pub player_scores: Vec<PlayerScore>,
}

/// Counts of the entities created by an import run
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub clubs: u32,
    pub players: u32,
    pub matches: u32,
}
