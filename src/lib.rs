// Library crate for the bowling club management server
// This file exposes the public API for integration tests

pub mod club;
pub mod import;
pub mod matches;
pub mod player;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use club::{models::ClubModel, repository::ClubRepository};
pub use matches::{models::MatchModel, repository::MatchRepository};
pub use player::{models::PlayerModel, models::PlayerStats, repository::PlayerRepository};
pub use shared::{AppError, AppState};
pub use stats::{models::TrainingModel, repository::TrainingRepository, service::StatsService};
