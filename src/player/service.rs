use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{PlayerModel, PlayerUpdate},
    repository::PlayerRepository,
    types::PlayerCreateRequest,
};
use crate::club::repository::ClubRepository;
use crate::shared::AppError;

/// Service for handling player business logic
pub struct PlayerService {
    clubs: Arc<dyn ClubRepository + Send + Sync>,
    players: Arc<dyn PlayerRepository + Send + Sync>,
}

impl PlayerService {
    pub fn new(
        clubs: Arc<dyn ClubRepository + Send + Sync>,
        players: Arc<dyn PlayerRepository + Send + Sync>,
    ) -> Self {
        Self { clubs, players }
    }

    async fn ensure_club_exists(&self, club_id: &str) -> Result<(), AppError> {
        if self.clubs.get_club(club_id).await?.is_none() {
            return Err(AppError::NotFound("Club not found".to_string()));
        }
        Ok(())
    }

    /// Adds a player to a club with a zeroed aggregate block
    #[instrument(skip(self))]
    pub async fn add_player(
        &self,
        club_id: &str,
        request: PlayerCreateRequest,
    ) -> Result<PlayerModel, AppError> {
        self.ensure_club_exists(club_id).await?;

        let full_name = request.full_name.trim();
        if full_name.is_empty() {
            return Err(AppError::Validation(
                "Player name must not be empty".to_string(),
            ));
        }

        let player = PlayerModel::new(full_name.to_string(), request.position);
        debug!(player_id = %player.id, "Generated player ID");

        self.players.add_player(club_id, &player).await?;

        info!(
            club_id = %club_id,
            player_id = %player.id,
            full_name = %player.full_name,
            "Player added successfully"
        );
        Ok(player)
    }

    /// Gets a player by ID within a club
    #[instrument(skip(self))]
    pub async fn get_player(
        &self,
        club_id: &str,
        player_id: &str,
    ) -> Result<PlayerModel, AppError> {
        self.players
            .get_player(club_id, player_id)
            .await?
            .ok_or(AppError::NotFound("Player not found".to_string()))
    }

    /// Lists players of a club, optionally filtered by position
    #[instrument(skip(self))]
    pub async fn list_players(
        &self,
        club_id: &str,
        position: Option<&str>,
    ) -> Result<Vec<PlayerModel>, AppError> {
        let players = match position {
            Some(position) => self.players.get_players_by_position(club_id, position).await?,
            None => self.players.get_players(club_id).await?,
        };

        info!(club_id = %club_id, player_count = players.len(), "Players retrieved successfully");
        Ok(players)
    }

    /// Updates player identity fields; the aggregate block is preserved
    #[instrument(skip(self, update))]
    pub async fn update_player(
        &self,
        club_id: &str,
        player_id: &str,
        update: PlayerUpdate,
    ) -> Result<PlayerModel, AppError> {
        if let Some(full_name) = &update.full_name {
            if full_name.trim().is_empty() {
                return Err(AppError::Validation(
                    "Player name must not be empty".to_string(),
                ));
            }
        }

        self.players.update_player(club_id, player_id, &update).await?;

        info!(club_id = %club_id, player_id = %player_id, "Player updated successfully");
        self.get_player(club_id, player_id).await
    }

    /// Deletes a player by ID
    #[instrument(skip(self))]
    pub async fn delete_player(&self, club_id: &str, player_id: &str) -> Result<(), AppError> {
        self.players.delete_player(club_id, player_id).await?;

        info!(club_id = %club_id, player_id = %player_id, "Player deleted successfully");
        Ok(())
    }
}
