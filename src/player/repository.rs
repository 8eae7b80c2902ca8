use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{PlayerModel, PlayerStats, PlayerUpdate};
use crate::shared::AppError;

/// Trait for player repository operations.
///
/// Players live in a per-club collection; every lookup is scoped by
/// `club_id`. No ordering or cross-document guarantees are assumed.
#[async_trait]
pub trait PlayerRepository {
    async fn add_player(&self, club_id: &str, player: &PlayerModel) -> Result<(), AppError>;
    async fn get_player(
        &self,
        club_id: &str,
        player_id: &str,
    ) -> Result<Option<PlayerModel>, AppError>;
    async fn get_players(&self, club_id: &str) -> Result<Vec<PlayerModel>, AppError>;
    async fn get_players_by_position(
        &self,
        club_id: &str,
        position: &str,
    ) -> Result<Vec<PlayerModel>, AppError>;
    async fn update_player(
        &self,
        club_id: &str,
        player_id: &str,
        update: &PlayerUpdate,
    ) -> Result<(), AppError>;

    /// Overwrites the player's aggregate block. This is the only write
    /// path for statistics; identity fields are untouched.
    async fn update_stats(
        &self,
        club_id: &str,
        player_id: &str,
        stats: &PlayerStats,
    ) -> Result<(), AppError>;
    async fn delete_player(&self, club_id: &str, player_id: &str) -> Result<(), AppError>;
}

/// In-memory implementation of PlayerRepository for development and testing
pub struct InMemoryPlayerRepository {
    // club_id -> player_id -> player
    players: Mutex<HashMap<String, HashMap<String, PlayerModel>>>,
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            players: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    #[instrument(skip(self, player))]
    async fn add_player(&self, club_id: &str, player: &PlayerModel) -> Result<(), AppError> {
        debug!(club_id = %club_id, player_id = %player.id, "Adding player in memory");

        let mut players = self.players.lock().unwrap();
        let club_players = players.entry(club_id.to_string()).or_default();
        if club_players.contains_key(&player.id) {
            warn!(player_id = %player.id, "Player already exists in memory");
            return Err(AppError::DatabaseError("Player already exists".to_string()));
        }
        club_players.insert(player.id.clone(), player.clone());

        debug!(player_id = %player.id, "Player added successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player(
        &self,
        club_id: &str,
        player_id: &str,
    ) -> Result<Option<PlayerModel>, AppError> {
        debug!(club_id = %club_id, player_id = %player_id, "Fetching player from memory");

        let players = self.players.lock().unwrap();
        let player = players
            .get(club_id)
            .and_then(|club_players| club_players.get(player_id))
            .cloned();

        Ok(player)
    }

    #[instrument(skip(self))]
    async fn get_players(&self, club_id: &str) -> Result<Vec<PlayerModel>, AppError> {
        debug!(club_id = %club_id, "Listing players from memory");

        let players = self.players.lock().unwrap();
        let player_list = players
            .get(club_id)
            .map(|club_players| club_players.values().cloned().collect())
            .unwrap_or_default();

        Ok(player_list)
    }

    #[instrument(skip(self))]
    async fn get_players_by_position(
        &self,
        club_id: &str,
        position: &str,
    ) -> Result<Vec<PlayerModel>, AppError> {
        debug!(club_id = %club_id, position = %position, "Listing players by position from memory");

        let players = self.players.lock().unwrap();
        let player_list = players
            .get(club_id)
            .map(|club_players| {
                club_players
                    .values()
                    .filter(|p| p.position.as_deref() == Some(position))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(player_list)
    }

    #[instrument(skip(self, update))]
    async fn update_player(
        &self,
        club_id: &str,
        player_id: &str,
        update: &PlayerUpdate,
    ) -> Result<(), AppError> {
        debug!(club_id = %club_id, player_id = %player_id, "Updating player in memory");

        let mut players = self.players.lock().unwrap();
        let Some(player) = players
            .get_mut(club_id)
            .and_then(|club_players| club_players.get_mut(player_id))
        else {
            warn!(player_id = %player_id, "Player not found for update in memory");
            return Err(AppError::NotFound("Player not found".to_string()));
        };

        if let Some(full_name) = &update.full_name {
            player.full_name = full_name.clone();
        }
        if let Some(position) = &update.position {
            player.position = Some(position.clone());
        }

        debug!(player_id = %player_id, "Player updated successfully in memory");
        Ok(())
    }

    #[instrument(skip(self, stats))]
    async fn update_stats(
        &self,
        club_id: &str,
        player_id: &str,
        stats: &PlayerStats,
    ) -> Result<(), AppError> {
        debug!(club_id = %club_id, player_id = %player_id, "Updating player stats in memory");

        let mut players = self.players.lock().unwrap();
        let Some(player) = players
            .get_mut(club_id)
            .and_then(|club_players| club_players.get_mut(player_id))
        else {
            warn!(player_id = %player_id, "Player not found for stats update in memory");
            return Err(AppError::NotFound("Player not found".to_string()));
        };

        player.stats = stats.clone();

        debug!(player_id = %player_id, "Player stats updated successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_player(&self, club_id: &str, player_id: &str) -> Result<(), AppError> {
        debug!(club_id = %club_id, player_id = %player_id, "Deleting player from memory");

        let mut players = self.players.lock().unwrap();
        let removed = players
            .get_mut(club_id)
            .and_then(|club_players| club_players.remove(player_id));
        if removed.is_none() {
            warn!(player_id = %player_id, "Player not found for deletion in memory");
            return Err(AppError::NotFound("Player not found".to_string()));
        }

        debug!(player_id = %player_id, "Player deleted successfully from memory");
        Ok(())
    }
}

/// PostgreSQL implementation of player repository
pub struct PostgresPlayerRepository {
    pool: PgPool,
}

impl PostgresPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_player(row: &sqlx::postgres::PgRow) -> PlayerModel {
        PlayerModel {
            id: row.get("id"),
            full_name: row.get("full_name"),
            position: row.get("position"),
            stats: PlayerStats {
                training_count: row.get::<i32, _>("training_count") as u32,
                total_shots: row.get::<i32, _>("total_shots") as u32,
                total_misses: row.get::<i32, _>("total_misses") as u32,
                average_score: row.get("average_score"),
                average_misses: row.get("average_misses"),
                best_training_score: row.get::<i32, _>("best_training_score") as u32,
            },
        }
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    #[instrument(skip(self, player))]
    async fn add_player(&self, club_id: &str, player: &PlayerModel) -> Result<(), AppError> {
        debug!(club_id = %club_id, player_id = %player.id, "Adding player in database");

        sqlx::query(
            "INSERT INTO players (id, club_id, full_name, position, training_count, total_shots, total_misses, average_score, average_misses, best_training_score) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&player.id)
        .bind(club_id)
        .bind(&player.full_name)
        .bind(&player.position)
        .bind(player.stats.training_count as i32)
        .bind(player.stats.total_shots as i32)
        .bind(player.stats.total_misses as i32)
        .bind(player.stats.average_score)
        .bind(player.stats.average_misses)
        .bind(player.stats.best_training_score as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to add player in database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(player_id = %player.id, "Player added successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player(
        &self,
        club_id: &str,
        player_id: &str,
    ) -> Result<Option<PlayerModel>, AppError> {
        debug!(club_id = %club_id, player_id = %player_id, "Fetching player from database");

        let row = sqlx::query(
            "SELECT id, full_name, position, training_count, total_shots, total_misses, average_score, average_misses, best_training_score \
             FROM players WHERE club_id = $1 AND id = $2",
        )
        .bind(club_id)
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, player_id = %player_id, "Failed to fetch player from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.as_ref().map(Self::row_to_player))
    }

    #[instrument(skip(self))]
    async fn get_players(&self, club_id: &str) -> Result<Vec<PlayerModel>, AppError> {
        debug!(club_id = %club_id, "Listing players from database");

        let rows = sqlx::query(
            "SELECT id, full_name, position, training_count, total_shots, total_misses, average_score, average_misses, best_training_score \
             FROM players WHERE club_id = $1",
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, club_id = %club_id, "Failed to list players from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(rows.iter().map(Self::row_to_player).collect())
    }

    #[instrument(skip(self))]
    async fn get_players_by_position(
        &self,
        club_id: &str,
        position: &str,
    ) -> Result<Vec<PlayerModel>, AppError> {
        debug!(club_id = %club_id, position = %position, "Listing players by position from database");

        let rows = sqlx::query(
            "SELECT id, full_name, position, training_count, total_shots, total_misses, average_score, average_misses, best_training_score \
             FROM players WHERE club_id = $1 AND position = $2",
        )
        .bind(club_id)
        .bind(position)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, club_id = %club_id, "Failed to list players by position from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(rows.iter().map(Self::row_to_player).collect())
    }

    #[instrument(skip(self, update))]
    async fn update_player(
        &self,
        club_id: &str,
        player_id: &str,
        update: &PlayerUpdate,
    ) -> Result<(), AppError> {
        debug!(club_id = %club_id, player_id = %player_id, "Updating player in database");

        let result = sqlx::query(
            "UPDATE players SET full_name = COALESCE($3, full_name), position = COALESCE($4, position) \
             WHERE club_id = $1 AND id = $2",
        )
        .bind(club_id)
        .bind(player_id)
        .bind(&update.full_name)
        .bind(&update.position)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, player_id = %player_id, "Failed to update player in database");
            AppError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            warn!(player_id = %player_id, "Player not found for update");
            return Err(AppError::NotFound("Player not found".to_string()));
        }

        debug!(player_id = %player_id, "Player updated successfully in database");
        Ok(())
    }

    #[instrument(skip(self, stats))]
    async fn update_stats(
        &self,
        club_id: &str,
        player_id: &str,
        stats: &PlayerStats,
    ) -> Result<(), AppError> {
        debug!(club_id = %club_id, player_id = %player_id, "Updating player stats in database");

        let result = sqlx::query(
            "UPDATE players SET training_count = $3, total_shots = $4, total_misses = $5, average_score = $6, average_misses = $7, best_training_score = $8 \
             WHERE club_id = $1 AND id = $2",
        )
        .bind(club_id)
        .bind(player_id)
        .bind(stats.training_count as i32)
        .bind(stats.total_shots as i32)
        .bind(stats.total_misses as i32)
        .bind(stats.average_score)
        .bind(stats.average_misses)
        .bind(stats.best_training_score as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, player_id = %player_id, "Failed to update player stats in database");
            AppError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            warn!(player_id = %player_id, "Player not found for stats update");
            return Err(AppError::NotFound("Player not found".to_string()));
        }

        debug!(player_id = %player_id, "Player stats updated successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_player(&self, club_id: &str, player_id: &str) -> Result<(), AppError> {
        debug!(club_id = %club_id, player_id = %player_id, "Deleting player from database");

        let result = sqlx::query("DELETE FROM players WHERE club_id = $1 AND id = $2")
            .bind(club_id)
            .bind(player_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, player_id = %player_id, "Failed to delete player from database");
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            warn!(player_id = %player_id, "Player not found for deletion");
            return Err(AppError::NotFound("Player not found".to_string()));
        }

        debug!(player_id = %player_id, "Player deleted successfully from database");
        Ok(())
    }
}
