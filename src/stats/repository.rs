use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::TrainingModel;
use crate::shared::AppError;

/// Trait for training record repository operations.
///
/// Trainings live in a per-player collection nested under a club;
/// every call is scoped by both owners. Records are only ever added
/// and deleted, never updated.
#[async_trait]
pub trait TrainingRepository {
    async fn add_training(
        &self,
        club_id: &str,
        player_id: &str,
        training: &TrainingModel,
    ) -> Result<(), AppError>;
    async fn get_training(
        &self,
        club_id: &str,
        player_id: &str,
        training_id: &str,
    ) -> Result<Option<TrainingModel>, AppError>;
    async fn get_player_trainings(
        &self,
        club_id: &str,
        player_id: &str,
    ) -> Result<Vec<TrainingModel>, AppError>;
    async fn delete_training(
        &self,
        club_id: &str,
        player_id: &str,
        training_id: &str,
    ) -> Result<(), AppError>;
}

/// In-memory implementation of TrainingRepository for development and testing
pub struct InMemoryTrainingRepository {
    // (club_id, player_id) -> training_id -> training
    trainings: Mutex<HashMap<(String, String), HashMap<String, TrainingModel>>>,
}

impl Default for InMemoryTrainingRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTrainingRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            trainings: Mutex::new(HashMap::new()),
        }
    }

    fn owner_key(club_id: &str, player_id: &str) -> (String, String) {
        (club_id.to_string(), player_id.to_string())
    }
}

#[async_trait]
impl TrainingRepository for InMemoryTrainingRepository {
    #[instrument(skip(self, training))]
    async fn add_training(
        &self,
        club_id: &str,
        player_id: &str,
        training: &TrainingModel,
    ) -> Result<(), AppError> {
        debug!(
            club_id = %club_id,
            player_id = %player_id,
            training_id = %training.id,
            "Adding training in memory"
        );

        let mut trainings = self.trainings.lock().unwrap();
        let player_trainings = trainings
            .entry(Self::owner_key(club_id, player_id))
            .or_default();
        if player_trainings.contains_key(&training.id) {
            warn!(training_id = %training.id, "Training already exists in memory");
            return Err(AppError::DatabaseError(
                "Training already exists".to_string(),
            ));
        }
        player_trainings.insert(training.id.clone(), training.clone());

        debug!(training_id = %training.id, "Training added successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_training(
        &self,
        club_id: &str,
        player_id: &str,
        training_id: &str,
    ) -> Result<Option<TrainingModel>, AppError> {
        debug!(
            club_id = %club_id,
            player_id = %player_id,
            training_id = %training_id,
            "Fetching training from memory"
        );

        let trainings = self.trainings.lock().unwrap();
        let training = trainings
            .get(&Self::owner_key(club_id, player_id))
            .and_then(|player_trainings| player_trainings.get(training_id))
            .cloned();

        Ok(training)
    }

    #[instrument(skip(self))]
    async fn get_player_trainings(
        &self,
        club_id: &str,
        player_id: &str,
    ) -> Result<Vec<TrainingModel>, AppError> {
        debug!(club_id = %club_id, player_id = %player_id, "Listing trainings from memory");

        let trainings = self.trainings.lock().unwrap();
        let training_list = trainings
            .get(&Self::owner_key(club_id, player_id))
            .map(|player_trainings| player_trainings.values().cloned().collect())
            .unwrap_or_default();

        Ok(training_list)
    }

    #[instrument(skip(self))]
    async fn delete_training(
        &self,
        club_id: &str,
        player_id: &str,
        training_id: &str,
    ) -> Result<(), AppError> {
        debug!(
            club_id = %club_id,
            player_id = %player_id,
            training_id = %training_id,
            "Deleting training from memory"
        );

        let mut trainings = self.trainings.lock().unwrap();
        let removed = trainings
            .get_mut(&Self::owner_key(club_id, player_id))
            .and_then(|player_trainings| player_trainings.remove(training_id));
        if removed.is_none() {
            warn!(training_id = %training_id, "Training not found for deletion in memory");
            return Err(AppError::NotFound("Training not found".to_string()));
        }

        debug!(training_id = %training_id, "Training deleted successfully from memory");
        Ok(())
    }
}

/// PostgreSQL implementation of training repository
pub struct PostgresTrainingRepository {
    pool: PgPool,
}

impl PostgresTrainingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_training(row: &sqlx::postgres::PgRow) -> TrainingModel {
        TrainingModel {
            id: row.get("id"),
            date: row.get("date"),
            shots_attempted: row.get::<i32, _>("shots_attempted") as u32,
            shots_missed: row.get::<i32, _>("shots_missed") as u32,
        }
    }
}

#[async_trait]
impl TrainingRepository for PostgresTrainingRepository {
    #[instrument(skip(self, training))]
    async fn add_training(
        &self,
        club_id: &str,
        player_id: &str,
        training: &TrainingModel,
    ) -> Result<(), AppError> {
        debug!(
            club_id = %club_id,
            player_id = %player_id,
            training_id = %training.id,
            "Adding training in database"
        );

        sqlx::query(
            "INSERT INTO trainings (id, club_id, player_id, date, shots_attempted, shots_missed) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&training.id)
        .bind(club_id)
        .bind(player_id)
        .bind(training.date)
        .bind(training.shots_attempted as i32)
        .bind(training.shots_missed as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to add training in database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(training_id = %training.id, "Training added successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_training(
        &self,
        club_id: &str,
        player_id: &str,
        training_id: &str,
    ) -> Result<Option<TrainingModel>, AppError> {
        debug!(
            club_id = %club_id,
            player_id = %player_id,
            training_id = %training_id,
            "Fetching training from database"
        );

        let row = sqlx::query(
            "SELECT id, date, shots_attempted, shots_missed FROM trainings \
             WHERE club_id = $1 AND player_id = $2 AND id = $3",
        )
        .bind(club_id)
        .bind(player_id)
        .bind(training_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, training_id = %training_id, "Failed to fetch training from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.as_ref().map(Self::row_to_training))
    }

    #[instrument(skip(self))]
    async fn get_player_trainings(
        &self,
        club_id: &str,
        player_id: &str,
    ) -> Result<Vec<TrainingModel>, AppError> {
        debug!(club_id = %club_id, player_id = %player_id, "Listing trainings from database");

        let rows = sqlx::query(
            "SELECT id, date, shots_attempted, shots_missed FROM trainings \
             WHERE club_id = $1 AND player_id = $2",
        )
        .bind(club_id)
        .bind(player_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, player_id = %player_id, "Failed to list trainings from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(rows.iter().map(Self::row_to_training).collect())
    }

    #[instrument(skip(self))]
    async fn delete_training(
        &self,
        club_id: &str,
        player_id: &str,
        training_id: &str,
    ) -> Result<(), AppError> {
        debug!(
            club_id = %club_id,
            player_id = %player_id,
            training_id = %training_id,
            "Deleting training from database"
        );

        let result = sqlx::query(
            "DELETE FROM trainings WHERE club_id = $1 AND player_id = $2 AND id = $3",
        )
        .bind(club_id)
        .bind(player_id)
        .bind(training_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, training_id = %training_id, "Failed to delete training from database");
            AppError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            warn!(training_id = %training_id, "Training not found for deletion");
            return Err(AppError::NotFound("Training not found".to_string()));
        }

        debug!(training_id = %training_id, "Training deleted successfully from database");
        Ok(())
    }
}
