use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{models::TrainingModel, repository::TrainingRepository, types::TrainingCreateRequest};
use crate::player::models::PlayerStats;
use crate::player::repository::PlayerRepository;
use crate::shared::AppError;

/// Service maintaining each player's aggregate block alongside the
/// training records it is derived from.
///
/// Every operation is a single read-modify-write against the player
/// document: read the current aggregate, fold the change in, write the
/// block back. The record write and the aggregate write are two
/// separate store calls with no transaction between them; a failure
/// after the record write leaves the aggregate stale and the error is
/// propagated without rolling the record back. Concurrent operations
/// on the same player are not serialized; operations on different
/// players are fully independent.
pub struct StatsService {
    players: Arc<dyn PlayerRepository + Send + Sync>,
    trainings: Arc<dyn TrainingRepository + Send + Sync>,
}

impl StatsService {
    pub fn new(
        players: Arc<dyn PlayerRepository + Send + Sync>,
        trainings: Arc<dyn TrainingRepository + Send + Sync>,
    ) -> Self {
        Self { players, trainings }
    }

    fn validate_shot_counts(shots_attempted: u32, shots_missed: u32) -> Result<(), AppError> {
        if shots_missed > shots_attempted {
            return Err(AppError::Validation(
                "Shots missed cannot exceed shots attempted".to_string(),
            ));
        }
        Ok(())
    }

    async fn fetch_stats(&self, club_id: &str, player_id: &str) -> Result<PlayerStats, AppError> {
        let player = self
            .players
            .get_player(club_id, player_id)
            .await?
            .ok_or(AppError::NotFound("Player not found".to_string()))?;
        Ok(player.stats)
    }

    /// Records a training session and folds it into the player's
    /// aggregate block. Validation failures and missing players are
    /// reported before anything is written.
    #[instrument(skip(self, request))]
    pub async fn record_training(
        &self,
        club_id: &str,
        player_id: &str,
        request: TrainingCreateRequest,
    ) -> Result<TrainingModel, AppError> {
        Self::validate_shot_counts(request.shots_attempted, request.shots_missed)?;

        let stats = self.fetch_stats(club_id, player_id).await?;

        let training =
            TrainingModel::new(request.date, request.shots_attempted, request.shots_missed);
        debug!(training_id = %training.id, "Generated training ID");

        self.trainings
            .add_training(club_id, player_id, &training)
            .await?;

        let updated = stats.with_training(training.shots_attempted, training.shots_missed);
        self.players
            .update_stats(club_id, player_id, &updated)
            .await?;

        info!(
            club_id = %club_id,
            player_id = %player_id,
            training_id = %training.id,
            training_count = updated.training_count,
            best_training_score = updated.best_training_score,
            "Training recorded successfully"
        );
        Ok(training)
    }

    /// Deletes a training record and subtracts it from the player's
    /// aggregate block. The best training score is not recomputed from
    /// the remaining records.
    #[instrument(skip(self))]
    pub async fn delete_training(
        &self,
        club_id: &str,
        player_id: &str,
        training_id: &str,
    ) -> Result<(), AppError> {
        let training = self
            .trainings
            .get_training(club_id, player_id, training_id)
            .await?
            .ok_or(AppError::NotFound("Training not found".to_string()))?;

        let stats = self.fetch_stats(club_id, player_id).await?;

        self.trainings
            .delete_training(club_id, player_id, training_id)
            .await?;

        let updated = stats.without_training(training.shots_attempted, training.shots_missed);
        self.players
            .update_stats(club_id, player_id, &updated)
            .await?;

        info!(
            club_id = %club_id,
            player_id = %player_id,
            training_id = %training_id,
            training_count = updated.training_count,
            "Training deleted and player statistics updated successfully"
        );
        Ok(())
    }

    /// Resets the player's aggregate block to its zero state. The
    /// underlying training records are left in place.
    #[instrument(skip(self))]
    pub async fn reset_stats(&self, club_id: &str, player_id: &str) -> Result<(), AppError> {
        // A missing player must surface NotFound before any write.
        self.fetch_stats(club_id, player_id).await?;

        self.players
            .update_stats(club_id, player_id, &PlayerStats::default())
            .await?;

        info!(club_id = %club_id, player_id = %player_id, "Player statistics reset successfully");
        Ok(())
    }

    /// Lists all training records of a player
    #[instrument(skip(self))]
    pub async fn get_player_trainings(
        &self,
        club_id: &str,
        player_id: &str,
    ) -> Result<Vec<TrainingModel>, AppError> {
        self.trainings.get_player_trainings(club_id, player_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::models::{PlayerModel, PlayerUpdate};
    use crate::player::repository::InMemoryPlayerRepository;
    use crate::stats::repository::InMemoryTrainingRepository;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rstest::rstest;

    const CLUB: &str = "club-1";

    fn request(attempted: u32, missed: u32) -> TrainingCreateRequest {
        TrainingCreateRequest {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            shots_attempted: attempted,
            shots_missed: missed,
        }
    }

    async fn setup() -> (
        StatsService,
        Arc<InMemoryPlayerRepository>,
        Arc<InMemoryTrainingRepository>,
        String,
    ) {
        let players = Arc::new(InMemoryPlayerRepository::new());
        let trainings = Arc::new(InMemoryTrainingRepository::new());

        let player = PlayerModel::new("Ivan Horvat".to_string(), None);
        players.add_player(CLUB, &player).await.unwrap();

        (
            StatsService::new(players.clone(), trainings.clone()),
            players,
            trainings,
            player.id,
        )
    }

    async fn stats_of(players: &InMemoryPlayerRepository, player_id: &str) -> PlayerStats {
        players
            .get_player(CLUB, player_id)
            .await
            .unwrap()
            .unwrap()
            .stats
    }

    #[tokio::test]
    async fn test_first_training_aggregate() {
        let (service, players, _trainings, player_id) = setup().await;

        service
            .record_training(CLUB, &player_id, request(500, 10))
            .await
            .unwrap();

        let stats = stats_of(&players, &player_id).await;
        assert_eq!(stats.training_count, 1);
        assert_eq!(stats.total_shots, 500);
        assert_eq!(stats.total_misses, 10);
        assert_eq!(stats.average_score, 490.0);
        assert_eq!(stats.average_misses, 10.0);
        assert_eq!(stats.best_training_score, 490);
    }

    #[tokio::test]
    async fn test_record_then_delete_scenario() {
        // 500/10, then 480/20, then delete the second record.
        let (service, players, _trainings, player_id) = setup().await;

        service
            .record_training(CLUB, &player_id, request(500, 10))
            .await
            .unwrap();
        let second = service
            .record_training(CLUB, &player_id, request(480, 20))
            .await
            .unwrap();

        let stats = stats_of(&players, &player_id).await;
        assert_eq!(stats.training_count, 2);
        assert_eq!(stats.total_shots, 980);
        assert_eq!(stats.total_misses, 30);
        assert_eq!(stats.average_score, 475.0);
        assert_eq!(stats.average_misses, 15.0);
        assert_eq!(stats.best_training_score, 490);

        service
            .delete_training(CLUB, &player_id, &second.id)
            .await
            .unwrap();

        let stats = stats_of(&players, &player_id).await;
        assert_eq!(stats.training_count, 1);
        assert_eq!(stats.total_shots, 500);
        assert_eq!(stats.total_misses, 10);
        assert_eq!(stats.average_score, 490.0);
        assert_eq!(stats.average_misses, 10.0);
        assert_eq!(stats.best_training_score, 490);
    }

    #[tokio::test]
    async fn test_aggregate_is_sum_and_max_over_all_trainings() {
        let (service, players, _trainings, player_id) = setup().await;

        let sessions = [(500u32, 10u32), (480, 20), (450, 0), (300, 120)];
        for (attempted, missed) in sessions {
            service
                .record_training(CLUB, &player_id, request(attempted, missed))
                .await
                .unwrap();
        }

        let total_shots: u32 = sessions.iter().map(|(a, _)| a).sum();
        let total_misses: u32 = sessions.iter().map(|(_, m)| m).sum();
        let best = sessions.iter().map(|(a, m)| a - m).max().unwrap();
        let count = sessions.len() as u32;

        let stats = stats_of(&players, &player_id).await;
        assert_eq!(stats.training_count, count);
        assert_eq!(stats.total_shots, total_shots);
        assert_eq!(stats.total_misses, total_misses);
        assert_eq!(stats.best_training_score, best);
        assert_eq!(
            stats.average_score,
            f64::from(total_shots - total_misses) / f64::from(count)
        );
        assert_eq!(stats.average_misses, f64::from(total_misses) / f64::from(count));
    }

    #[tokio::test]
    async fn test_aggregate_is_order_independent() {
        let (service, players, _trainings, player_id) = setup().await;

        let forward = [(500u32, 10u32), (480, 20), (450, 0)];
        for (attempted, missed) in forward {
            service
                .record_training(CLUB, &player_id, request(attempted, missed))
                .await
                .unwrap();
        }
        let forward_stats = stats_of(&players, &player_id).await;

        let (service2, players2, _trainings2, player_id2) = setup().await;
        for (attempted, missed) in forward.iter().rev() {
            service2
                .record_training(CLUB, &player_id2, request(*attempted, *missed))
                .await
                .unwrap();
        }
        let reverse_stats = stats_of(&players2, &player_id2).await;

        assert_eq!(forward_stats, reverse_stats);
    }

    #[tokio::test]
    async fn test_delete_only_training_restores_zero_counts() {
        let (service, players, _trainings, player_id) = setup().await;

        let training = service
            .record_training(CLUB, &player_id, request(500, 10))
            .await
            .unwrap();
        service
            .delete_training(CLUB, &player_id, &training.id)
            .await
            .unwrap();

        let stats = stats_of(&players, &player_id).await;
        assert_eq!(stats.training_count, 0);
        assert_eq!(stats.total_shots, 0);
        assert_eq!(stats.total_misses, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.average_misses, 0.0);
        // The best score stays as the deleted record left it.
        assert_eq!(stats.best_training_score, 490);
    }

    #[tokio::test]
    async fn test_reset_then_record_matches_fresh_player() {
        let (service, players, _trainings, player_id) = setup().await;

        service
            .record_training(CLUB, &player_id, request(500, 10))
            .await
            .unwrap();
        service
            .record_training(CLUB, &player_id, request(480, 20))
            .await
            .unwrap();
        service.reset_stats(CLUB, &player_id).await.unwrap();
        service
            .record_training(CLUB, &player_id, request(300, 50))
            .await
            .unwrap();

        let stats = stats_of(&players, &player_id).await;
        assert_eq!(stats, PlayerStats::default().with_training(300, 50));
    }

    #[tokio::test]
    async fn test_reset_zeroes_block_but_keeps_trainings() {
        let (service, players, _trainings, player_id) = setup().await;

        service
            .record_training(CLUB, &player_id, request(500, 10))
            .await
            .unwrap();
        service
            .record_training(CLUB, &player_id, request(480, 20))
            .await
            .unwrap();

        service.reset_stats(CLUB, &player_id).await.unwrap();

        let stats = stats_of(&players, &player_id).await;
        assert_eq!(stats, PlayerStats::default());

        // The underlying records remain retrievable from the store.
        let trainings = service
            .get_player_trainings(CLUB, &player_id)
            .await
            .unwrap();
        assert_eq!(trainings.len(), 2);
    }

    #[rstest]
    #[case(10, 11)]
    #[case(0, 1)]
    #[case(100, 500)]
    #[tokio::test]
    async fn test_record_training_rejects_excess_misses(
        #[case] attempted: u32,
        #[case] missed: u32,
    ) {
        let (service, players, _trainings, player_id) = setup().await;

        let result = service
            .record_training(CLUB, &player_id, request(attempted, missed))
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));

        // Nothing was written: no training record, aggregate untouched.
        let trainings = service
            .get_player_trainings(CLUB, &player_id)
            .await
            .unwrap();
        assert!(trainings.is_empty());
        assert_eq!(stats_of(&players, &player_id).await, PlayerStats::default());
    }

    #[tokio::test]
    async fn test_record_training_unknown_player() {
        let (service, _players, trainings, _player_id) = setup().await;

        let result = service
            .record_training(CLUB, "missing-player", request(500, 10))
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));

        let stored = trainings
            .get_player_trainings(CLUB, "missing-player")
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_delete_training_unknown_record() {
        let (service, _players, _trainings, player_id) = setup().await;

        let result = service
            .delete_training(CLUB, &player_id, "missing-training")
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_reset_stats_unknown_player() {
        let (service, _players, _trainings, _player_id) = setup().await;

        let result = service.reset_stats(CLUB, "missing-player").await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_independent_players_record_concurrently() {
        let players = Arc::new(InMemoryPlayerRepository::new());
        let trainings = Arc::new(InMemoryTrainingRepository::new());
        let service = Arc::new(StatsService::new(players.clone(), trainings.clone()));

        let mut player_ids = Vec::new();
        for i in 0..5 {
            let player = PlayerModel::new(format!("Player {}", i), None);
            players.add_player(CLUB, &player).await.unwrap();
            player_ids.push(player.id);
        }

        let handles = player_ids
            .iter()
            .map(|player_id| {
                let service = Arc::clone(&service);
                let player_id = player_id.clone();
                tokio::spawn(async move {
                    service
                        .record_training(CLUB, &player_id, request(500, 10))
                        .await
                })
            })
            .collect::<Vec<_>>();

        let results = futures::future::join_all(handles).await;
        for result in results {
            result.unwrap().unwrap();
        }

        for player_id in &player_ids {
            let stats = stats_of(&players, player_id).await;
            assert_eq!(stats.training_count, 1);
            assert_eq!(stats.best_training_score, 490);
        }
    }

    /// Player repository whose stats writes always fail, for observing
    /// the record-write / aggregate-write gap.
    struct StatsWriteFailingRepository {
        inner: InMemoryPlayerRepository,
    }

    #[async_trait]
    impl crate::player::repository::PlayerRepository for StatsWriteFailingRepository {
        async fn add_player(&self, club_id: &str, player: &PlayerModel) -> Result<(), AppError> {
            self.inner.add_player(club_id, player).await
        }

        async fn get_player(
            &self,
            club_id: &str,
            player_id: &str,
        ) -> Result<Option<PlayerModel>, AppError> {
            self.inner.get_player(club_id, player_id).await
        }

        async fn get_players(&self, club_id: &str) -> Result<Vec<PlayerModel>, AppError> {
            self.inner.get_players(club_id).await
        }

        async fn get_players_by_position(
            &self,
            club_id: &str,
            position: &str,
        ) -> Result<Vec<PlayerModel>, AppError> {
            self.inner.get_players_by_position(club_id, position).await
        }

        async fn update_player(
            &self,
            club_id: &str,
            player_id: &str,
            update: &PlayerUpdate,
        ) -> Result<(), AppError> {
            self.inner.update_player(club_id, player_id, update).await
        }

        async fn update_stats(
            &self,
            _club_id: &str,
            _player_id: &str,
            _stats: &PlayerStats,
        ) -> Result<(), AppError> {
            Err(AppError::DatabaseError("stats write refused".to_string()))
        }

        async fn delete_player(&self, club_id: &str, player_id: &str) -> Result<(), AppError> {
            self.inner.delete_player(club_id, player_id).await
        }
    }

    #[tokio::test]
    async fn test_failed_aggregate_write_keeps_training_record() {
        // The record write and the aggregate write are separate store
        // calls; when the second fails the first is not rolled back.
        let failing = StatsWriteFailingRepository {
            inner: InMemoryPlayerRepository::new(),
        };
        let player = PlayerModel::new("Ivan Horvat".to_string(), None);
        failing.inner.add_player(CLUB, &player).await.unwrap();

        let trainings = Arc::new(InMemoryTrainingRepository::new());
        let service = StatsService::new(Arc::new(failing), trainings.clone());

        let result = service
            .record_training(CLUB, &player.id, request(500, 10))
            .await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::DatabaseError(_)));

        let stored = trainings
            .get_player_trainings(CLUB, &player.id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }
}
