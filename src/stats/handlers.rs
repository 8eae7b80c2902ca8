use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{models::TrainingModel, service::StatsService, types::TrainingCreateRequest};
use crate::shared::{AppError, AppState};

fn stats_service(state: &AppState) -> StatsService {
    StatsService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.training_repository),
    )
}

/// HTTP handler for recording a training session
///
/// POST /clubs/:club_id/players/:player_id/trainings
#[instrument(name = "record_training", skip(state))]
pub async fn record_training(
    State(state): State<AppState>,
    Path((club_id, player_id)): Path<(String, String)>,
    Json(request): Json<TrainingCreateRequest>,
) -> Result<Json<TrainingModel>, AppError> {
    info!(
        club_id = %club_id,
        player_id = %player_id,
        shots_attempted = request.shots_attempted,
        shots_missed = request.shots_missed,
        "Recording training"
    );

    let service = stats_service(&state);
    let training = service.record_training(&club_id, &player_id, request).await?;

    Ok(Json(training))
}

/// HTTP handler for listing a player's training records
///
/// GET /clubs/:club_id/players/:player_id/trainings
#[instrument(name = "list_trainings", skip(state))]
pub async fn list_trainings(
    State(state): State<AppState>,
    Path((club_id, player_id)): Path<(String, String)>,
) -> Result<Json<Vec<TrainingModel>>, AppError> {
    let service = stats_service(&state);
    let trainings = service.get_player_trainings(&club_id, &player_id).await?;

    Ok(Json(trainings))
}

/// HTTP handler for deleting a training record
///
/// DELETE /clubs/:club_id/players/:player_id/trainings/:training_id
#[instrument(name = "delete_training", skip(state))]
pub async fn delete_training(
    State(state): State<AppState>,
    Path((club_id, player_id, training_id)): Path<(String, String, String)>,
) -> Result<StatusCode, AppError> {
    let service = stats_service(&state);
    service
        .delete_training(&club_id, &player_id, &training_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// HTTP handler for resetting a player's aggregate statistics
///
/// POST /clubs/:club_id/players/:player_id/reset-stats
#[instrument(name = "reset_stats", skip(state))]
pub async fn reset_stats(
    State(state): State<AppState>,
    Path((club_id, player_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let service = stats_service(&state);
    service.reset_stats(&club_id, &player_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
