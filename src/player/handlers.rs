use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{PlayerModel, PlayerUpdate},
    service::PlayerService,
    types::{PlayerCreateRequest, PlayerListQuery},
};
use crate::shared::{AppError, AppState};

fn player_service(state: &AppState) -> PlayerService {
    PlayerService::new(
        Arc::clone(&state.club_repository),
        Arc::clone(&state.player_repository),
    )
}

/// HTTP handler for adding a player to a club
///
/// POST /clubs/:club_id/players
#[instrument(name = "add_player", skip(state))]
pub async fn add_player(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Json(request): Json<PlayerCreateRequest>,
) -> Result<Json<PlayerModel>, AppError> {
    info!(club_id = %club_id, full_name = %request.full_name, "Adding new player");

    let service = player_service(&state);
    let player = service.add_player(&club_id, request).await?;

    Ok(Json(player))
}

/// HTTP handler for listing players of a club
///
/// GET /clubs/:club_id/players
/// Supports an optional `position` query filter
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Query(query): Query<PlayerListQuery>,
) -> Result<Json<Vec<PlayerModel>>, AppError> {
    let service = player_service(&state);
    let players = service
        .list_players(&club_id, query.position.as_deref())
        .await?;

    Ok(Json(players))
}

/// HTTP handler for fetching a single player
///
/// GET /clubs/:club_id/players/:player_id
#[instrument(name = "get_player", skip(state))]
pub async fn get_player(
    State(state): State<AppState>,
    Path((club_id, player_id)): Path<(String, String)>,
) -> Result<Json<PlayerModel>, AppError> {
    let service = player_service(&state);
    let player = service.get_player(&club_id, &player_id).await?;

    Ok(Json(player))
}

/// HTTP handler for updating player identity fields
///
/// PUT /clubs/:club_id/players/:player_id
#[instrument(name = "update_player", skip(state))]
pub async fn update_player(
    State(state): State<AppState>,
    Path((club_id, player_id)): Path<(String, String)>,
    Json(update): Json<PlayerUpdate>,
) -> Result<Json<PlayerModel>, AppError> {
    let service = player_service(&state);
    let player = service.update_player(&club_id, &player_id, update).await?;

    Ok(Json(player))
}

/// HTTP handler for deleting a player
///
/// DELETE /clubs/:club_id/players/:player_id
#[instrument(name = "delete_player", skip(state))]
pub async fn delete_player(
    State(state): State<AppState>,
    Path((club_id, player_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let service = player_service(&state);
    service.delete_player(&club_id, &player_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
