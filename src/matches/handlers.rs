use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::MatchModel,
    service::MatchService,
    types::{MatchListQuery, MatchWriteRequest},
};
use crate::shared::{AppError, AppState};

fn match_service(state: &AppState) -> MatchService {
    MatchService::new(
        Arc::clone(&state.club_repository),
        Arc::clone(&state.match_repository),
    )
}

/// HTTP handler for adding a match to a club
///
/// POST /clubs/:club_id/matches
#[instrument(name = "add_match", skip(state))]
pub async fn add_match(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Json(request): Json<MatchWriteRequest>,
) -> Result<Json<MatchModel>, AppError> {
    info!(club_id = %club_id, opponent = %request.opponent, "Adding new match");

    let service = match_service(&state);
    let match_record = service.add_match(&club_id, request).await?;

    Ok(Json(match_record))
}

/// HTTP handler for listing matches of a club
///
/// GET /clubs/:club_id/matches
/// Supports an optional `player_id` query filter
#[instrument(name = "list_matches", skip(state))]
pub async fn list_matches(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<Vec<MatchModel>>, AppError> {
    let service = match_service(&state);
    let matches = service
        .list_matches(&club_id, query.player_id.as_deref())
        .await?;

    Ok(Json(matches))
}

/// HTTP handler for fetching a single match
///
/// GET /clubs/:club_id/matches/:match_id
#[instrument(name = "get_match", skip(state))]
pub async fn get_match(
    State(state): State<AppState>,
    Path((club_id, match_id)): Path<(String, String)>,
) -> Result<Json<MatchModel>, AppError> {
    let service = match_service(&state);
    let match_record = service.get_match(&club_id, &match_id).await?;

    Ok(Json(match_record))
}

/// HTTP handler for replacing a match
///
/// PUT /clubs/:club_id/matches/:match_id
#[instrument(name = "update_match", skip(state))]
pub async fn update_match(
    State(state): State<AppState>,
    Path((club_id, match_id)): Path<(String, String)>,
    Json(request): Json<MatchWriteRequest>,
) -> Result<Json<MatchModel>, AppError> {
    let service = match_service(&state);
    let match_record = service.update_match(&club_id, &match_id, request).await?;

    Ok(Json(match_record))
}

/// HTTP handler for deleting a match
///
/// DELETE /clubs/:club_id/matches/:match_id
#[instrument(name = "delete_match", skip(state))]
pub async fn delete_match(
    State(state): State<AppState>,
    Path((club_id, match_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let service = match_service(&state);
    service.delete_match(&club_id, &match_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
