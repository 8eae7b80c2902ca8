use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{models::ClubModel, service::ClubService, types::ClubCreateRequest};
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new club
///
/// POST /clubs
#[instrument(name = "create_club", skip(state))]
pub async fn create_club(
    State(state): State<AppState>,
    Json(request): Json<ClubCreateRequest>,
) -> Result<Json<ClubModel>, AppError> {
    info!(name = %request.name, "Creating new club");

    let service = ClubService::new(Arc::clone(&state.club_repository));
    let club = service.create_club(request).await?;

    Ok(Json(club))
}

/// HTTP handler for listing all clubs
///
/// GET /clubs
#[instrument(name = "list_clubs", skip(state))]
pub async fn list_clubs(State(state): State<AppState>) -> Result<Json<Vec<ClubModel>>, AppError> {
    let service = ClubService::new(Arc::clone(&state.club_repository));
    let clubs = service.list_clubs().await?;

    Ok(Json(clubs))
}

/// HTTP handler for fetching a single club
///
/// GET /clubs/:club_id
#[instrument(name = "get_club_details", skip(state))]
pub async fn get_club_details(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
) -> Result<Json<ClubModel>, AppError> {
    let service = ClubService::new(Arc::clone(&state.club_repository));
    let club = service.get_club_details(&club_id).await?;

    Ok(Json(club))
}

/// HTTP handler for deleting a club
///
/// DELETE /clubs/:club_id
#[instrument(name = "delete_club", skip(state))]
pub async fn delete_club(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let service = ClubService::new(Arc::clone(&state.club_repository));
    service.delete_club(&club_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
