use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::club::repository::ClubRepository;
use crate::matches::repository::MatchRepository;
use crate::player::repository::PlayerRepository;
use crate::stats::repository::TrainingRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub club_repository: Arc<dyn ClubRepository + Send + Sync>,
    pub player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    pub training_repository: Arc<dyn TrainingRepository + Send + Sync>,
    pub match_repository: Arc<dyn MatchRepository + Send + Sync>,
}

impl AppState {
    pub fn new(
        club_repository: Arc<dyn ClubRepository + Send + Sync>,
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        training_repository: Arc<dyn TrainingRepository + Send + Sync>,
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
    ) -> Self {
        Self {
            club_repository,
            player_repository,
            training_repository,
            match_repository,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
