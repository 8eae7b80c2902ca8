use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{ImportDataset, ImportSummary},
    service::ImportService,
};
use crate::shared::{AppError, AppState};

/// HTTP handler for one-shot bulk data import
///
/// POST /admin/import
#[instrument(name = "import_data", skip(state, dataset))]
pub async fn import_data(
    State(state): State<AppState>,
    Json(dataset): Json<ImportDataset>,
) -> Result<Json<ImportSummary>, AppError> {
    info!(club_count = dataset.clubs.len(), "Starting data import");

    let service = ImportService::new(
        Arc::clone(&state.club_repository),
        Arc::clone(&state.player_repository),
        Arc::clone(&state.match_repository),
    );
    let summary = service.import_dataset(dataset).await?;

    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::post,
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn test_app() -> Router {
        let app_state = AppStateBuilder::new().build();
        Router::new()
            .route("/admin/import", post(import_data))
            .with_state(app_state)
    }

    #[tokio::test]
    async fn test_import_data_handler() {
        let app = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/admin/import")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{
                    "clubs": [
                        {
                            "name": "KK Zagreb",
                            "players": [{"full_name": "Ivan Horvat"}],
                            "games": [{"date": "2024-04-20", "opponent": "KK Split"}]
                        }
                    ]
                }"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let summary: ImportSummary = serde_json::from_slice(&body).unwrap();

        assert_eq!(summary.clubs, 1);
        assert_eq!(summary.players, 1);
        assert_eq!(summary.matches, 1);
    }

    #[tokio::test]
    async fn test_import_data_handler_malformed_date() {
        let app = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/admin/import")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{
                    "clubs": [
                        {"name": "KK Zagreb", "games": [{"date": "nope", "opponent": "KK Split"}]}
                    ]
                }"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
