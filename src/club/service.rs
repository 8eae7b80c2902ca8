use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{models::ClubModel, repository::ClubRepository, types::ClubCreateRequest};
use crate::shared::AppError;

/// Service for handling club business logic
pub struct ClubService {
    repository: Arc<dyn ClubRepository + Send + Sync>,
}

impl ClubService {
    pub fn new(repository: Arc<dyn ClubRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Creates a new club with a generated ID
    #[instrument(skip(self))]
    pub async fn create_club(&self, request: ClubCreateRequest) -> Result<ClubModel, AppError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Club name must not be empty".to_string()));
        }

        let club = ClubModel::new(name.to_string());
        debug!(club_id = %club.id, "Generated club ID");

        self.repository.create_club(&club).await?;

        info!(club_id = %club.id, name = %club.name, "Club created successfully");
        Ok(club)
    }

    /// Gets club details by ID
    #[instrument(skip(self))]
    pub async fn get_club_details(&self, club_id: &str) -> Result<ClubModel, AppError> {
        self.repository
            .get_club(club_id)
            .await?
            .ok_or(AppError::NotFound("Club not found".to_string()))
    }

    /// Lists all clubs
    #[instrument(skip(self))]
    pub async fn list_clubs(&self) -> Result<Vec<ClubModel>, AppError> {
        let clubs = self.repository.list_clubs().await?;

        info!(club_count = clubs.len(), "Clubs retrieved successfully");
        Ok(clubs)
    }

    /// Deletes a club by ID
    #[instrument(skip(self))]
    pub async fn delete_club(&self, club_id: &str) -> Result<(), AppError> {
        self.repository.delete_club(club_id).await?;

        info!(club_id = %club_id, "Club deleted successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::repository::InMemoryClubRepository;

    fn service_with_repo() -> (ClubService, Arc<InMemoryClubRepository>) {
        let repo = Arc::new(InMemoryClubRepository::new());
        (ClubService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_create_club_success() {
        let (service, repo) = service_with_repo();

        let club = service
            .create_club(ClubCreateRequest {
                name: "KK Zagreb".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(club.name, "KK Zagreb");
        assert!(!club.id.is_empty());

        let stored = repo.get_club(&club.id).await.unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_create_club_trims_name() {
        let (service, _repo) = service_with_repo();

        let club = service
            .create_club(ClubCreateRequest {
                name: "  KK Zagreb  ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(club.name, "KK Zagreb");
    }

    #[tokio::test]
    async fn test_create_club_rejects_empty_name() {
        let (service, _repo) = service_with_repo();

        let result = service
            .create_club(ClubCreateRequest {
                name: "   ".to_string(),
            })
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_club_details_not_found() {
        let (service, _repo) = service_with_repo();

        let result = service.get_club_details("missing-club").await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_clubs() {
        let (service, _repo) = service_with_repo();

        service
            .create_club(ClubCreateRequest {
                name: "KK Zagreb".to_string(),
            })
            .await
            .unwrap();
        service
            .create_club(ClubCreateRequest {
                name: "KK Split".to_string(),
            })
            .await
            .unwrap();

        let clubs = service.list_clubs().await.unwrap();
        assert_eq!(clubs.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_club() {
        let (service, _repo) = service_with_repo();

        let club = service
            .create_club(ClubCreateRequest {
                name: "KK Zagreb".to_string(),
            })
            .await
            .unwrap();

        service.delete_club(&club.id).await.unwrap();

        let result = service.get_club_details(&club.id).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }
}
