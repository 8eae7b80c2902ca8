use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::ClubModel;
use crate::shared::AppError;

/// Trait for club repository operations
#[async_trait]
pub trait ClubRepository {
    async fn create_club(&self, club: &ClubModel) -> Result<(), AppError>;
    async fn get_club(&self, club_id: &str) -> Result<Option<ClubModel>, AppError>;
    async fn list_clubs(&self) -> Result<Vec<ClubModel>, AppError>;
    async fn delete_club(&self, club_id: &str) -> Result<(), AppError>;
}

/// In-memory implementation of ClubRepository for development and testing
pub struct InMemoryClubRepository {
    clubs: Mutex<HashMap<String, ClubModel>>,
}

impl Default for InMemoryClubRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryClubRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            clubs: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ClubRepository for InMemoryClubRepository {
    #[instrument(skip(self, club))]
    async fn create_club(&self, club: &ClubModel) -> Result<(), AppError> {
        debug!(club_id = %club.id, name = %club.name, "Creating club in memory");

        let mut clubs = self.clubs.lock().unwrap();
        if clubs.contains_key(&club.id) {
            warn!(club_id = %club.id, "Club already exists in memory");
            return Err(AppError::DatabaseError("Club already exists".to_string()));
        }
        clubs.insert(club.id.clone(), club.clone());

        debug!(club_id = %club.id, "Club created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_club(&self, club_id: &str) -> Result<Option<ClubModel>, AppError> {
        debug!(club_id = %club_id, "Fetching club from memory");

        let clubs = self.clubs.lock().unwrap();
        let club = clubs.get(club_id).cloned();

        match &club {
            Some(c) => debug!(club_id = %club_id, name = %c.name, "Club found in memory"),
            None => debug!(club_id = %club_id, "Club not found in memory"),
        }

        Ok(club)
    }

    #[instrument(skip(self))]
    async fn list_clubs(&self) -> Result<Vec<ClubModel>, AppError> {
        debug!("Listing all clubs in memory");

        let clubs = self.clubs.lock().unwrap();
        let club_list = clubs.values().cloned().collect();

        debug!("Clubs listed successfully in memory");
        Ok(club_list)
    }

    #[instrument(skip(self))]
    async fn delete_club(&self, club_id: &str) -> Result<(), AppError> {
        debug!(club_id = %club_id, "Deleting club from memory");

        let mut clubs = self.clubs.lock().unwrap();
        if clubs.remove(club_id).is_none() {
            warn!(club_id = %club_id, "Club not found for deletion in memory");
            return Err(AppError::NotFound("Club not found".to_string()));
        }

        debug!(club_id = %club_id, "Club deleted successfully from memory");
        Ok(())
    }
}
