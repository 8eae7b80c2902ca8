use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::MatchModel;
use crate::shared::AppError;

/// Trait for match repository operations.
///
/// Matches live in a per-club collection; every call is scoped by
/// `club_id`.
#[async_trait]
pub trait MatchRepository {
    async fn add_match(&self, club_id: &str, match_record: &MatchModel) -> Result<(), AppError>;
    async fn get_match(
        &self,
        club_id: &str,
        match_id: &str,
    ) -> Result<Option<MatchModel>, AppError>;
    async fn get_matches(&self, club_id: &str) -> Result<Vec<MatchModel>, AppError>;
    async fn update_match(&self, club_id: &str, match_record: &MatchModel)
        -> Result<(), AppError>;
    async fn delete_match(&self, club_id: &str, match_id: &str) -> Result<(), AppError>;
}

/// In-memory implementation of MatchRepository for development and testing
pub struct InMemoryMatchRepository {
    // club_id -> match_id -> match
    matches: Mutex<HashMap<String, HashMap<String, MatchModel>>>,
}

impl Default for InMemoryMatchRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMatchRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            matches: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    #[instrument(skip(self, match_record))]
    async fn add_match(&self, club_id: &str, match_record: &MatchModel) -> Result<(), AppError> {
        debug!(club_id = %club_id, match_id = %match_record.id, "Adding match in memory");

        let mut matches = self.matches.lock().unwrap();
        let club_matches = matches.entry(club_id.to_string()).or_default();
        if club_matches.contains_key(&match_record.id) {
            warn!(match_id = %match_record.id, "Match already exists in memory");
            return Err(AppError::DatabaseError("Match already exists".to_string()));
        }
        club_matches.insert(match_record.id.clone(), match_record.clone());

        debug!(match_id = %match_record.id, "Match added successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_match(
        &self,
        club_id: &str,
        match_id: &str,
    ) -> Result<Option<MatchModel>, AppError> {
        debug!(club_id = %club_id, match_id = %match_id, "Fetching match from memory");

        let matches = self.matches.lock().unwrap();
        let match_record = matches
            .get(club_id)
            .and_then(|club_matches| club_matches.get(match_id))
            .cloned();

        Ok(match_record)
    }

    #[instrument(skip(self))]
    async fn get_matches(&self, club_id: &str) -> Result<Vec<MatchModel>, AppError> {
        debug!(club_id = %club_id, "Listing matches from memory");

        let matches = self.matches.lock().unwrap();
        let match_list = matches
            .get(club_id)
            .map(|club_matches| club_matches.values().cloned().collect())
            .unwrap_or_default();

        Ok(match_list)
    }

    #[instrument(skip(self, match_record))]
    async fn update_match(
        &self,
        club_id: &str,
        match_record: &MatchModel,
    ) -> Result<(), AppError> {
        debug!(club_id = %club_id, match_id = %match_record.id, "Updating match in memory");

        let mut matches = self.matches.lock().unwrap();
        let Some(club_matches) = matches.get_mut(club_id) else {
            warn!(match_id = %match_record.id, "Match not found for update in memory");
            return Err(AppError::NotFound("Match not found".to_string()));
        };
        if !club_matches.contains_key(&match_record.id) {
            warn!(match_id = %match_record.id, "Match not found for update in memory");
            return Err(AppError::NotFound("Match not found".to_string()));
        }
        club_matches.insert(match_record.id.clone(), match_record.clone());

        debug!(match_id = %match_record.id, "Match updated successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_match(&self, club_id: &str, match_id: &str) -> Result<(), AppError> {
        debug!(club_id = %club_id, match_id = %match_id, "Deleting match from memory");

        let mut matches = self.matches.lock().unwrap();
        let removed = matches
            .get_mut(club_id)
            .and_then(|club_matches| club_matches.remove(match_id));
        if removed.is_none() {
            warn!(match_id = %match_id, "Match not found for deletion in memory");
            return Err(AppError::NotFound("Match not found".to_string()));
        }

        debug!(match_id = %match_id, "Match deleted successfully from memory");
        Ok(())
    }
}
