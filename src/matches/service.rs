use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{MatchModel, PlayerScore},
    repository::MatchRepository,
    types::MatchWriteRequest,
};
use crate::club::repository::ClubRepository;
use crate::shared::AppError;

/// Service for handling match business logic.
///
/// Match results are standalone documents: they never feed the player
/// aggregate block, which is maintained from training records only.
pub struct MatchService {
    clubs: Arc<dyn ClubRepository + Send + Sync>,
    matches: Arc<dyn MatchRepository + Send + Sync>,
}

impl MatchService {
    pub fn new(
        clubs: Arc<dyn ClubRepository + Send + Sync>,
        matches: Arc<dyn MatchRepository + Send + Sync>,
    ) -> Self {
        Self { clubs, matches }
    }

    async fn ensure_club_exists(&self, club_id: &str) -> Result<(), AppError> {
        if self.clubs.get_club(club_id).await?.is_none() {
            return Err(AppError::NotFound("Club not found".to_string()));
        }
        Ok(())
    }

    fn validate_scores(player_scores: &[PlayerScore]) -> Result<(), AppError> {
        for score in player_scores {
            if score.shots_missed > score.shots_attempted {
                return Err(AppError::Validation(format!(
                    "Shots missed cannot exceed shots attempted for player {}",
                    score.player_id
                )));
            }
        }
        Ok(())
    }

    /// Creates a match with a server-derived pin total
    #[instrument(skip(self, request))]
    pub async fn add_match(
        &self,
        club_id: &str,
        request: MatchWriteRequest,
    ) -> Result<MatchModel, AppError> {
        self.ensure_club_exists(club_id).await?;
        Self::validate_scores(&request.player_scores)?;

        let match_record = MatchModel::new(request.date, request.opponent, request.player_scores);
        debug!(match_id = %match_record.id, "Generated match ID");

        self.matches.add_match(club_id, &match_record).await?;

        info!(
            club_id = %club_id,
            match_id = %match_record.id,
            opponent = %match_record.opponent,
            total_pins = match_record.total_pins,
            "Match added successfully"
        );
        Ok(match_record)
    }

    /// Gets a match by ID within a club
    #[instrument(skip(self))]
    pub async fn get_match(&self, club_id: &str, match_id: &str) -> Result<MatchModel, AppError> {
        self.matches
            .get_match(club_id, match_id)
            .await?
            .ok_or(AppError::NotFound("Match not found".to_string()))
    }

    /// Lists matches of a club, optionally narrowed to those a given
    /// player appears in
    #[instrument(skip(self))]
    pub async fn list_matches(
        &self,
        club_id: &str,
        player_id: Option<&str>,
    ) -> Result<Vec<MatchModel>, AppError> {
        let mut matches = self.matches.get_matches(club_id).await?;

        if let Some(player_id) = player_id {
            matches.retain(|m| m.involves_player(player_id));
        }

        info!(club_id = %club_id, match_count = matches.len(), "Matches retrieved successfully");
        Ok(matches)
    }

    /// Replaces a match's fields; the pin total is derived again from
    /// the new scoresheet
    #[instrument(skip(self, request))]
    pub async fn update_match(
        &self,
        club_id: &str,
        match_id: &str,
        request: MatchWriteRequest,
    ) -> Result<MatchModel, AppError> {
        Self::validate_scores(&request.player_scores)?;

        let existing = self.get_match(club_id, match_id).await?;

        let updated = MatchModel {
            id: existing.id,
            date: request.date,
            opponent: request.opponent,
            total_pins: MatchModel::total_pins_of(&request.player_scores),
            player_scores: request.player_scores,
        };

        self.matches.update_match(club_id, &updated).await?;

        info!(
            club_id = %club_id,
            match_id = %match_id,
            total_pins = updated.total_pins,
            "Match updated successfully"
        );
        Ok(updated)
    }

    /// Deletes a match by ID
    #[instrument(skip(self))]
    pub async fn delete_match(&self, club_id: &str, match_id: &str) -> Result<(), AppError> {
        self.matches.delete_match(club_id, match_id).await?;

        info!(club_id = %club_id, match_id = %match_id, "Match deleted successfully");
        Ok(())
    }
}
