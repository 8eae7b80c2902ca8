use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, instrument};

use super::models::{ImportDataset, ImportGame, ImportSummary};
use crate::club::models::ClubModel;
use crate::club::repository::ClubRepository;
use crate::matches::models::MatchModel;
use crate::matches::repository::MatchRepository;
use crate::player::models::PlayerModel;
use crate::player::repository::PlayerRepository;
use crate::shared::AppError;

/// Service loading an external dataset of clubs, players and matches
/// into the store.
///
/// Inserts are plain store writes with no transaction around the run:
/// a failure partway through leaves the already-imported entities in
/// place and the error is propagated.
pub struct ImportService {
    clubs: Arc<dyn ClubRepository + Send + Sync>,
    players: Arc<dyn PlayerRepository + Send + Sync>,
    matches: Arc<dyn MatchRepository + Send + Sync>,
}

impl ImportService {
    pub fn new(
        clubs: Arc<dyn ClubRepository + Send + Sync>,
        players: Arc<dyn PlayerRepository + Send + Sync>,
        matches: Arc<dyn MatchRepository + Send + Sync>,
    ) -> Self {
        Self {
            clubs,
            players,
            matches,
        }
    }

    fn parse_game_date(game: &ImportGame) -> Result<NaiveDate, AppError> {
        NaiveDate::parse_from_str(&game.date, "%Y-%m-%d").map_err(|e| {
            AppError::Validation(format!(
                "Invalid date '{}' for match against {}: {}",
                game.date, game.opponent, e
            ))
        })
    }

    fn validate_game_scores(game: &ImportGame) -> Result<(), AppError> {
        for score in &game.player_scores {
            if score.shots_missed > score.shots_attempted {
                return Err(AppError::Validation(format!(
                    "Shots missed cannot exceed shots attempted for player {}",
                    score.player_id
                )));
            }
        }
        Ok(())
    }

    /// Imports every club with its players as child records and its
    /// games with parsed dates and derived pin totals
    #[instrument(skip(self, dataset))]
    pub async fn import_dataset(&self, dataset: ImportDataset) -> Result<ImportSummary, AppError> {
        let mut summary = ImportSummary::default();

        for club_data in dataset.clubs {
            let club = ClubModel::new(club_data.name);
            self.clubs.create_club(&club).await?;
            summary.clubs += 1;

            for player_data in club_data.players {
                let player = PlayerModel::new(player_data.full_name, player_data.position);
                self.players.add_player(&club.id, &player).await?;
                summary.players += 1;
            }

            for game_data in club_data.games {
                let date = Self::parse_game_date(&game_data)?;
                Self::validate_game_scores(&game_data)?;
                let match_record =
                    MatchModel::new(date, game_data.opponent, game_data.player_scores);
                self.matches.add_match(&club.id, &match_record).await?;
                summary.matches += 1;
            }

            info!(club_id = %club.id, name = %club.name, "Club imported");
        }

        info!(
            clubs = summary.clubs,
            players = summary.players,
            matches = summary.matches,
            "Data import completed"
        );
        Ok(summary)
    }
}
