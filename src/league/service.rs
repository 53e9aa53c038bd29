use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{Member, NewMember, NewTournament, ScoreCard, Tournament, HOLES_PER_ROUND},
    repository::LeagueRepository,
    LeagueError,
};

/// Member, tournament and score card bookkeeping around the adjustment engine.
pub struct LeagueService {
    repository: Arc<dyn LeagueRepository>,
}

impl LeagueService {
    pub fn new(repository: Arc<dyn LeagueRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_member(&self, member: NewMember) -> Result<Member, LeagueError> {
        let member = self.repository.create_member(member).await?;
        info!(member_id = member.id, name = %member.name, "Member created");
        Ok(member)
    }

    pub async fn list_members(&self) -> Result<Vec<Member>, LeagueError> {
        self.repository.list_members().await
    }

    pub async fn create_tournament(
        &self,
        tournament: NewTournament,
    ) -> Result<Tournament, LeagueError> {
        let tournament = self.repository.create_tournament(tournament).await?;
        info!(tournament_id = tournament.id, name = %tournament.name, "Tournament created");
        Ok(tournament)
    }

    pub async fn get_tournament(&self, tournament_id: i64) -> Result<Tournament, LeagueError> {
        self.repository
            .get_tournament(tournament_id)
            .await?
            .ok_or(LeagueError::TournamentNotFound(tournament_id))
    }

    /// Records a complete 18-hole round in one go.
    #[instrument(skip(self, strokes))]
    pub async fn record_round(
        &self,
        tournament_id: i64,
        member_id: i64,
        strokes: [u8; HOLES_PER_ROUND],
    ) -> Result<ScoreCard, LeagueError> {
        self.ensure_open(tournament_id).await?;
        if self
            .repository
            .get_score_card(tournament_id, member_id)
            .await?
            .is_some()
        {
            return Err(LeagueError::DuplicateScoreCard {
                tournament_id,
                member_id,
            });
        }

        let mut card = self.open_card(tournament_id, member_id).await?;
        card.set_round(strokes);
        self.repository.save_score_card(&card).await?;

        info!(
            card_id = card.id,
            total = ?card.total_score,
            "Round recorded"
        );
        Ok(card)
    }

    /// Records a single hole, opening the card on the first write.
    #[instrument(skip(self))]
    pub async fn record_hole(
        &self,
        tournament_id: i64,
        member_id: i64,
        hole: u8,
        strokes: u8,
    ) -> Result<ScoreCard, LeagueError> {
        if !(1..=HOLES_PER_ROUND as u8).contains(&hole) {
            return Err(LeagueError::InvalidHole(hole));
        }
        self.ensure_open(tournament_id).await?;

        let mut card = match self
            .repository
            .get_score_card(tournament_id, member_id)
            .await?
        {
            Some(card) => card,
            None => self.open_card(tournament_id, member_id).await?,
        };
        card.set_hole(hole, strokes)?;
        self.repository.save_score_card(&card).await?;

        debug!(card_id = card.id, total = ?card.total_score, "Hole recorded");
        Ok(card)
    }

    /// Gives a member a new id. Score cards follow the member.
    pub async fn renumber_member(&self, member_id: i64, new_id: i64) -> Result<Member, LeagueError> {
        self.repository.renumber_member(member_id, new_id).await
    }

    async fn ensure_open(&self, tournament_id: i64) -> Result<(), LeagueError> {
        let tournament = self.get_tournament(tournament_id).await?;
        if tournament.finalized {
            return Err(LeagueError::TournamentFinalized(tournament_id));
        }
        Ok(())
    }

    /// Freezes the member's live handicap into a new card and counts the round.
    async fn open_card(&self, tournament_id: i64, member_id: i64) -> Result<ScoreCard, LeagueError> {
        let baseline = self.repository.get_member_handicap(member_id).await?;
        let card = self
            .repository
            .create_score_card(tournament_id, member_id, baseline)
            .await?;
        self.repository
            .increment_tournaments_played(member_id)
            .await?;
        debug!(card_id = card.id, baseline, "Score card opened");
        Ok(card)
    }
}
