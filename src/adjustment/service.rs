use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::{AdjustmentLogEntry, AdjustmentSnapshot, HandicapEngine};
use crate::leaderboard::{partition, TournamentStandings};
use crate::league::{LeagueError, LeagueRepository, ScoreRow, Tournament};

/// What a finalize run changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizeSummary {
    pub tournament_id: i64,
    /// Members whose `gross_win` flag was set by this run.
    pub gross_winners: Vec<i64>,
    pub log: Vec<AdjustmentLogEntry>,
}

pub struct AdjustmentService {
    repository: Arc<dyn LeagueRepository>,
    engine: HandicapEngine,
    finalize_mutexes: Arc<RwLock<HashMap<i64, Arc<AsyncMutex<()>>>>>,
}

impl AdjustmentService {
    pub fn new(repository: Arc<dyn LeagueRepository>) -> Self {
        Self::with_engine(repository, HandicapEngine::default())
    }

    pub fn with_engine(repository: Arc<dyn LeagueRepository>, engine: HandicapEngine) -> Self {
        Self {
            repository,
            engine,
            finalize_mutexes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Computes the tournament's adjustments from the live handicaps and
    /// writes them back. Does not look at the finalized flag.
    #[instrument(skip(self))]
    pub async fn apply(&self, tournament_id: i64) -> Result<Vec<AdjustmentLogEntry>, LeagueError> {
        let rows = self.tournament_rows(tournament_id).await?;
        if rows.is_empty() {
            debug!("No score cards, nothing to adjust");
            return Ok(Vec::new());
        }

        let outcome = self
            .engine
            .compute_adjustments(&AdjustmentSnapshot::live(rows));

        for (card_id, baseline) in &outcome.pinned_baselines {
            self.repository
                .set_card_baseline(*card_id, *baseline)
                .await?;
        }
        for (member_id, handicap) in &outcome.handicaps {
            self.repository
                .set_member_handicap(*member_id, *handicap)
                .await?;
        }

        info!(
            adjusted = outcome.handicaps.len(),
            entries = outcome.log.len(),
            "Handicap adjustments applied"
        );
        Ok(outcome.log)
    }

    /// Recomputes a past tournament's log from the persisted baselines. The
    /// `new` column shows each member's handicap as it is today. Read-only.
    #[instrument(skip(self))]
    pub async fn replay(&self, tournament_id: i64) -> Result<Vec<AdjustmentLogEntry>, LeagueError> {
        let rows = self.tournament_rows(tournament_id).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut log = self
            .engine
            .compute_adjustments(&AdjustmentSnapshot::from_baselines(rows))
            .log;

        for entry in &mut log {
            let live = self.repository.get_member_handicap(entry.member_id).await?;
            if live != entry.new {
                warn!(
                    member_id = entry.member_id,
                    recomputed = entry.new,
                    live,
                    "Live handicap drifted from replayed adjustment"
                );
            }
            entry.set_new(live);
        }

        debug!(entries = log.len(), "Adjustments replayed");
        Ok(log)
    }

    /// Closes the tournament exactly once: applies the adjustments, flags the
    /// gross winners and marks it finalized.
    #[instrument(skip(self))]
    pub async fn finalize(&self, tournament_id: i64) -> Result<FinalizeSummary, LeagueError> {
        let finalize_lock = self.finalize_lock(tournament_id).await;
        let _guard = finalize_lock.lock().await;

        let tournament = self.tournament(tournament_id).await?;
        if tournament.finalized {
            warn!("Tournament already finalized");
            return Err(LeagueError::AlreadyFinalized(tournament_id));
        }

        let rows = self.repository.list_score_rows(tournament_id).await?;
        let boards = partition(&rows);
        let gross_winners: Vec<i64> = boards.gross_winners.iter().map(|row| row.member_id).collect();

        // The gate only closes once every adjustment has been written.
        let log = self.apply(tournament_id).await?;
        for member_id in &gross_winners {
            self.repository.set_member_gross_win(*member_id, true).await?;
        }
        self.repository.mark_finalized(tournament_id).await?;
        self.clear_finalize_lock(tournament_id).await;

        info!(
            name = %tournament.name,
            gross_winners = gross_winners.len(),
            adjusted = log.len(),
            "Tournament finalized"
        );
        Ok(FinalizeSummary {
            tournament_id,
            gross_winners,
            log,
        })
    }

    pub async fn standings(&self, tournament_id: i64) -> Result<TournamentStandings, LeagueError> {
        let rows = self.tournament_rows(tournament_id).await?;
        Ok(TournamentStandings::from_leaderboards(
            tournament_id,
            &partition(&rows),
        ))
    }

    async fn tournament(&self, tournament_id: i64) -> Result<Tournament, LeagueError> {
        self.repository
            .get_tournament(tournament_id)
            .await?
            .ok_or(LeagueError::TournamentNotFound(tournament_id))
    }

    async fn tournament_rows(&self, tournament_id: i64) -> Result<Vec<ScoreRow>, LeagueError> {
        self.tournament(tournament_id).await?;
        self.repository.list_score_rows(tournament_id).await
    }

    async fn finalize_lock(&self, tournament_id: i64) -> Arc<AsyncMutex<()>> {
        {
            let guard = self.finalize_mutexes.read().await;
            if let Some(lock) = guard.get(&tournament_id) {
                return lock.clone();
            }
        }

        let mut guard = self.finalize_mutexes.write().await;
        guard
            .entry(tournament_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// The finalized flag guards the tournament from here on.
    async fn clear_finalize_lock(&self, tournament_id: i64) {
        let mut guard = self.finalize_mutexes.write().await;
        guard.remove(&tournament_id);
    }
}
