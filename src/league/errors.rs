use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("Tournament not found: {0}")]
    TournamentNotFound(i64),

    #[error("Member not found: {0}")]
    MemberNotFound(i64),

    #[error("Score card not found for member {member_id} in tournament {tournament_id}")]
    ScoreCardNotFound { tournament_id: i64, member_id: i64 },

    #[error("Member {member_id} already has a score card for tournament {tournament_id}")]
    DuplicateScoreCard { tournament_id: i64, member_id: i64 },

    #[error("Tournament {0} is finalized and no longer accepts scores")]
    TournamentFinalized(i64),

    #[error("Tournament {0} has already been finalized")]
    AlreadyFinalized(i64),

    #[error("Hole number must be between 1 and 18, got {0}")]
    InvalidHole(u8),

    #[error("Member id {0} is already in use")]
    MemberIdTaken(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    #[allow(dead_code)] // Error variant for storage backends outside this crate
    Repository(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LeagueError {
    /// Distinguishes "no such record" from every other failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LeagueError::TournamentNotFound(_)
                | LeagueError::MemberNotFound(_)
                | LeagueError::ScoreCardNotFound { .. }
        )
    }
}
