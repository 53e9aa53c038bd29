// Library crate for the golf league handicap engine
// This file exposes the public API for the binary and integration tests

pub mod adjustment;
pub mod config;
pub mod handicap;
pub mod leaderboard;
pub mod league;

// Re-export commonly used types for easier access in tests
pub use adjustment::{
    compute_adjustments, AdjustmentLogEntry, AdjustmentReason, AdjustmentReport,
    AdjustmentService, AdjustmentSnapshot, FinalizeSummary, HandicapEngine,
};
pub use config::Config;
pub use handicap::{position_delta, strokes_delta, HandicapBand};
pub use leaderboard::{partition, Leaderboards, TournamentStandings};
pub use league::{
    Gender, InMemoryLeagueRepository, LeagueError, LeagueRepository, LeagueService,
    LeagueSnapshot, Member, ScoreCard, ScoreRow, Tournament,
};
