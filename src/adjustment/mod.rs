pub mod engine;
pub mod models;
pub mod rules;
pub mod service;

pub use engine::{compute_adjustments, HandicapEngine, HandicapEngineBuilder};
pub use models::*;
pub use rules::{NetPositionRule, StrokesUnderParRule};
pub use service::{AdjustmentService, FinalizeSummary};

use crate::leaderboard::Leaderboards;

/// Priority constants for adjustment rules.
/// Lower values run first. Later rules see the handicaps earlier rules wrote.
pub mod rule_priority {
    /// Top-3 net finish
    pub const NET_POSITION: u32 = 100;
    /// Net score under par, applied on top of the position result
    pub const STROKES_UNDER_PAR: u32 = 200;
}

pub trait AdjustmentRule: Send + Sync {
    fn apply(&self, boards: &Leaderboards, ledger: &mut AdjustmentLedger);

    fn priority(&self) -> u32;

    fn name(&self) -> &'static str;
}
