use std::sync::Arc;
use tracing::debug;

use super::{
    rules::{NetPositionRule, StrokesUnderParRule},
    AdjustmentLedger, AdjustmentOutcome, AdjustmentRule, AdjustmentSnapshot,
};
use crate::leaderboard::partition;

/// Runs the adjustment rules over a read-only snapshot. Pure: nothing is
/// persisted here, so finalize and replay share one code path.
pub struct HandicapEngine {
    rules: Vec<Arc<dyn AdjustmentRule>>,
}

impl Default for HandicapEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl HandicapEngine {
    pub fn builder() -> HandicapEngineBuilder {
        HandicapEngineBuilder::new()
    }

    pub fn rules(&self) -> Vec<Arc<dyn AdjustmentRule>> {
        self.rules.clone()
    }

    pub fn compute_adjustments(&self, snapshot: &AdjustmentSnapshot) -> AdjustmentOutcome {
        if snapshot.rows.is_empty() {
            return AdjustmentOutcome::default();
        }

        let boards = partition(&snapshot.rows);
        let mut ledger = AdjustmentLedger::new(snapshot.starting_handicaps.clone());

        for rule in &self.rules {
            rule.apply(&boards, &mut ledger);
            debug!(
                rule = rule.name(),
                entries = ledger.entries().len(),
                "Adjustment rule applied"
            );
        }

        ledger.into_outcome()
    }
}

/// Engine with the league's standard rules.
pub fn compute_adjustments(snapshot: &AdjustmentSnapshot) -> AdjustmentOutcome {
    HandicapEngine::default().compute_adjustments(snapshot)
}

pub struct HandicapEngineBuilder {
    rules: Vec<Arc<dyn AdjustmentRule>>,
}

impl HandicapEngineBuilder {
    fn new() -> Self {
        Self {
            rules: vec![
                Arc::new(NetPositionRule::new()),
                Arc::new(StrokesUnderParRule::new()),
            ],
        }
    }

    pub fn with_rule(mut self, rule: Arc<dyn AdjustmentRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn build(mut self) -> HandicapEngine {
        self.rules.sort_by_key(|rule| rule.priority());
        HandicapEngine { rules: self.rules }
    }
}
