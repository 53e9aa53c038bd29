use strum::IntoEnumIterator;
use tracing::{debug, info};

use super::super::{AdjustmentLedger, AdjustmentReason, AdjustmentRule};
use crate::handicap::{clamp_adjusted, strokes_delta, HandicapBand, PAR};
use crate::leaderboard::Leaderboards;
use crate::league::Gender;

/// Pass 2: extra cut for every net-eligible player who beat par on net,
/// gross winners included.
///
/// The table row comes from the card baseline while the cut lands on whatever
/// handicap the member holds after pass 1.
pub struct StrokesUnderParRule;

impl Default for StrokesUnderParRule {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokesUnderParRule {
    pub fn new() -> Self {
        Self
    }
}

impl AdjustmentRule for StrokesUnderParRule {
    fn apply(&self, boards: &Leaderboards, ledger: &mut AdjustmentLedger) {
        for gender in Gender::iter() {
            for standing in boards.strokes_pool.get(gender) {
                let strokes = PAR - standing.net_score;
                if strokes <= 0 {
                    continue;
                }

                let band = HandicapBand::classify(standing.baseline);
                let delta = strokes_delta(band, strokes);
                debug!(
                    %gender,
                    name = %standing.name,
                    net = standing.net_score,
                    strokes,
                    %band,
                    delta,
                    "Strokes under par"
                );
                if delta == 0 {
                    continue;
                }

                let current = ledger.current_handicap(standing);
                let new_handicap = clamp_adjusted(current, delta);
                ledger.record(
                    standing,
                    new_handicap,
                    AdjustmentReason::StrokesUnderPar { strokes, delta },
                );

                info!(
                    member_id = standing.member_id,
                    old = current,
                    new = new_handicap,
                    "Strokes adjustment recorded"
                );
            }
        }
    }

    fn priority(&self) -> u32 {
        crate::adjustment::rule_priority::STROKES_UNDER_PAR
    }

    fn name(&self) -> &'static str {
        "StrokesUnderParRule"
    }
}
