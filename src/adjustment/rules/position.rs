use strum::IntoEnumIterator;
use tracing::{debug, info};

use super::super::{AdjustmentLedger, AdjustmentReason, AdjustmentRule};
use crate::handicap::{clamp_adjusted, position_delta, HandicapBand};
use crate::leaderboard::Leaderboards;
use crate::league::Gender;

/// Places on each gender's net board that earn a position adjustment.
pub const PODIUM_PLACES: usize = 3;

/// Pass 1: handicap cut for the top three of each gender's net board, gross
/// winners excluded. Starts from the card baseline, not the live handicap.
pub struct NetPositionRule;

impl Default for NetPositionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl NetPositionRule {
    pub fn new() -> Self {
        Self
    }
}

impl AdjustmentRule for NetPositionRule {
    fn apply(&self, boards: &Leaderboards, ledger: &mut AdjustmentLedger) {
        for gender in Gender::iter() {
            let podium = boards.position_pool.get(gender).iter().take(PODIUM_PLACES);

            for (index, standing) in podium.enumerate() {
                let position = index + 1;
                let band = HandicapBand::classify(standing.baseline);
                let delta = position_delta(band, position);
                let new_handicap = clamp_adjusted(standing.baseline, delta);

                debug!(
                    %gender,
                    position,
                    name = %standing.name,
                    net = standing.net_score,
                    %band,
                    delta,
                    "Net position adjustment"
                );

                ledger.pin_baseline(standing);
                ledger.record(
                    standing,
                    new_handicap,
                    AdjustmentReason::NetPosition { position, delta },
                );

                info!(
                    member_id = standing.member_id,
                    old = standing.baseline,
                    new = new_handicap,
                    "Position adjustment recorded"
                );
            }
        }
    }

    fn priority(&self) -> u32 {
        crate::adjustment::rule_priority::NET_POSITION
    }

    fn name(&self) -> &'static str {
        "NetPositionRule"
    }
}
