use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::handicap::PAR;
use crate::leaderboard::{ordinal, NetStanding};
use crate::league::ScoreRow;

/// One rule that fired for a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum AdjustmentReason {
    NetPosition { position: usize, delta: i32 },
    StrokesUnderPar { strokes: i32, delta: i32 },
}

impl fmt::Display for AdjustmentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustmentReason::NetPosition { position, .. } => {
                write!(f, "Net {} place", ordinal(*position))
            }
            AdjustmentReason::StrokesUnderPar { strokes, .. } => {
                write!(f, "{strokes} strokes under {PAR}")
            }
        }
    }
}

/// Cumulative handicap change for one member in one tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentLogEntry {
    pub member_id: i64,
    pub name: String,
    /// Frozen baseline from the member's card.
    pub old: f64,
    pub new: f64,
    /// Always `new - old`.
    pub adjustment: f64,
    pub reasons: Vec<AdjustmentReason>,
}

impl AdjustmentLogEntry {
    pub fn new(member_id: i64, name: &str, old: f64, new: f64, reason: AdjustmentReason) -> Self {
        Self {
            member_id,
            name: name.to_string(),
            old,
            new,
            adjustment: new - old,
            reasons: vec![reason],
        }
    }

    pub fn set_new(&mut self, new: f64) {
        self.new = new;
        self.adjustment = new - self.old;
    }

    pub fn reason_text(&self) -> String {
        self.reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Flat rendering of a log entry for display or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentReport {
    pub name: String,
    pub old: f64,
    pub new: f64,
    pub adjustment: f64,
    pub reason: String,
}

impl From<&AdjustmentLogEntry> for AdjustmentReport {
    fn from(entry: &AdjustmentLogEntry) -> Self {
        Self {
            name: entry.name.clone(),
            old: entry.old,
            new: entry.new,
            adjustment: entry.adjustment,
            reason: entry.reason_text(),
        }
    }
}

/// Read-only input to the engine: one tournament's rows plus the handicap each
/// member holds before any rule runs.
#[derive(Debug, Clone, Default)]
pub struct AdjustmentSnapshot {
    pub rows: Vec<ScoreRow>,
    pub starting_handicaps: HashMap<i64, f64>,
}

impl AdjustmentSnapshot {
    /// Starts every member from the live handicap read with the rows.
    pub fn live(rows: Vec<ScoreRow>) -> Self {
        let starting_handicaps = rows
            .iter()
            .map(|row| (row.member_id, row.handicap))
            .collect();
        Self {
            rows,
            starting_handicaps,
        }
    }

    /// Starts every member from the frozen card baseline, as things stood
    /// before the tournament was finalized.
    pub fn from_baselines(rows: Vec<ScoreRow>) -> Self {
        let starting_handicaps = rows
            .iter()
            .map(|row| (row.member_id, row.baseline.unwrap_or(row.handicap)))
            .collect();
        Self {
            rows,
            starting_handicaps,
        }
    }
}

/// Working state the rules read and write while the engine runs.
#[derive(Debug, Default)]
pub struct AdjustmentLedger {
    entries: Vec<AdjustmentLogEntry>,
    working: HashMap<i64, f64>,
    starting: HashMap<i64, f64>,
    written: BTreeMap<i64, f64>,
    pinned_baselines: Vec<(i64, f64)>,
}

impl AdjustmentLedger {
    pub fn new(starting: HashMap<i64, f64>) -> Self {
        Self {
            starting,
            ..Self::default()
        }
    }

    /// Handicap after every rule that has run so far.
    pub fn current_handicap(&self, standing: &NetStanding) -> f64 {
        self.working
            .get(&standing.member_id)
            .or_else(|| self.starting.get(&standing.member_id))
            .copied()
            .unwrap_or(standing.baseline)
    }

    /// Stores the new handicap and folds the reason into the member's single
    /// log entry.
    pub fn record(&mut self, standing: &NetStanding, new_handicap: f64, reason: AdjustmentReason) {
        self.working.insert(standing.member_id, new_handicap);
        self.written.insert(standing.member_id, new_handicap);

        match self
            .entries
            .iter_mut()
            .find(|entry| entry.member_id == standing.member_id)
        {
            Some(entry) => {
                entry.reasons.push(reason);
                entry.set_new(new_handicap);
            }
            None => self.entries.push(AdjustmentLogEntry::new(
                standing.member_id,
                &standing.name,
                standing.baseline,
                new_handicap,
                reason,
            )),
        }
    }

    /// Marks a card's baseline as the one an adjustment was computed from.
    pub fn pin_baseline(&mut self, standing: &NetStanding) {
        self.pinned_baselines
            .push((standing.card_id, standing.baseline));
    }

    pub fn entries(&self) -> &[AdjustmentLogEntry] {
        &self.entries
    }

    pub fn into_outcome(self) -> AdjustmentOutcome {
        AdjustmentOutcome {
            log: self.entries,
            handicaps: self.written,
            pinned_baselines: self.pinned_baselines,
        }
    }
}

/// Result of one engine run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjustmentOutcome {
    pub log: Vec<AdjustmentLogEntry>,
    /// Final handicap of every member a rule wrote to.
    pub handicaps: BTreeMap<i64, f64>,
    /// `(card_id, baseline)` for each position-adjusted card.
    pub pinned_baselines: Vec<(i64, f64)>,
}
