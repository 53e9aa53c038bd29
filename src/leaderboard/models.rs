use serde::{Deserialize, Serialize};

use crate::league::{Gender, ScoreRow};

/// One board per gender. Genders never share a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderBoards<T> {
    pub male: Vec<T>,
    pub female: Vec<T>,
}

impl<T> Default for GenderBoards<T> {
    fn default() -> Self {
        Self {
            male: Vec::new(),
            female: Vec::new(),
        }
    }
}

impl<T> GenderBoards<T> {
    pub fn get(&self, gender: Gender) -> &[T] {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    pub fn get_mut(&mut self, gender: Gender) -> &mut Vec<T> {
        match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.male.is_empty() && self.female.is_empty()
    }

    pub fn len(&self) -> usize {
        self.male.len() + self.female.len()
    }

    /// Male board first, then female.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.male.iter().chain(self.female.iter())
    }
}

/// A row that made it onto a net leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetStanding {
    pub card_id: i64,
    pub member_id: i64,
    pub name: String,
    pub gender: Gender,
    pub total_score: i32,
    /// Frozen handicap the net score was computed from.
    pub baseline: f64,
    pub net_score: i32,
}

impl NetStanding {
    /// `None` when the card has no total or no frozen handicap.
    pub fn from_row(row: &ScoreRow) -> Option<Self> {
        let total_score = row.total_score?;
        let baseline = row.baseline?;
        Some(Self {
            card_id: row.card_id,
            member_id: row.member_id,
            name: row.name.clone(),
            gender: row.gender,
            total_score,
            baseline,
            net_score: net_score(total_score, baseline),
        })
    }
}

/// Total minus handicap, truncated toward zero.
pub fn net_score(total_score: i32, baseline: f64) -> i32 {
    (f64::from(total_score) - baseline).trunc() as i32
}

/// Every derived set for one tournament.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboards {
    /// All rows by gender, best total first, missing totals last.
    pub gross: GenderBoards<ScoreRow>,
    /// Best gross row per gender for this tournament.
    pub gross_winners: GenderBoards<ScoreRow>,
    /// Net-eligible rows minus the gross winners.
    pub position_pool: GenderBoards<NetStanding>,
    /// Net-eligible rows including the gross winners.
    pub strokes_pool: GenderBoards<NetStanding>,
}

impl Leaderboards {
    pub fn is_gross_winner(&self, member_id: i64) -> bool {
        self.gross_winners
            .iter()
            .any(|row| row.member_id == member_id)
    }

    pub fn is_empty(&self) -> bool {
        self.gross.is_empty()
    }
}
