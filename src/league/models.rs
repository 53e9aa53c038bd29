use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::LeagueError;

pub const HOLES_PER_ROUND: usize = 18;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    /// Live handicap. The only field the adjustment engine mutates.
    pub handicap: f64,
    pub gender: Gender,
    /// Set once a member has taken a gross title; used for award eligibility.
    #[serde(default)]
    pub gross_win: bool,
    #[serde(default)]
    pub tournaments_played: u32,
    #[serde(default)]
    pub points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub handicap: f64,
    pub gender: Gender,
    #[serde(default)]
    pub tournaments_played: u32,
}

impl NewMember {
    pub fn validate(&self) -> Result<(), LeagueError> {
        if self.name.trim().is_empty() {
            return Err(LeagueError::Validation("member name is empty".to_string()));
        }
        if !self.handicap.is_finite() || self.handicap < 0.0 {
            return Err(LeagueError::Validation(format!(
                "handicap must be a non-negative number, got {}",
                self.handicap
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    /// One-way gate; flips to true exactly once, at finalization.
    #[serde(default)]
    pub finalized: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTournament {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub id: i64,
    pub tournament_id: i64,
    pub member_id: i64,
    pub holes: [Option<u8>; HOLES_PER_ROUND],
    pub total_score: Option<i32>,
    /// Member handicap captured when the card was first written.
    pub net_handicap: Option<f64>,
}

impl ScoreCard {
    pub fn new(id: i64, tournament_id: i64, member_id: i64, baseline: f64) -> Self {
        Self {
            id,
            tournament_id,
            member_id,
            holes: [None; HOLES_PER_ROUND],
            total_score: None,
            net_handicap: Some(baseline),
        }
    }

    /// Writes one hole (1-based) and recomputes the total.
    pub fn set_hole(&mut self, hole: u8, strokes: u8) -> Result<(), LeagueError> {
        let index = hole_index(hole)?;
        self.holes[index] = Some(strokes);
        self.recompute_total();
        Ok(())
    }

    pub fn set_round(&mut self, strokes: [u8; HOLES_PER_ROUND]) {
        self.holes = strokes.map(Some);
        self.recompute_total();
    }

    /// Unplayed holes count as zero.
    pub fn recompute_total(&mut self) {
        let total = self
            .holes
            .iter()
            .map(|hole| i32::from(hole.unwrap_or_default()))
            .sum();
        self.total_score = Some(total);
    }

    pub fn holes_played(&self) -> usize {
        self.holes.iter().filter(|hole| hole.is_some()).count()
    }

    pub fn front_nine(&self) -> i32 {
        self.holes[..9]
            .iter()
            .map(|hole| i32::from(hole.unwrap_or_default()))
            .sum()
    }

    pub fn back_nine(&self) -> i32 {
        self.holes[9..]
            .iter()
            .map(|hole| i32::from(hole.unwrap_or_default()))
            .sum()
    }
}

fn hole_index(hole: u8) -> Result<usize, LeagueError> {
    match hole {
        1..=18 => Ok(usize::from(hole) - 1),
        _ => Err(LeagueError::InvalidHole(hole)),
    }
}

/// A score card joined with the member attributes the leaderboards need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub card_id: i64,
    pub member_id: i64,
    pub name: String,
    pub gender: Gender,
    pub gross_win: bool,
    pub tournaments_played: u32,
    pub total_score: Option<i32>,
    /// Frozen handicap from the card.
    pub baseline: Option<f64>,
    /// Member's live handicap when the row was read.
    pub handicap: f64,
}

impl ScoreRow {
    pub fn from_parts(card: &ScoreCard, member: &Member) -> Self {
        Self {
            card_id: card.id,
            member_id: member.id,
            name: member.name.clone(),
            gender: member.gender,
            gross_win: member.gross_win,
            tournaments_played: member.tournaments_played,
            total_score: card.total_score,
            baseline: card.net_handicap,
            handicap: member.handicap,
        }
    }
}
