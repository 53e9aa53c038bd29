use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;

use super::{
    models::{GenderBoards, Leaderboards, NetStanding},
    ordinal,
};
use crate::league::{Gender, ScoreRow};

/// Net places that earn a named award.
const NET_PLACES_AWARDED: usize = 5;
const LUCKY_PLACE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardTitle {
    GrossFirst(Gender),
    NetPlace(usize),
    LuckySeven,
    /// Second to last on the combined net board.
    SecondLast,
}

impl fmt::Display for AwardTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AwardTitle::GrossFirst(gender) => write!(f, "Gross 1st {gender}"),
            AwardTitle::NetPlace(place) => write!(f, "Net {}", ordinal(*place)),
            AwardTitle::LuckySeven => write!(f, "Lucky {LUCKY_PLACE}"),
            AwardTitle::SecondLast => write!(f, "BB"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub title: String,
    pub member_id: i64,
    pub name: String,
}

impl Award {
    fn new(title: AwardTitle, member_id: i64, name: &str) -> Self {
        Self {
            title: title.to_string(),
            member_id,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrossLine {
    pub rank: usize,
    pub member_id: i64,
    pub name: String,
    pub total_score: Option<i32>,
}

/// Display-ready view of one tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentStandings {
    pub tournament_id: i64,
    pub gross: GenderBoards<GrossLine>,
    pub net: GenderBoards<NetStanding>,
    pub awards: Vec<Award>,
}

impl TournamentStandings {
    pub fn from_leaderboards(tournament_id: i64, boards: &Leaderboards) -> Self {
        let mut gross = GenderBoards::default();
        for gender in Gender::iter() {
            *gross.get_mut(gender) = gross_lines(boards.gross.get(gender));
        }

        Self {
            tournament_id,
            gross,
            net: boards.position_pool.clone(),
            awards: automatic_awards(boards),
        }
    }
}

fn gross_lines(rows: &[ScoreRow]) -> Vec<GrossLine> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| GrossLine {
            rank: index + 1,
            member_id: row.member_id,
            name: row.name.clone(),
            total_score: row.total_score,
        })
        .collect()
}

/// Awards that follow directly from the leaderboards. Net places are read
/// from both genders' position pools combined into one board.
pub fn automatic_awards(boards: &Leaderboards) -> Vec<Award> {
    let mut awards = Vec::new();

    for gender in Gender::iter() {
        if let Some(winner) = boards.gross_winners.get(gender).first() {
            awards.push(Award::new(
                AwardTitle::GrossFirst(gender),
                winner.member_id,
                &winner.name,
            ));
        }
    }

    let mut combined: Vec<&NetStanding> = boards.position_pool.iter().collect();
    combined.sort_by_key(|standing| standing.net_score);

    for (index, standing) in combined.iter().take(NET_PLACES_AWARDED).enumerate() {
        awards.push(Award::new(
            AwardTitle::NetPlace(index + 1),
            standing.member_id,
            &standing.name,
        ));
    }

    if let Some(lucky) = combined.get(LUCKY_PLACE - 1) {
        awards.push(Award::new(AwardTitle::LuckySeven, lucky.member_id, &lucky.name));
    }

    if combined.len() >= 2 {
        let second_last = combined[combined.len() - 2];
        awards.push(Award::new(
            AwardTitle::SecondLast,
            second_last.member_id,
            &second_last.name,
        ));
    }

    awards
}
