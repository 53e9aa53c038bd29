use std::collections::HashMap;

use golf_league::{
    league::{NewMember, HOLES_PER_ROUND},
    Gender,
};

use super::setup::TestSetup;

// ============================================================================
// Round Helpers
// ============================================================================

/// Spreads a gross total over 18 holes, front holes taking the remainder.
pub fn round_of(total: u32) -> [u8; HOLES_PER_ROUND] {
    let holes = HOLES_PER_ROUND as u32;
    let mut strokes = [(total / holes) as u8; HOLES_PER_ROUND];
    for stroke in strokes.iter_mut().take((total % holes) as usize) {
        *stroke += 1;
    }
    strokes
}

// ============================================================================
// League Setup Utilities
// ============================================================================

struct PlayerSpec {
    name: String,
    gender: Gender,
    handicap: f64,
    tournaments_played: u32,
    total: u32,
}

pub struct LeagueBuilder {
    players: Vec<PlayerSpec>,
}

impl LeagueBuilder {
    pub fn new() -> Self {
        Self { players: vec![] }
    }

    /// A regular: already past the net eligibility threshold before this round.
    pub fn with_player(self, name: &str, gender: Gender, handicap: f64, total: u32) -> Self {
        self.with_history(name, gender, handicap, 5, total)
    }

    /// Third tournament after this round, so still off the net boards.
    #[allow(dead_code)]
    pub fn with_rookie(self, name: &str, gender: Gender, handicap: f64, total: u32) -> Self {
        self.with_history(name, gender, handicap, 2, total)
    }

    pub fn with_history(
        mut self,
        name: &str,
        gender: Gender,
        handicap: f64,
        tournaments_played: u32,
        total: u32,
    ) -> Self {
        self.players.push(PlayerSpec {
            name: name.to_string(),
            gender,
            handicap,
            tournaments_played,
            total,
        });
        self
    }

    /// Gus wins gross for the men, Ida for the women. Al and Bo lead the
    /// men's net board behind him, Jo leads the women's.
    #[allow(dead_code)]
    pub fn with_medal_field(self) -> Self {
        self.with_player("Gus", Gender::Male, 2.0, 74)
            .with_player("Al", Gender::Male, 10.0, 78)
            .with_player("Bo", Gender::Male, 20.0, 95)
            .with_player("Ida", Gender::Female, 18.0, 88)
            .with_player("Jo", Gender::Female, 24.0, 95)
    }

    /// Creates every member and records their round. Returns member ids by name.
    pub async fn build_with_setup(self, setup: &TestSetup) -> HashMap<String, i64> {
        let mut ids = HashMap::new();
        for player in self.players {
            let member = setup
                .league
                .create_member(NewMember {
                    name: player.name.clone(),
                    handicap: player.handicap,
                    gender: player.gender,
                    tournaments_played: player.tournaments_played,
                })
                .await
                .expect("member creation should succeed");

            setup
                .league
                .record_round(setup.tournament_id, member.id, round_of(player.total))
                .await
                .expect("round should be recorded");

            ids.insert(player.name, member.id);
        }
        ids
    }
}
