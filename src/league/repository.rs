use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::{
    models::{Member, NewMember, NewTournament, ScoreCard, ScoreRow, Tournament},
    LeagueError,
};

/// Data access the league services depend on. Implementations own the
/// storage technology; the services only see plain records.
#[async_trait]
pub trait LeagueRepository: Send + Sync {
    async fn create_member(&self, member: NewMember) -> Result<Member, LeagueError>;
    async fn get_member(&self, member_id: i64) -> Result<Option<Member>, LeagueError>;
    async fn list_members(&self) -> Result<Vec<Member>, LeagueError>;
    async fn get_member_handicap(&self, member_id: i64) -> Result<f64, LeagueError>;
    async fn set_member_handicap(&self, member_id: i64, handicap: f64) -> Result<(), LeagueError>;
    async fn set_member_gross_win(&self, member_id: i64, gross_win: bool)
        -> Result<(), LeagueError>;
    async fn increment_tournaments_played(&self, member_id: i64) -> Result<(), LeagueError>;

    /// Moves a member to a new id, carrying its score cards along.
    async fn renumber_member(&self, member_id: i64, new_id: i64) -> Result<Member, LeagueError>;

    async fn create_tournament(&self, tournament: NewTournament)
        -> Result<Tournament, LeagueError>;
    async fn get_tournament(&self, tournament_id: i64) -> Result<Option<Tournament>, LeagueError>;
    async fn mark_finalized(&self, tournament_id: i64) -> Result<(), LeagueError>;

    async fn get_score_card(
        &self,
        tournament_id: i64,
        member_id: i64,
    ) -> Result<Option<ScoreCard>, LeagueError>;

    /// Opens an empty card with a frozen baseline. Fails if the member already
    /// has one for this tournament.
    async fn create_score_card(
        &self,
        tournament_id: i64,
        member_id: i64,
        baseline: f64,
    ) -> Result<ScoreCard, LeagueError>;
    async fn save_score_card(&self, card: &ScoreCard) -> Result<(), LeagueError>;
    async fn set_card_baseline(&self, card_id: i64, baseline: f64) -> Result<(), LeagueError>;

    /// Every card of the tournament joined with its member.
    async fn list_score_rows(&self, tournament_id: i64) -> Result<Vec<ScoreRow>, LeagueError>;
}

/// Serializable image of the whole league, used to persist the in-memory
/// repository between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
    #[serde(default)]
    pub score_cards: Vec<ScoreCard>,
}

#[derive(Debug, Default)]
struct LeagueState {
    members: BTreeMap<i64, Member>,
    tournaments: BTreeMap<i64, Tournament>,
    score_cards: BTreeMap<i64, ScoreCard>,
}

impl LeagueState {
    fn next_member_id(&self) -> i64 {
        self.members.keys().next_back().map_or(1, |id| id + 1)
    }

    fn next_tournament_id(&self) -> i64 {
        self.tournaments.keys().next_back().map_or(1, |id| id + 1)
    }

    fn next_card_id(&self) -> i64 {
        self.score_cards.keys().next_back().map_or(1, |id| id + 1)
    }

    fn member_mut(&mut self, member_id: i64) -> Result<&mut Member, LeagueError> {
        self.members
            .get_mut(&member_id)
            .ok_or(LeagueError::MemberNotFound(member_id))
    }

    fn find_card(&self, tournament_id: i64, member_id: i64) -> Option<&ScoreCard> {
        self.score_cards
            .values()
            .find(|card| card.tournament_id == tournament_id && card.member_id == member_id)
    }
}

/// In-memory implementation of LeagueRepository for the CLI and tests
#[derive(Debug, Default)]
pub struct InMemoryLeagueRepository {
    state: Arc<RwLock<LeagueState>>,
}

impl InMemoryLeagueRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(LeagueState::default())),
        }
    }

    /// Builds a repository from a snapshot, rejecting duplicate ids and cards
    /// that point at unknown tournaments.
    pub fn from_snapshot(snapshot: LeagueSnapshot) -> Result<Self, LeagueError> {
        let mut state = LeagueState::default();

        for member in snapshot.members {
            let id = member.id;
            if state.members.insert(id, member).is_some() {
                return Err(LeagueError::Validation(format!("duplicate member id {id}")));
            }
        }
        for tournament in snapshot.tournaments {
            let id = tournament.id;
            if state.tournaments.insert(id, tournament).is_some() {
                return Err(LeagueError::Validation(format!(
                    "duplicate tournament id {id}"
                )));
            }
        }
        for card in snapshot.score_cards {
            if !state.tournaments.contains_key(&card.tournament_id) {
                return Err(LeagueError::TournamentNotFound(card.tournament_id));
            }
            if state.find_card(card.tournament_id, card.member_id).is_some() {
                return Err(LeagueError::DuplicateScoreCard {
                    tournament_id: card.tournament_id,
                    member_id: card.member_id,
                });
            }
            let id = card.id;
            if state.score_cards.insert(id, card).is_some() {
                return Err(LeagueError::Validation(format!(
                    "duplicate score card id {id}"
                )));
            }
        }

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
        })
    }

    pub async fn snapshot(&self) -> LeagueSnapshot {
        let state = self.state.read().await;
        LeagueSnapshot {
            members: state.members.values().cloned().collect(),
            tournaments: state.tournaments.values().cloned().collect(),
            score_cards: state.score_cards.values().cloned().collect(),
        }
    }

    pub async fn load_json(path: &Path) -> Result<Self, LeagueError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let snapshot: LeagueSnapshot = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            members = snapshot.members.len(),
            tournaments = snapshot.tournaments.len(),
            score_cards = snapshot.score_cards.len(),
            "Loaded league snapshot"
        );
        Self::from_snapshot(snapshot)
    }

    pub async fn save_json(&self, path: &Path) -> Result<(), LeagueError> {
        let snapshot = self.snapshot().await;
        let raw = serde_json::to_string_pretty(&snapshot)?;
        tokio::fs::write(path, raw).await?;
        info!(path = %path.display(), "Saved league snapshot");
        Ok(())
    }
}

#[async_trait]
impl LeagueRepository for InMemoryLeagueRepository {
    #[instrument(skip(self, member), fields(name = %member.name))]
    async fn create_member(&self, member: NewMember) -> Result<Member, LeagueError> {
        member.validate()?;
        let mut state = self.state.write().await;
        let created = Member {
            id: state.next_member_id(),
            name: member.name,
            handicap: member.handicap,
            gender: member.gender,
            gross_win: false,
            tournaments_played: member.tournaments_played,
            points: 0,
        };
        state.members.insert(created.id, created.clone());
        debug!(member_id = created.id, "Member created in memory");
        Ok(created)
    }

    async fn get_member(&self, member_id: i64) -> Result<Option<Member>, LeagueError> {
        let state = self.state.read().await;
        Ok(state.members.get(&member_id).cloned())
    }

    async fn list_members(&self) -> Result<Vec<Member>, LeagueError> {
        let state = self.state.read().await;
        let mut members: Vec<Member> = state.members.values().cloned().collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(members)
    }

    async fn get_member_handicap(&self, member_id: i64) -> Result<f64, LeagueError> {
        let state = self.state.read().await;
        state
            .members
            .get(&member_id)
            .map(|member| member.handicap)
            .ok_or(LeagueError::MemberNotFound(member_id))
    }

    #[instrument(skip(self))]
    async fn set_member_handicap(&self, member_id: i64, handicap: f64) -> Result<(), LeagueError> {
        let mut state = self.state.write().await;
        state.member_mut(member_id)?.handicap = handicap;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_member_gross_win(
        &self,
        member_id: i64,
        gross_win: bool,
    ) -> Result<(), LeagueError> {
        let mut state = self.state.write().await;
        state.member_mut(member_id)?.gross_win = gross_win;
        Ok(())
    }

    async fn increment_tournaments_played(&self, member_id: i64) -> Result<(), LeagueError> {
        let mut state = self.state.write().await;
        state.member_mut(member_id)?.tournaments_played += 1;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn renumber_member(&self, member_id: i64, new_id: i64) -> Result<Member, LeagueError> {
        let mut state = self.state.write().await;
        if !state.members.contains_key(&member_id) {
            return Err(LeagueError::MemberNotFound(member_id));
        }
        if member_id == new_id {
            return Ok(state.members[&member_id].clone());
        }
        if state.members.contains_key(&new_id) {
            warn!(member_id, new_id, "Target member id already in use");
            return Err(LeagueError::MemberIdTaken(new_id));
        }

        let mut member = state
            .members
            .remove(&member_id)
            .ok_or(LeagueError::MemberNotFound(member_id))?;
        member.id = new_id;
        state.members.insert(new_id, member.clone());

        let mut moved = 0usize;
        for card in state.score_cards.values_mut() {
            if card.member_id == member_id {
                card.member_id = new_id;
                moved += 1;
            }
        }

        info!(member_id, new_id, cards = moved, "Member renumbered");
        Ok(member)
    }

    #[instrument(skip(self, tournament), fields(name = %tournament.name))]
    async fn create_tournament(
        &self,
        tournament: NewTournament,
    ) -> Result<Tournament, LeagueError> {
        if tournament.name.trim().is_empty() {
            return Err(LeagueError::Validation(
                "tournament name is empty".to_string(),
            ));
        }
        let mut state = self.state.write().await;
        let created = Tournament {
            id: state.next_tournament_id(),
            name: tournament.name,
            date: tournament.date,
            description: tournament.description,
            finalized: false,
        };
        state.tournaments.insert(created.id, created.clone());
        debug!(tournament_id = created.id, "Tournament created in memory");
        Ok(created)
    }

    async fn get_tournament(&self, tournament_id: i64) -> Result<Option<Tournament>, LeagueError> {
        let state = self.state.read().await;
        Ok(state.tournaments.get(&tournament_id).cloned())
    }

    #[instrument(skip(self))]
    async fn mark_finalized(&self, tournament_id: i64) -> Result<(), LeagueError> {
        let mut state = self.state.write().await;
        let tournament = state
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(LeagueError::TournamentNotFound(tournament_id))?;
        tournament.finalized = true;
        Ok(())
    }

    async fn get_score_card(
        &self,
        tournament_id: i64,
        member_id: i64,
    ) -> Result<Option<ScoreCard>, LeagueError> {
        let state = self.state.read().await;
        Ok(state.find_card(tournament_id, member_id).cloned())
    }

    #[instrument(skip(self))]
    async fn create_score_card(
        &self,
        tournament_id: i64,
        member_id: i64,
        baseline: f64,
    ) -> Result<ScoreCard, LeagueError> {
        let mut state = self.state.write().await;
        if !state.tournaments.contains_key(&tournament_id) {
            return Err(LeagueError::TournamentNotFound(tournament_id));
        }
        if !state.members.contains_key(&member_id) {
            return Err(LeagueError::MemberNotFound(member_id));
        }
        if state.find_card(tournament_id, member_id).is_some() {
            return Err(LeagueError::DuplicateScoreCard {
                tournament_id,
                member_id,
            });
        }

        let card = ScoreCard::new(state.next_card_id(), tournament_id, member_id, baseline);
        state.score_cards.insert(card.id, card.clone());
        debug!(card_id = card.id, "Score card opened in memory");
        Ok(card)
    }

    async fn save_score_card(&self, card: &ScoreCard) -> Result<(), LeagueError> {
        let mut state = self.state.write().await;
        let stored = state
            .score_cards
            .get_mut(&card.id)
            .ok_or(LeagueError::ScoreCardNotFound {
                tournament_id: card.tournament_id,
                member_id: card.member_id,
            })?;
        stored.holes = card.holes;
        stored.total_score = card.total_score;
        Ok(())
    }

    async fn set_card_baseline(&self, card_id: i64, baseline: f64) -> Result<(), LeagueError> {
        let mut state = self.state.write().await;
        match state.score_cards.get_mut(&card_id) {
            Some(card) => {
                card.net_handicap = Some(baseline);
                Ok(())
            }
            None => Err(LeagueError::Validation(format!(
                "unknown score card id {card_id}"
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn list_score_rows(&self, tournament_id: i64) -> Result<Vec<ScoreRow>, LeagueError> {
        let state = self.state.read().await;
        let mut rows = Vec::new();
        for card in state
            .score_cards
            .values()
            .filter(|card| card.tournament_id == tournament_id)
        {
            match state.members.get(&card.member_id) {
                Some(member) => rows.push(ScoreRow::from_parts(card, member)),
                None => {
                    warn!(card_id = card.id, member_id = card.member_id, "Score card without member")
                }
            }
        }
        debug!(tournament_id, rows = rows.len(), "Listed score rows");
        Ok(rows)
    }
}
