use std::sync::Arc;

use chrono::NaiveDate;
use golf_league::{
    league::NewTournament, AdjustmentService, InMemoryLeagueRepository, LeagueService,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub repository: Arc<InMemoryLeagueRepository>,
    pub league: LeagueService,
    pub adjustments: AdjustmentService,
    pub tournament_id: i64,
}

pub struct TestSetupBuilder {
    tournament_name: String,
    date: NaiveDate,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            tournament_name: "Monthly Medal".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[allow(dead_code)]
    pub fn with_tournament(mut self, name: &str, date: NaiveDate) -> Self {
        self.tournament_name = name.to_string();
        self.date = date;
        self
    }

    pub async fn build(self) -> TestSetup {
        let repository = Arc::new(InMemoryLeagueRepository::new());
        Self::build_on(repository, self).await
    }

    /// Builds on top of an existing repository, e.g. one loaded from a file.
    #[allow(dead_code)]
    pub async fn build_with_repository(
        self,
        repository: Arc<InMemoryLeagueRepository>,
    ) -> TestSetup {
        Self::build_on(repository, self).await
    }

    async fn build_on(repository: Arc<InMemoryLeagueRepository>, builder: Self) -> TestSetup {
        let league = LeagueService::new(repository.clone());
        let adjustments = AdjustmentService::new(repository.clone());

        let tournament = league
            .create_tournament(NewTournament {
                name: builder.tournament_name,
                date: builder.date,
                description: None,
            })
            .await
            .expect("tournament creation should succeed");

        TestSetup {
            repository,
            league,
            adjustments,
            tournament_id: tournament.id,
        }
    }
}
