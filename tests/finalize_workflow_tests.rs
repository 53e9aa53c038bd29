mod utils;
use utils::{round_of, LeagueBuilder, TestSetupBuilder};

use golf_league::{
    AdjustmentReport, Gender, InMemoryLeagueRepository, LeagueError, LeagueRepository,
};
use std::sync::Arc;

#[tokio::test]
async fn finalize_adjusts_handicaps_from_position_and_strokes() {
    let setup = TestSetupBuilder::new().build().await;
    let ids = LeagueBuilder::new()
        .with_medal_field()
        .build_with_setup(&setup)
        .await;

    let summary = setup
        .adjustments
        .finalize(setup.tournament_id)
        .await
        .expect("finalize should succeed");

    let reports: Vec<AdjustmentReport> = summary.log.iter().map(AdjustmentReport::from).collect();
    let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Al", "Bo", "Jo", "Ida"]);

    let al = &reports[0];
    assert_eq!(al.old, 10.0);
    assert_eq!(al.new, 7.0);
    assert_eq!(al.adjustment, -3.0);
    assert_eq!(al.reason, "Net 1st place + 4 strokes under 72");

    assert_eq!(reports[1].reason, "Net 2nd place");
    assert_eq!(reports[1].new, 18.0);
    assert_eq!(reports[2].new, 19.0);
    assert_eq!(reports[3].reason, "2 strokes under 72");
    assert_eq!(reports[3].new, 17.0);

    // Net 72 is level par, so the men's gross winner keeps his handicap.
    let gus = setup.repository.get_member(ids["Gus"]).await.unwrap().unwrap();
    assert_eq!(gus.handicap, 2.0);
    assert!(gus.gross_win);
    assert_eq!(summary.gross_winners, vec![ids["Gus"], ids["Ida"]]);
}

#[tokio::test]
async fn replay_after_finalize_reproduces_the_log() {
    let setup = TestSetupBuilder::new().build().await;
    LeagueBuilder::new()
        .with_medal_field()
        .build_with_setup(&setup)
        .await;

    let summary = setup.adjustments.finalize(setup.tournament_id).await.unwrap();
    let replayed = setup.adjustments.replay(setup.tournament_id).await.unwrap();

    let applied: Vec<(String, f64)> = summary
        .log
        .iter()
        .map(|e| (e.name.clone(), e.adjustment))
        .collect();
    let again: Vec<(String, f64)> = replayed
        .iter()
        .map(|e| (e.name.clone(), e.adjustment))
        .collect();
    assert_eq!(again, applied);
}

#[tokio::test]
async fn rookies_stay_off_the_net_boards() {
    let setup = TestSetupBuilder::new().build().await;
    let ids = LeagueBuilder::new()
        .with_player("Al", Gender::Male, 10.0, 78)
        .with_player("Bo", Gender::Male, 20.0, 95)
        .with_rookie("Ron", Gender::Male, 30.0, 90)
        .build_with_setup(&setup)
        .await;

    let summary = setup.adjustments.finalize(setup.tournament_id).await.unwrap();

    assert!(summary.log.iter().all(|e| e.member_id != ids["Ron"]));
    let ron = setup.repository.get_member(ids["Ron"]).await.unwrap().unwrap();
    assert_eq!(ron.handicap, 30.0);
    assert_eq!(ron.tournaments_played, 3);
}

#[tokio::test]
async fn gross_winner_only_gets_the_strokes_cut() {
    let setup = TestSetupBuilder::new().build().await;
    let ids = LeagueBuilder::new()
        .with_player("Kay", Gender::Female, 24.0, 90)
        .with_player("Lu", Gender::Female, 20.0, 96)
        .build_with_setup(&setup)
        .await;

    let summary = setup.adjustments.finalize(setup.tournament_id).await.unwrap();

    // Kay: gross winner, net 66 on 22-26 is 6 under -> -4.
    let kay = summary.log.iter().find(|e| e.member_id == ids["Kay"]).unwrap();
    assert_eq!(kay.reason_text(), "6 strokes under 72");
    assert_eq!(kay.new, 20.0);

    // Lu takes net 1st despite the worse net score.
    let lu = summary.log.iter().find(|e| e.member_id == ids["Lu"]).unwrap();
    assert_eq!(lu.reason_text(), "Net 1st place");
    assert_eq!(lu.new, 17.0);
}

#[tokio::test]
async fn finalize_closes_the_tournament_for_good() {
    let setup = TestSetupBuilder::new().build().await;
    let ids = LeagueBuilder::new()
        .with_medal_field()
        .build_with_setup(&setup)
        .await;

    setup.adjustments.finalize(setup.tournament_id).await.unwrap();

    let second = setup.adjustments.finalize(setup.tournament_id).await;
    assert!(matches!(second, Err(LeagueError::AlreadyFinalized(_))));

    let late_hole = setup
        .league
        .record_hole(setup.tournament_id, ids["Al"], 1, 3)
        .await;
    assert!(matches!(late_hole, Err(LeagueError::TournamentFinalized(_))));

    let al = setup.repository.get_member(ids["Al"]).await.unwrap().unwrap();
    assert_eq!(al.handicap, 7.0);
}

#[tokio::test]
async fn standings_award_gross_and_net_places() {
    let setup = TestSetupBuilder::new().build().await;
    let ids = LeagueBuilder::new()
        .with_medal_field()
        .build_with_setup(&setup)
        .await;

    let standings = setup.adjustments.standings(setup.tournament_id).await.unwrap();

    let award = |title: &str| {
        standings
            .awards
            .iter()
            .find(|a| a.title == title)
            .map(|a| a.member_id)
    };
    assert_eq!(award("Gross 1st Male"), Some(ids["Gus"]));
    assert_eq!(award("Gross 1st Female"), Some(ids["Ida"]));
    assert_eq!(award("Net 1st"), Some(ids["Al"]));
    assert_eq!(award("Net 2nd"), Some(ids["Jo"]));
    assert_eq!(award("Net 3rd"), Some(ids["Bo"]));
    assert_eq!(award("BB"), Some(ids["Jo"]));
    assert_eq!(award("Lucky 7"), None);

    assert_eq!(standings.net.female.len(), 1);
    assert_eq!(standings.gross.female.len(), 2);
}

#[tokio::test]
async fn renumbered_member_keeps_history() {
    let setup = TestSetupBuilder::new().build().await;
    let ids = LeagueBuilder::new()
        .with_medal_field()
        .build_with_setup(&setup)
        .await;
    setup.adjustments.finalize(setup.tournament_id).await.unwrap();

    setup.league.renumber_member(ids["Al"], 500).await.unwrap();
    let replayed = setup.adjustments.replay(setup.tournament_id).await.unwrap();

    let al = replayed.iter().find(|e| e.name == "Al").unwrap();
    assert_eq!(al.member_id, 500);
    assert_eq!(al.new, 7.0);

    let taken = setup.league.renumber_member(ids["Bo"], 500).await;
    assert!(matches!(taken, Err(LeagueError::MemberIdTaken(500))));
}

#[tokio::test]
async fn league_survives_a_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("league.json");

    let setup = TestSetupBuilder::new().build().await;
    LeagueBuilder::new()
        .with_medal_field()
        .build_with_setup(&setup)
        .await;
    let summary = setup.adjustments.finalize(setup.tournament_id).await.unwrap();
    setup.repository.save_json(&path).await.unwrap();

    let reloaded = Arc::new(InMemoryLeagueRepository::load_json(&path).await.unwrap());
    assert_eq!(reloaded.snapshot().await, setup.repository.snapshot().await);

    let next = TestSetupBuilder::new()
        .build_with_repository(reloaded)
        .await;
    let replayed = next.adjustments.replay(setup.tournament_id).await.unwrap();
    assert_eq!(replayed, summary.log);

    // The new tournament opens cards from the adjusted handicaps.
    let card = next
        .league
        .record_round(next.tournament_id, summary.log[0].member_id, round_of(80))
        .await
        .unwrap();
    assert_eq!(card.net_handicap, Some(7.0));
}
