use std::cmp::Ordering;
use strum::IntoEnumIterator;
use tracing::debug;

use super::models::{Leaderboards, NetStanding};
use crate::league::{Gender, ScoreRow};

/// Members need strictly more rounds than this before net results count.
pub const NET_ELIGIBILITY_THRESHOLD: u32 = 3;

pub fn is_net_eligible(row: &ScoreRow) -> bool {
    row.tournaments_played > NET_ELIGIBILITY_THRESHOLD
}

/// Splits one tournament's rows into gross and net leaderboards.
///
/// Rows are put in gross order first (best total, missing totals last, card id
/// on ties). The net boards are a stable sort of that order, so equal net
/// scores stay ranked by gross.
pub fn partition(rows: &[ScoreRow]) -> Leaderboards {
    let mut ordered: Vec<&ScoreRow> = rows.iter().collect();
    ordered.sort_by(|a, b| gross_order(a, b));

    let mut boards = Leaderboards::default();

    for gender in Gender::iter() {
        let gross: Vec<ScoreRow> = ordered
            .iter()
            .filter(|row| row.gender == gender)
            .map(|row| (*row).clone())
            .collect();

        if let Some(winner) = gross.first().filter(|row| row.total_score.is_some()) {
            debug!(%gender, name = %winner.name, total = ?winner.total_score, "Gross winner");
            boards.gross_winners.get_mut(gender).push(winner.clone());
        }

        *boards.gross.get_mut(gender) = gross;
    }

    let eligible: Vec<&ScoreRow> = ordered
        .iter()
        .copied()
        .filter(|row| is_net_eligible(row))
        .collect();

    for gender in Gender::iter() {
        let in_gender = || eligible.iter().copied().filter(move |row| row.gender == gender);

        let position = net_ranking(in_gender().filter(|row| !boards.is_gross_winner(row.member_id)));
        let strokes = net_ranking(in_gender());

        debug!(
            %gender,
            position_pool = position.len(),
            strokes_pool = strokes.len(),
            "Net pools ranked"
        );

        *boards.position_pool.get_mut(gender) = position;
        *boards.strokes_pool.get_mut(gender) = strokes;
    }

    boards
}

/// Ranks rows by net score. Rows missing a total or a baseline are dropped.
pub fn net_ranking<'a>(rows: impl Iterator<Item = &'a ScoreRow>) -> Vec<NetStanding> {
    let mut standings: Vec<NetStanding> = rows
        .filter_map(|row| {
            let standing = NetStanding::from_row(row);
            if standing.is_none() {
                debug!(card_id = row.card_id, name = %row.name, "Skipping row without total or baseline");
            }
            standing
        })
        .collect();
    standings.sort_by_key(|standing| standing.net_score);
    standings
}

fn gross_order(a: &ScoreRow, b: &ScoreRow) -> Ordering {
    let by_total = match (a.total_score, b.total_score) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_total.then(a.card_id.cmp(&b.card_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        card_id: i64,
        name: &str,
        gender: Gender,
        total: Option<i32>,
        baseline: Option<f64>,
        played: u32,
    ) -> ScoreRow {
        ScoreRow {
            card_id,
            member_id: card_id,
            name: name.to_string(),
            gender,
            gross_win: false,
            tournaments_played: played,
            total_score: total,
            baseline,
            handicap: baseline.unwrap_or_default(),
        }
    }

    fn names(standings: &[NetStanding]) -> Vec<&str> {
        standings.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_empty_boards() {
        let boards = partition(&[]);
        assert!(boards.is_empty());
        assert!(boards.gross_winners.is_empty());
        assert!(boards.position_pool.is_empty());
        assert!(boards.strokes_pool.is_empty());
    }

    #[test]
    fn gross_boards_split_by_gender_with_missing_totals_last() {
        let rows = vec![
            row(1, "Ana", Gender::Female, Some(90), Some(20.0), 5),
            row(2, "Ben", Gender::Male, None, Some(10.0), 5),
            row(3, "Cal", Gender::Male, Some(80), Some(8.0), 5),
            row(4, "Dee", Gender::Female, Some(85), Some(15.0), 5),
        ];
        let boards = partition(&rows);

        let male: Vec<_> = boards.gross.male.iter().map(|r| r.name.as_str()).collect();
        let female: Vec<_> = boards.gross.female.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(male, vec!["Cal", "Ben"]);
        assert_eq!(female, vec!["Dee", "Ana"]);
        assert_eq!(boards.gross_winners.male[0].name, "Cal");
        assert_eq!(boards.gross_winners.female[0].name, "Dee");
    }

    #[test]
    fn gender_without_rows_has_no_winner() {
        let rows = vec![row(1, "Cal", Gender::Male, Some(80), Some(8.0), 5)];
        let boards = partition(&rows);
        assert!(boards.gross_winners.female.is_empty());
        assert_eq!(boards.gross_winners.male.len(), 1);
    }

    #[test]
    fn three_rounds_played_is_not_net_eligible() {
        let rows = vec![
            row(1, "Winner", Gender::Male, Some(70), Some(2.0), 9),
            row(2, "Rookie", Gender::Male, Some(75), Some(30.0), 3),
            row(3, "Regular", Gender::Male, Some(90), Some(12.0), 4),
        ];
        let boards = partition(&rows);

        assert_eq!(names(&boards.position_pool.male), vec!["Regular"]);
        assert_eq!(names(&boards.strokes_pool.male), vec!["Winner", "Regular"]);
    }

    #[test]
    fn gross_winner_only_leaves_position_pool() {
        let rows = vec![
            row(1, "Low", Gender::Female, Some(75), Some(3.0), 6),
            row(2, "Mid", Gender::Female, Some(88), Some(18.0), 6),
        ];
        let boards = partition(&rows);

        assert_eq!(names(&boards.position_pool.female), vec!["Mid"]);
        assert_eq!(names(&boards.strokes_pool.female), vec!["Mid", "Low"]);
    }

    #[test]
    fn net_ties_keep_gross_order() {
        let rows = vec![
            row(1, "Champion", Gender::Male, Some(70), Some(0.0), 6),
            row(2, "Worse gross", Gender::Male, Some(90), Some(20.0), 6),
            row(3, "Better gross", Gender::Male, Some(85), Some(15.0), 6),
        ];
        let boards = partition(&rows);

        assert_eq!(
            names(&boards.position_pool.male),
            vec!["Better gross", "Worse gross"]
        );
        assert_eq!(boards.position_pool.male[0].net_score, 70);
    }

    #[test]
    fn rows_without_total_never_rank_on_net() {
        let rows = vec![
            row(1, "Champion", Gender::Male, Some(70), Some(0.0), 6),
            row(2, "No card", Gender::Male, None, Some(8.0), 6),
            row(3, "Counted", Gender::Male, Some(85), Some(15.0), 6),
            row(4, "Only entry", Gender::Female, None, Some(12.0), 6),
        ];
        let boards = partition(&rows);

        assert_eq!(names(&boards.position_pool.male), vec!["Counted"]);
        assert_eq!(names(&boards.strokes_pool.male), vec!["Champion", "Counted"]);
        assert!(boards.position_pool.female.is_empty());
        assert!(boards.strokes_pool.female.is_empty());

        assert!(!boards.is_gross_winner(2));
        assert!(!boards.is_gross_winner(4));
        assert!(boards.gross_winners.female.is_empty());
        assert_eq!(boards.gross.female.len(), 1);
    }

    #[test]
    fn rows_without_baseline_are_skipped_from_net_ranking() {
        let rows = vec![
            row(1, "Champion", Gender::Male, Some(70), Some(0.0), 6),
            row(2, "No baseline", Gender::Male, Some(75), None, 6),
            row(3, "Counted", Gender::Male, Some(85), Some(15.0), 6),
        ];
        let boards = partition(&rows);

        assert_eq!(names(&boards.position_pool.male), vec!["Counted"]);
        assert_eq!(boards.gross.male.len(), 3);
    }
}
