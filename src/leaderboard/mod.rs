pub mod awards;
pub mod models;
pub mod partitioner;

pub use awards::{automatic_awards, Award, TournamentStandings};
pub use models::{net_score, GenderBoards, Leaderboards, NetStanding};
pub use partitioner::{is_net_eligible, net_ranking, partition, NET_ELIGIBILITY_THRESHOLD};

/// `1` -> `1st`, `2` -> `2nd`, `11` -> `11th`.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
