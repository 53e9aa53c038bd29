pub mod league_builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use league_builders::{round_of, LeagueBuilder};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
