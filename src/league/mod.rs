mod errors;
pub mod models;
pub mod repository;
pub mod service;

pub use errors::LeagueError;
pub use models::*;
pub use repository::{InMemoryLeagueRepository, LeagueRepository, LeagueSnapshot};
pub use service::LeagueService;
