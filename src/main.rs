use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use golf_league::{
    AdjustmentLogEntry, AdjustmentReport, AdjustmentService, Config, InMemoryLeagueRepository,
    LeagueError, LeagueService,
};

/// Exit status when a tournament or member id does not exist.
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Parser)]
#[command(name = "golf-league")]
#[command(about = "Golf league handicap adjustments and leaderboards", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Close a tournament and apply its handicap adjustments
    Finalize { tournament_id: i64 },
    /// Recompute the adjustment log of a finalized tournament
    Replay { tournament_id: i64 },
    /// Gross and net boards with automatic awards
    Standings { tournament_id: i64 },
    Members,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let not_found = err
                .downcast_ref::<LeagueError>()
                .is_some_and(LeagueError::is_not_found);
            if not_found {
                ExitCode::from(EXIT_NOT_FOUND)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let repository = Arc::new(
        InMemoryLeagueRepository::load_json(&config.snapshot_path)
            .await
            .with_context(|| {
                format!(
                    "Cannot load league snapshot from {}",
                    config.snapshot_path.display()
                )
            })?,
    );
    let adjustments = AdjustmentService::new(repository.clone());

    match cli.command {
        Commands::Finalize { tournament_id } => {
            let summary = adjustments
                .finalize(tournament_id)
                .await
                .with_context(|| format!("Cannot finalize tournament {tournament_id}"))?;
            print_json(&reports(&summary.log))?;

            if config.write_back {
                repository
                    .save_json(&config.snapshot_path)
                    .await
                    .context("Cannot save league snapshot")?;
            }
            info!(tournament_id, "Finalize complete");
        }
        Commands::Replay { tournament_id } => {
            let log = adjustments
                .replay(tournament_id)
                .await
                .with_context(|| format!("Cannot replay tournament {tournament_id}"))?;
            print_json(&reports(&log))?;
        }
        Commands::Standings { tournament_id } => {
            let standings = adjustments
                .standings(tournament_id)
                .await
                .with_context(|| format!("Cannot build standings for {tournament_id}"))?;
            print_json(&standings)?;
        }
        Commands::Members => {
            let members = LeagueService::new(repository.clone()).list_members().await?;
            print_json(&members)?;
        }
    }

    Ok(())
}

fn reports(log: &[AdjustmentLogEntry]) -> Vec<AdjustmentReport> {
    log.iter().map(AdjustmentReport::from).collect()
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
