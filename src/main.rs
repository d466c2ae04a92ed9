//! Sente - turn-based Go client CLI.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, StrategyKind};
use sente::{
    ApiClient, GameSession, GamesQuery, ManualStrategy, Networked, OpponentWatcher, Outcome,
    PassOnly, RandomStrategy, ServiceConfig, Strategy, load_or_request, sort_for_report,
    stdin_lines,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout belongs to the board and the prompts.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            game_id,
            black,
            white,
            config,
            poll_period,
            max_polls,
        } => run_play(game_id, black, white, &config, poll_period, max_polls).await,
        Command::Games {
            size,
            max_time_per_move,
            live,
            blitz,
            config,
        } => {
            let cutoff = if blitz {
                Some(sente::BLITZ_CUTOFF)
            } else if live {
                Some(sente::LIVE_CUTOFF)
            } else {
                max_time_per_move
            };
            run_games(size, cutoff, &config).await
        }
        Command::Login { config, force } => run_login(&config, force).await,
    }
}

/// Builds the strategy for one side of the match.
fn build_strategy(
    kind: StrategyKind,
    side: &str,
    service: Arc<ApiClient>,
    game_id: u64,
    poll_period: u64,
    max_polls: u32,
) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::Manual => Box::new(Networked::new(
            ManualStrategy::new(format!("Manual ({side})"), stdin_lines()),
            service,
            game_id,
        )),
        StrategyKind::Random => Box::new(Networked::new(
            RandomStrategy::new(format!("Random ({side})")),
            service,
            game_id,
        )),
        StrategyKind::Pass => Box::new(Networked::new(
            PassOnly::new(format!("Pass ({side})")),
            service,
            game_id,
        )),
        StrategyKind::Remote => Box::new(OpponentWatcher::with_cadence(
            format!("Opponent ({side})"),
            service,
            game_id,
            Duration::from_secs(poll_period),
            max_polls,
        )),
    }
}

/// Play one match to completion.
async fn run_play(
    game_id: u64,
    black: StrategyKind,
    white: StrategyKind,
    config: &Path,
    poll_period: u64,
    max_polls: u32,
) -> Result<()> {
    let config = ServiceConfig::from_file(config)?;
    let service = Arc::new(ApiClient::connect(&config).await?);

    let first = build_strategy(
        black,
        "Black",
        service.clone(),
        game_id,
        poll_period,
        max_polls,
    );
    let second = build_strategy(
        white,
        "White",
        service.clone(),
        game_id,
        poll_period,
        max_polls,
    );

    let mut session = GameSession::open(service, game_id, first, second)
        .await
        .context("failed to open the game")?;
    info!(game_id, size = session.size(), "Joined game");

    match session.run().await? {
        Outcome::Ended => println!("game over: both sides passed"),
        Outcome::Quit => println!("left the game; it continues on the server"),
    }
    Ok(())
}

/// Print the currently interesting games, quickest first.
async fn run_games(size: u16, max_time_per_move: Option<i64>, config: &Path) -> Result<()> {
    let config = ServiceConfig::from_file(config)?;
    let service = ApiClient::connect(&config).await?;

    let mut query = GamesQuery::interesting(size);
    query.max_time_per_move = max_time_per_move;
    let games = sort_for_report(service.list_games(&query).await?);

    println!("{:>10}  {:>6}  {:>9}  {:>5}  name", "id", "size", "s/move", "ranks");
    for game in &games {
        println!(
            "{:>10}  {:>3}x{:<2}  {:>9}  {:>2}/{:<2}  {}",
            game.id,
            game.width,
            game.height,
            game.time_per_move
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
            game.black_player_rank.unwrap_or(0),
            game.white_player_rank.unwrap_or(0),
            game.name.as_deref().unwrap_or(""),
        );
    }
    println!("{} games", games.len());
    Ok(())
}

/// Obtain or refresh the cached access token.
async fn run_login(config: &Path, force: bool) -> Result<()> {
    let config = ServiceConfig::from_file(config)?;
    let http = reqwest::Client::new();
    load_or_request(&config, &http, force)
        .await
        .context("token exchange failed")?;
    println!("access token cached at {}", config.token_cache().display());
    Ok(())
}
