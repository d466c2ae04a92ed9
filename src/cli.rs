//! Command-line interface for sente.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sente - play turn-based Go against a remote game service
#[derive(Parser, Debug)]
#[command(name = "sente")]
#[command(about = "Turn-based Go client for a REST game service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Which strategy plays a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// Read moves from stdin in visual notation (e.g. `E5`, `pass`).
    Manual,
    /// Play a uniformly random empty point.
    Random,
    /// Pass every turn.
    Pass,
    /// The remote opponent: watch the service until they move.
    Remote,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one remote match to completion
    Play {
        /// Service-side game id to join
        game_id: u64,

        /// Strategy for Black (moves first)
        #[arg(long, value_enum, default_value = "manual")]
        black: StrategyKind,

        /// Strategy for White
        #[arg(long, value_enum, default_value = "remote")]
        white: StrategyKind,

        /// Path to the credentials file
        #[arg(short, long, default_value = "sente.toml")]
        config: PathBuf,

        /// Seconds between opponent polls
        #[arg(long, default_value = "5")]
        poll_period: u64,

        /// Opponent polls before giving up
        #[arg(long, default_value = "10")]
        max_polls: u32,
    },

    /// List currently interesting games on the service
    Games {
        /// Board size to filter on
        #[arg(long, default_value = "19")]
        size: u16,

        /// Only games faster than this many seconds per move
        #[arg(long, conflicts_with_all = ["live", "blitz"])]
        max_time_per_move: Option<i64>,

        /// Only live games (under an hour per move)
        #[arg(long, conflicts_with = "blitz")]
        live: bool,

        /// Only blitz games (under twenty seconds per move)
        #[arg(long)]
        blitz: bool,

        /// Path to the credentials file
        #[arg(short, long, default_value = "sente.toml")]
        config: PathBuf,
    },

    /// Obtain (or refresh) the cached access token
    Login {
        /// Path to the credentials file
        #[arg(short, long, default_value = "sente.toml")]
        config: PathBuf,

        /// Request a fresh token even if one is cached
        #[arg(long)]
        force: bool,
    },
}
