//! Sente - turn-based Go client for a REST game service
//!
//! This library mirrors one remote match locally and plays it out through
//! pluggable strategies.
//!
//! # Architecture
//!
//! - **Coord / Board**: the local game-state model, three coordinate
//!   notations and a disposable board mirror rebuilt on every resync
//! - **Strategy**: polymorphic move producers (manual, random, pass-only,
//!   remote-opponent watcher) plus a submission wrapper
//! - **Session**: the turn loop alternating two strategies against the
//!   authoritative server
//! - **Client**: bearer-authenticated REST plumbing behind the
//!   [`GameService`] seam
//!
//! # Example
//!
//! ```no_run
//! use sente::{ApiClient, GameSession, OpponentWatcher, PassOnly, Networked, ServiceConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::from_file("sente.toml")?;
//! let service = Arc::new(ApiClient::connect(&config).await?);
//! let me = Box::new(Networked::new(PassOnly::new("me"), service.clone(), 12345));
//! let them = Box::new(OpponentWatcher::new("them", service.clone(), 12345));
//! let outcome = GameSession::open(service, 12345, me, them).await?.run().await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod auth;
mod board;
mod client;
mod config;
mod coord;
mod error;
mod session;
mod strategy;

// Crate-level exports - errors
pub use error::Error;

// Crate-level exports - game-state model
pub use board::{Board, Color, Point};
pub use coord::{Coord, MAX_TEXT_SIZE, Move};

// Crate-level exports - service client
pub use auth::{AccessToken, load_or_request};
pub use client::{
    ApiClient, BLITZ_CUTOFF, GameData, GameRecord, GameService, GameSummary, GamesQuery, HOURS,
    LISTING_CEILING, LIVE_CUTOFF, MINUTES, MoveRecord, Page, sort_for_report,
};
pub use config::ServiceConfig;

// Crate-level exports - strategies and the play loop
pub use session::{GameSession, Outcome};
pub use strategy::{
    ManualStrategy, Networked, OpponentWatcher, PassOnly, RandomStrategy, Strategy, stdin_lines,
};
