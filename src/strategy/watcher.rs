//! Remote opponent detection by polling.

use super::Strategy;
use crate::board::Board;
use crate::client::GameService;
use crate::coord::Move;
use crate::error::Error;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// Default pause between polls.
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(5);
/// Default number of polls before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Stands in for the opponent: never chooses a move, only watches the
/// service's move list until it grows past the last move we know about.
///
/// Polling is a plain sleep-then-check cycle on the caller's stack; the
/// attempt cap is the only guard against waiting forever.
pub struct OpponentWatcher {
    name: String,
    service: Arc<dyn GameService>,
    game_id: u64,
    poll_period: Duration,
    max_attempts: u32,
}

impl OpponentWatcher {
    /// Creates a watcher with the default polling cadence.
    pub fn new(name: impl Into<String>, service: Arc<dyn GameService>, game_id: u64) -> Self {
        Self::with_cadence(
            name,
            service,
            game_id,
            DEFAULT_POLL_PERIOD,
            DEFAULT_MAX_ATTEMPTS,
        )
    }

    /// Creates a watcher with an explicit poll period and attempt cap.
    pub fn with_cadence(
        name: impl Into<String>,
        service: Arc<dyn GameService>,
        game_id: u64,
        poll_period: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            name: name.into(),
            service,
            game_id,
            poll_period,
            max_attempts,
        }
    }
}

#[async_trait]
impl Strategy for OpponentWatcher {
    #[instrument(skip(self, board), fields(game_id = self.game_id))]
    async fn decide(
        &mut self,
        board: &Board,
        last_opponent_move: Option<Move>,
    ) -> Result<Move, Error> {
        for attempt in 1..=self.max_attempts {
            debug!(attempt, "Polling for the opponent's move");
            let game = self.service.fetch_game(self.game_id).await?;
            let latest = game.last_move()?;
            if latest != last_opponent_move {
                if let Some(mv) = latest {
                    info!(%mv, attempt, "Opponent moved");
                    return Ok(mv);
                }
            }
            if attempt < self.max_attempts {
                sleep(self.poll_period).await;
            }
        }
        Err(Error::OpponentTimeout {
            attempts: self.max_attempts,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
