//! One match: two strategies alternating against an authoritative server.

use crate::board::Board;
use crate::client::GameService;
use crate::coord::Move;
use crate::error::Error;
use crate::strategy::Strategy;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// How a session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Both sides passed consecutively; the game is over.
    Ended,
    /// The user asked to leave mid-game. The game itself continues on the
    /// server.
    Quit,
}

/// A live connection to one remote match: its id, size, a local board
/// mirror, and the two strategies in move order (Black first).
pub struct GameSession {
    service: Arc<dyn GameService>,
    game_id: u64,
    size: u16,
    board: Board,
    strategies: [Box<dyn Strategy>; 2],
}

impl GameSession {
    /// Opens a session: fetches the game once to learn the board size and
    /// seed the local mirror.
    #[instrument(skip(service, first, second))]
    pub async fn open(
        service: Arc<dyn GameService>,
        game_id: u64,
        first: Box<dyn Strategy>,
        second: Box<dyn Strategy>,
    ) -> Result<Self, Error> {
        let game = service.fetch_game(game_id).await?;
        let size = game.size()?;
        let board = game.board()?;
        info!(size, moves = game.gamedata.moves.len(), "Session opened");
        Ok(Self {
            service,
            game_id,
            size,
            board,
            strategies: [first, second],
        })
    }

    /// The board size of the underlying game.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Runs turns until the game ends or the user quits.
    ///
    /// Each turn: resync the board from the server, let the side to move
    /// decide (and submit, if networked), validate the decision against the
    /// board it was shown, resync again, then hand the turn to the other
    /// side. The server stays the single source of truth throughout; the
    /// local apply is never trusted. Any error other than a quit aborts the
    /// session; the board is left at its last successful resync.
    #[instrument(skip(self), fields(game_id = self.game_id))]
    pub async fn run(&mut self) -> Result<Outcome, Error> {
        let mut last_move: Option<Move> = None;
        let mut consecutive_passes = 0u8;
        let mut turn = 0usize;

        loop {
            self.resync().await?;
            debug!(turn, "Board resynced");

            let strategy = &mut self.strategies[turn];
            let name = strategy.name().to_string();
            info!(strategy = %name, "Waiting for a move");

            let mv = match strategy.decide(&self.board, last_move).await {
                Ok(mv) => mv,
                Err(Error::Quit) => {
                    info!(strategy = %name, "Session quit");
                    return Ok(Outcome::Quit);
                }
                Err(e) => {
                    warn!(strategy = %name, error = %e, "Turn failed");
                    return Err(e);
                }
            };
            self.check_contract(&name, mv)?;
            info!(strategy = %name, %mv, "Move accepted");

            if mv.is_pass() {
                consecutive_passes += 1;
                if consecutive_passes >= 2 {
                    info!("Both sides passed, game over");
                    self.resync().await?;
                    return Ok(Outcome::Ended);
                }
            } else {
                consecutive_passes = 0;
            }

            // The second strategy never moves before the board reflects the
            // first one's move.
            self.resync().await?;
            last_move = Some(mv);
            turn = 1 - turn;
        }
    }

    /// Replaces the whole board from the server's move history. Never
    /// diffs, never trusts the local copy.
    async fn resync(&mut self) -> Result<(), Error> {
        let game = self.service.fetch_game(self.game_id).await?;
        let size = game.size()?;
        if size != self.size {
            return Err(Error::fetch(format!(
                "game {} changed size from {} to {size}",
                self.game_id, self.size
            )));
        }
        self.board = game.board()?;
        Ok(())
    }

    /// Validates the shape of a strategy's decision: a placement must at
    /// least belong to this game's board geometry. Occupancy is not checked
    /// here: a watcher legitimately reports a move the resynced board
    /// already shows, and for submitted moves the server has the final say.
    fn check_contract(&self, name: &str, mv: Move) -> Result<(), Error> {
        let Move::Play(coord) = mv else {
            return Ok(());
        };
        if coord.size() != self.size {
            return Err(Error::StrategyContractViolation {
                name: name.to_string(),
                message: format!(
                    "returned a coordinate for a {}x{} board in a {}x{} game",
                    coord.size(),
                    coord.size(),
                    self.size,
                    self.size
                ),
            });
        }
        Ok(())
    }
}
