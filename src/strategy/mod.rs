//! Strategy trait and implementations.
//!
//! A strategy is the one polymorphic seam in the play loop: shown the
//! current board and the last move the opponent made, it produces the next
//! move, performing whatever side effect that takes: prompting a human,
//! sampling at random, or waiting on the service until the opponent shows
//! up.

mod manual;
mod networked;
mod pass;
mod random;
mod watcher;

pub use manual::{ManualStrategy, stdin_lines};
pub use networked::Networked;
pub use pass::PassOnly;
pub use random::RandomStrategy;
pub use watcher::OpponentWatcher;

use crate::board::Board;
use crate::coord::Move;
use crate::error::Error;
use async_trait::async_trait;

/// A move-producing policy for one side of a game.
#[async_trait]
pub trait Strategy: Send {
    /// Produces the next move for the side to move on `board`.
    ///
    /// `last_opponent_move` is the most recent move known to the caller,
    /// `None` before either side has played. Implementations that talk to
    /// the service submit their decision before returning it.
    async fn decide(
        &mut self,
        board: &Board,
        last_opponent_move: Option<Move>,
    ) -> Result<Move, Error>;

    /// The strategy's display name.
    fn name(&self) -> &str;
}
