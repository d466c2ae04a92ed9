//! Player that always passes.

use super::Strategy;
use crate::board::Board;
use crate::coord::Move;
use crate::error::Error;
use async_trait::async_trait;

/// Passes every turn. Useful for testing loops and ending games.
pub struct PassOnly {
    name: String,
}

impl PassOnly {
    /// Creates a pass-only strategy.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Strategy for PassOnly {
    async fn decide(
        &mut self,
        _board: &Board,
        _last_opponent_move: Option<Move>,
    ) -> Result<Move, Error> {
        Ok(Move::Pass)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_passes() {
        let mut strategy = PassOnly::new("Pass");
        let board = Board::empty(9);
        assert_eq!(strategy.decide(&board, None).await.unwrap(), Move::Pass);
    }
}
