//! Uniformly random player.

use super::Strategy;
use crate::board::Board;
use crate::coord::Move;
use crate::error::Error;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use tracing::debug;

/// Plays a uniformly random empty point, passing only on a full board.
pub struct RandomStrategy {
    name: String,
    rng: StdRng,
}

impl RandomStrategy {
    /// Creates a random strategy seeded from the OS entropy source.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a random strategy with a fixed seed, for reproducible runs.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[async_trait]
impl Strategy for RandomStrategy {
    async fn decide(
        &mut self,
        board: &Board,
        _last_opponent_move: Option<Move>,
    ) -> Result<Move, Error> {
        match board.legal_moves().choose(&mut self.rng) {
            Some(coord) => {
                debug!(strategy = %self.name, %coord, "Sampled move");
                Ok(Move::Play(coord))
            }
            None => {
                debug!(strategy = %self.name, "No empty points, passing");
                Ok(Move::Pass)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Point;
    use crate::coord::Coord;

    #[tokio::test]
    async fn test_never_picks_an_occupied_point() {
        let mut board = Board::empty(5);
        // Stone out most of the board, leaving three empty points.
        for x in 0..5u16 {
            for y in 0..5u16 {
                if (x, y) != (0, 0) && (x, y) != (2, 3) && (x, y) != (4, 4) {
                    let coord = Coord::from_numeric(5, x, y).unwrap();
                    board.play(Move::Play(coord)).unwrap();
                }
            }
        }
        let mut strategy = RandomStrategy::with_seed("Random", 7);
        for _ in 0..50 {
            let mv = strategy.decide(&board, None).await.unwrap();
            let coord = mv.coord().expect("board has empty points");
            assert_eq!(board.get(coord).unwrap(), Point::Empty);
        }
    }

    #[tokio::test]
    async fn test_full_board_passes() {
        let mut board = Board::empty(3);
        for x in 0..3u16 {
            for y in 0..3u16 {
                let coord = Coord::from_numeric(3, x, y).unwrap();
                board.play(Move::Play(coord)).unwrap();
            }
        }
        let mut strategy = RandomStrategy::with_seed("Random", 7);
        assert_eq!(strategy.decide(&board, None).await.unwrap(), Move::Pass);
    }
}
