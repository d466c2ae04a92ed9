//! Human player reading moves from an input channel.

use super::Strategy;
use crate::board::Board;
use crate::coord::{Coord, Move};
use crate::error::Error;
use async_trait::async_trait;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Human player. Renders the board, prompts, and re-prompts until the
/// input parses as a visual coordinate, `pass`, or a quit keyword.
pub struct ManualStrategy {
    name: String,
    input_rx: mpsc::UnboundedReceiver<String>,
}

impl ManualStrategy {
    /// Creates a manual strategy fed by the given line channel.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }
}

/// Spawns a task that forwards stdin lines into a channel suitable for
/// [`ManualStrategy::new`].
pub fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).is_err() {
                break;
            }
        }
        debug!("Stdin closed");
    });
    rx
}

#[async_trait]
impl Strategy for ManualStrategy {
    async fn decide(
        &mut self,
        board: &Board,
        last_opponent_move: Option<Move>,
    ) -> Result<Move, Error> {
        println!("{board}");
        if let Some(mv) = last_opponent_move {
            println!("opponent played: {mv}");
        }
        println!("your move ({} | pass | quit):", example_coord(board));

        loop {
            let Some(line) = self.input_rx.recv().await else {
                info!("Input channel closed, quitting");
                return Err(Error::Quit);
            };
            let input = line.trim();
            match input.to_ascii_lowercase().as_str() {
                "" => continue,
                "pass" => return Ok(Move::Pass),
                "q" | "quit" => {
                    info!("User quit");
                    return Err(Error::Quit);
                }
                _ => match Coord::from_visual(board.size(), input) {
                    Ok(coord) => {
                        debug!(%coord, "Accepted input");
                        return Ok(Move::Play(coord));
                    }
                    Err(e) => {
                        // Bad input never fails the turn; ask again.
                        warn!(input, error = %e, "Unparseable move");
                        println!("{e}; try again:");
                    }
                },
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A plausible coordinate for the prompt, near the middle of the board.
fn example_coord(board: &Board) -> String {
    let mid = board.size() / 2;
    Coord::from_numeric(board.size(), mid, mid)
        .map(|c| c.to_visual())
        .unwrap_or_else(|_| "A1".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn strategy_with_input(lines: &[&str]) -> ManualStrategy {
        let (tx, rx) = mpsc::unbounded_channel();
        for line in lines {
            tx.send(line.to_string()).unwrap();
        }
        drop(tx);
        ManualStrategy::new("Human", rx)
    }

    #[tokio::test]
    async fn test_parses_visual_input() {
        let mut strategy = strategy_with_input(&["e5"]);
        let board = Board::empty(9);
        let mv = strategy.decide(&board, None).await.unwrap();
        assert_eq!(mv.to_numeric(), (4, 4));
    }

    #[tokio::test]
    async fn test_reprompts_on_garbage() {
        let mut strategy = strategy_with_input(&["zz9", "", "E10", "C3"]);
        let board = Board::empty(9);
        let mv = strategy.decide(&board, None).await.unwrap();
        assert_eq!(mv.to_numeric(), (2, 6));
    }

    #[tokio::test]
    async fn test_pass_keyword() {
        let mut strategy = strategy_with_input(&["  PASS "]);
        let board = Board::empty(9);
        assert_eq!(strategy.decide(&board, None).await.unwrap(), Move::Pass);
    }

    #[tokio::test]
    async fn test_quit_keyword() {
        let mut strategy = strategy_with_input(&["q"]);
        let board = Board::empty(9);
        assert!(matches!(
            strategy.decide(&board, None).await,
            Err(Error::Quit)
        ));
    }

    #[tokio::test]
    async fn test_closed_channel_quits() {
        let mut strategy = strategy_with_input(&[]);
        let board = Board::empty(9);
        assert!(matches!(
            strategy.decide(&board, None).await,
            Err(Error::Quit)
        ));
    }
}
