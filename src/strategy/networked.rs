//! Submission wrapper for strategies that play a networked side.

use super::Strategy;
use crate::board::Board;
use crate::client::GameService;
use crate::coord::Move;
use crate::error::Error;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Wraps a deciding strategy and submits each decision to the service
/// before handing it back to the loop.
///
/// A failed submission is fatal: the loop never continues with a board the
/// server may not agree with.
pub struct Networked<S> {
    inner: S,
    service: Arc<dyn GameService>,
    game_id: u64,
}

impl<S: Strategy> Networked<S> {
    /// Wraps `inner` so its moves are posted to `game_id`.
    pub fn new(inner: S, service: Arc<dyn GameService>, game_id: u64) -> Self {
        Self {
            inner,
            service,
            game_id,
        }
    }
}

#[async_trait]
impl<S: Strategy> Strategy for Networked<S> {
    #[instrument(skip_all, fields(game_id = self.game_id, strategy = self.inner.name()))]
    async fn decide(
        &mut self,
        board: &Board,
        last_opponent_move: Option<Move>,
    ) -> Result<Move, Error> {
        let mv = self.inner.decide(board, last_opponent_move).await?;
        match mv {
            Move::Play(coord) => {
                self.service
                    .submit_move(self.game_id, &coord.to_api())
                    .await?;
                info!(%coord, "Move submitted");
            }
            Move::Pass => {
                self.service.submit_pass(self.game_id).await?;
                info!("Pass submitted");
            }
        }
        Ok(mv)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{GameData, GameRecord};
    use crate::strategy::PassOnly;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingService {
        submissions: Mutex<Vec<String>>,
        fail_submissions: bool,
    }

    #[async_trait]
    impl GameService for RecordingService {
        async fn fetch_game(&self, game_id: u64) -> Result<GameRecord, Error> {
            Ok(GameRecord {
                id: game_id,
                width: 9,
                height: 9,
                gamedata: GameData::default(),
            })
        }

        async fn submit_move(&self, _game_id: u64, api_coord: &str) -> Result<(), Error> {
            if self.fail_submissions {
                return Err(Error::SubmissionFailed {
                    message: "stub refused".to_string(),
                });
            }
            self.submissions.lock().unwrap().push(api_coord.to_string());
            Ok(())
        }

        async fn submit_pass(&self, _game_id: u64) -> Result<(), Error> {
            if self.fail_submissions {
                return Err(Error::SubmissionFailed {
                    message: "stub refused".to_string(),
                });
            }
            self.submissions.lock().unwrap().push("pass".to_string());
            Ok(())
        }
    }

    /// Strategy that plays one scripted coordinate.
    struct Scripted(Move);

    #[async_trait]
    impl Strategy for Scripted {
        async fn decide(
            &mut self,
            _board: &Board,
            _last: Option<Move>,
        ) -> Result<Move, Error> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "Scripted"
        }
    }

    #[tokio::test]
    async fn test_submits_before_returning() {
        let service = Arc::new(RecordingService::default());
        let mv = Move::from_numeric(9, 4, 4).unwrap();
        let mut strategy = Networked::new(Scripted(mv), service.clone(), 1);
        let board = Board::empty(9);

        let decided = strategy.decide(&board, None).await.unwrap();
        assert_eq!(decided, mv);
        assert_eq!(*service.submissions.lock().unwrap(), vec!["ee"]);
    }

    #[tokio::test]
    async fn test_pass_goes_to_pass_endpoint() {
        let service = Arc::new(RecordingService::default());
        let mut strategy = Networked::new(PassOnly::new("Pass"), service.clone(), 1);
        let board = Board::empty(9);

        strategy.decide(&board, None).await.unwrap();
        assert_eq!(*service.submissions.lock().unwrap(), vec!["pass"]);
    }

    #[tokio::test]
    async fn test_submission_failure_is_fatal() {
        let service = Arc::new(RecordingService {
            fail_submissions: true,
            ..Default::default()
        });
        let mut strategy = Networked::new(PassOnly::new("Pass"), service, 1);
        let board = Board::empty(9);

        let result = strategy.decide(&board, None).await;
        assert!(matches!(result, Err(Error::SubmissionFailed { .. })));
    }
}
