//! HTTP client for the game service.
//!
//! [`GameService`] is the seam the core plays through: fetch one game's
//! authoritative state, submit a move, submit a pass. [`ApiClient`] is the
//! real bearer-authenticated implementation; tests drive the watcher and
//! the play loop with stubs instead.

use crate::auth::{self, AccessToken};
use crate::board::Board;
use crate::config::ServiceConfig;
use crate::coord::Move;
use crate::error::Error;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Seconds in a minute.
pub const MINUTES: i64 = 60;
/// Seconds in an hour.
pub const HOURS: i64 = 60 * MINUTES;
/// Games averaging less than an hour per move are considered live.
pub const LIVE_CUTOFF: i64 = HOURS;
/// Games averaging less than twenty seconds per move are considered blitz.
pub const BLITZ_CUTOFF: i64 = 20;
/// Hard cap on how many records one listing call may aggregate.
pub const LISTING_CEILING: u64 = 1000;

/// The operations the core needs from the remote service.
#[async_trait]
pub trait GameService: Send + Sync {
    /// Fetches one game's authoritative record.
    async fn fetch_game(&self, game_id: u64) -> Result<GameRecord, Error>;

    /// Submits a stone placement, given in api notation.
    async fn submit_move(&self, game_id: u64, api_coord: &str) -> Result<(), Error>;

    /// Submits a pass.
    async fn submit_pass(&self, game_id: u64) -> Result<(), Error>;
}

/// One move as the service records it: `[x, y, elapsed_seconds]`, zero
/// based, `(-1, -1)` for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord(pub i32, pub i32, pub f64);

/// Move history and metadata nested inside a game record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameData {
    /// Moves in play order.
    #[serde(default)]
    pub moves: Vec<MoveRecord>,
}

/// A game as fetched from the service. Unknown fields are dropped on the
/// floor; the service sends far more than the client needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Service-side game id.
    pub id: u64,
    /// Board width.
    pub width: u16,
    /// Board height. Must equal the width.
    pub height: u16,
    /// Nested game state.
    #[serde(default)]
    pub gamedata: GameData,
}

impl GameRecord {
    /// The board size, insisting on a square board.
    pub fn size(&self) -> Result<u16, Error> {
        if self.width != self.height {
            return Err(Error::fetch(format!(
                "game {} has a {}x{} board; only square boards are supported",
                self.id, self.width, self.height
            )));
        }
        Ok(self.width)
    }

    /// The move history as typed moves.
    pub fn moves(&self) -> Result<Vec<Move>, Error> {
        let size = self.size()?;
        self.gamedata
            .moves
            .iter()
            .enumerate()
            .map(|(index, record)| {
                Move::from_numeric(size, record.0, record.1).map_err(|e| {
                    Error::IllegalReplay {
                        index,
                        message: e.to_string(),
                    }
                })
            })
            .collect()
    }

    /// The most recent move, if any have been played.
    pub fn last_move(&self) -> Result<Option<Move>, Error> {
        Ok(self.moves()?.pop())
    }

    /// Rebuilds the full board from the move history.
    pub fn board(&self) -> Result<Board, Error> {
        Board::from_moves(self.size()?, &self.moves()?)
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Total records matching the query, across all pages.
    pub count: u64,
    /// Absolute URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// Records on this page.
    #[serde(default)]
    pub results: Vec<T>,
}

/// Listing entry for one game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSummary {
    /// Service-side game id.
    pub id: u64,
    /// Game name, when set by the players.
    #[serde(default)]
    pub name: Option<String>,
    /// Board width.
    pub width: u16,
    /// Board height.
    pub height: u16,
    /// Whether the game is rated.
    #[serde(default)]
    pub ranked: bool,
    /// Start timestamp, service formatted.
    #[serde(default)]
    pub started: Option<String>,
    /// Average seconds per move.
    #[serde(default)]
    pub time_per_move: Option<i64>,
    /// White's rank, when known.
    #[serde(default)]
    pub white_player_rank: Option<i64>,
    /// Black's rank, when known.
    #[serde(default)]
    pub black_player_rank: Option<i64>,
}

/// Filter criteria for the games listing.
#[derive(Debug, Clone, Default)]
pub struct GamesQuery {
    /// Restrict to square boards of this size.
    pub size: Option<u16>,
    /// Restrict to rated games.
    pub ranked: Option<bool>,
    /// Require the game to have started.
    pub started: Option<bool>,
    /// Require the game to have ended (false = still running).
    pub ended: Option<bool>,
    /// Lower bound on seconds per move.
    pub min_time_per_move: Option<i64>,
    /// Upper bound on seconds per move.
    pub max_time_per_move: Option<i64>,
    /// Require both players to hold a rank.
    pub ranked_players: bool,
}

impl GamesQuery {
    /// The "currently interesting" preset: running rated games between
    /// ranked players on a board of the given size.
    pub fn interesting(size: u16) -> Self {
        Self {
            size: Some(size),
            ranked: Some(true),
            started: Some(true),
            ended: Some(false),
            min_time_per_move: Some(0),
            max_time_per_move: None,
            ranked_players: true,
        }
    }

    /// Renders the filter as service query parameters.
    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(size) = self.size {
            params.push(("width".to_string(), size.to_string()));
            params.push(("height".to_string(), size.to_string()));
        }
        if let Some(ranked) = self.ranked {
            params.push(("ranked".to_string(), py_bool(ranked)));
        }
        if let Some(started) = self.started {
            params.push(("started__isnull".to_string(), py_bool(!started)));
        }
        if let Some(ended) = self.ended {
            params.push(("ended__isnull".to_string(), py_bool(!ended)));
        }
        if let Some(gt) = self.min_time_per_move {
            params.push(("time_per_move__gt".to_string(), gt.to_string()));
        }
        if let Some(lt) = self.max_time_per_move {
            params.push(("time_per_move__lt".to_string(), lt.to_string()));
        }
        if self.ranked_players {
            params.push(("white_player_rank__gt".to_string(), "0".to_string()));
            params.push(("black_player_rank__gt".to_string(), "0".to_string()));
        }
        params
    }
}

/// The service's query parser expects Python-style booleans.
fn py_bool(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

/// Sorts a listing for the games report: quickest games first, then by
/// start time, player ranks, and id as tie breakers.
pub fn sort_for_report(mut games: Vec<GameSummary>) -> Vec<GameSummary> {
    games.sort_by(|a, b| {
        (
            a.time_per_move,
            &a.started,
            a.white_player_rank,
            a.black_player_rank,
            a.id,
        )
            .cmp(&(
                b.time_per_move,
                &b.started,
                b.white_player_rank,
                b.black_player_rank,
                b.id,
            ))
    });
    games
}

/// Rejects listings the service would only hand over in pieces.
fn ensure_listable(count: u64) -> Result<(), Error> {
    if count > LISTING_CEILING {
        return Err(Error::fetch(format!(
            "query matches {count} records; refusing to aggregate more than {LISTING_CEILING} at once"
        )));
    }
    Ok(())
}

/// Bearer-authenticated client for the game service REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    api_root: String,
    http: reqwest::Client,
    token: AccessToken,
}

impl ApiClient {
    /// Builds a client: loads (or requests) the access token, then holds it
    /// immutably for the process lifetime.
    #[instrument(skip_all, fields(base_url = %config.base_url()))]
    pub async fn connect(config: &ServiceConfig) -> Result<Self, Error> {
        let http = reqwest::Client::new();
        let token = auth::load_or_request(config, &http, false).await?;
        info!("Connected to game service");
        Ok(Self {
            api_root: config.api_root(),
            http,
            token,
        })
    }

    /// Full URL for an API endpoint stub, e.g. `games/123`.
    fn endpoint(&self, stub: &str) -> String {
        format!("{}/{}/", self.api_root, stub.trim_matches('/'))
    }

    /// Authenticated GET returning a deserialized body.
    #[instrument(skip_all, fields(url = %url))]
    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        debug!("GET");
        let response = self
            .http
            .get(url)
            .query(params)
            .bearer_auth(self.token.reveal())
            .send()
            .await
            .map_err(|e| Error::fetch(format!("GET {url}: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::fetch(format!("GET {url} returned {status}: {body}")));
        }
        response
            .json()
            .await
            .map_err(|e| Error::fetch(format!("GET {url}: malformed response: {e}")))
    }

    /// Authenticated POST with a JSON body. Failures carry the response
    /// body; the caller decides which error they are.
    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<(), String> {
        debug!(url, "POST");
        let response = self
            .http
            .post(url)
            .bearer_auth(self.token.reveal())
            .json(body)
            .send()
            .await
            .map_err(|e| format!("POST {url}: {e}"))?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format!("POST {url} returned {status}: {text}"));
        }
        Ok(())
    }

    /// Fetches every page of the games listing matching the filter.
    ///
    /// Fails outright when the total match count exceeds
    /// [`LISTING_CEILING`]. No partial data.
    #[instrument(skip(self, query))]
    pub async fn list_games(&self, query: &GamesQuery) -> Result<Vec<GameSummary>, Error> {
        let page: Page<GameSummary> = self
            .get(&self.endpoint("games"), &query.to_params())
            .await?;
        ensure_listable(page.count)?;

        let mut games = page.results;
        let mut next = page.next;
        while let Some(url) = next {
            debug!(url = %url, "Following listing cursor");
            let page: Page<GameSummary> = self.get(&url, &[]).await?;
            games.extend(page.results);
            next = page.next;
        }
        info!(count = games.len(), "Listing aggregated");
        Ok(games)
    }
}

#[async_trait]
impl GameService for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_game(&self, game_id: u64) -> Result<GameRecord, Error> {
        self.get(&self.endpoint(&format!("games/{game_id}")), &[])
            .await
    }

    #[instrument(skip(self))]
    async fn submit_move(&self, game_id: u64, api_coord: &str) -> Result<(), Error> {
        info!(api_coord, "Submitting move");
        let body = serde_json::json!({ "move": api_coord });
        self.post(&self.endpoint(&format!("games/{game_id}/move")), &body)
            .await
            .map_err(|message| Error::SubmissionFailed { message })
    }

    #[instrument(skip(self))]
    async fn submit_pass(&self, game_id: u64) -> Result<(), Error> {
        info!("Submitting pass");
        let body = serde_json::json!({});
        self.post(&self.endpoint(&format!("games/{game_id}/pass")), &body)
            .await
            .map_err(|message| Error::SubmissionFailed { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Point};
    use crate::coord::Coord;

    #[test]
    fn test_game_record_tolerates_extra_fields() {
        let raw = serde_json::json!({
            "id": 42,
            "width": 9,
            "height": 9,
            "players": { "black": { "username": "a" } },
            "rules": "japanese",
            "gamedata": {
                "moves": [[4, 4, 12.5], [-1, -1, 3.0]],
                "phase": "play"
            }
        });
        let record: GameRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.size().unwrap(), 9);
        let moves = record.moves().unwrap();
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[1], Move::Pass);
        assert_eq!(record.last_move().unwrap(), Some(Move::Pass));
    }

    #[test]
    fn test_game_record_rebuilds_board() {
        let record = GameRecord {
            id: 1,
            width: 9,
            height: 9,
            gamedata: GameData {
                moves: vec![MoveRecord(2, 2, 1.0), MoveRecord(6, 6, 1.0)],
            },
        };
        let board = record.board().unwrap();
        let black = Coord::from_numeric(9, 2, 2).unwrap();
        let white = Coord::from_numeric(9, 6, 6).unwrap();
        assert_eq!(board.get(black).unwrap(), Point::Stone(Color::Black));
        assert_eq!(board.get(white).unwrap(), Point::Stone(Color::White));
        assert_eq!(board.to_move(), Color::Black);
    }

    #[test]
    fn test_non_square_board_rejected() {
        let record = GameRecord {
            id: 1,
            width: 9,
            height: 13,
            gamedata: GameData::default(),
        };
        assert!(matches!(record.size(), Err(Error::Fetch { .. })));
    }

    #[test]
    fn test_corrupt_history_is_illegal_replay() {
        let record = GameRecord {
            id: 1,
            width: 9,
            height: 9,
            gamedata: GameData {
                moves: vec![MoveRecord(2, 2, 1.0), MoveRecord(40, 2, 1.0)],
            },
        };
        match record.moves() {
            Err(Error::IllegalReplay { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected IllegalReplay, got {other:?}"),
        }
    }

    #[test]
    fn test_interesting_query_params() {
        let params = GamesQuery::interesting(19).to_params();
        let find = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(find("width"), Some("19"));
        assert_eq!(find("height"), Some("19"));
        assert_eq!(find("ranked"), Some("True"));
        assert_eq!(find("started__isnull"), Some("False"));
        assert_eq!(find("ended__isnull"), Some("True"));
        assert_eq!(find("white_player_rank__gt"), Some("0"));
    }

    #[test]
    fn test_report_sort_order() {
        let game = |id, time_per_move| GameSummary {
            id,
            name: None,
            width: 19,
            height: 19,
            ranked: true,
            started: None,
            time_per_move,
            white_player_rank: None,
            black_player_rank: None,
        };
        let sorted = sort_for_report(vec![
            game(3, Some(600)),
            game(1, Some(30)),
            game(2, Some(30)),
        ]);
        let ids: Vec<u64> = sorted.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_listing_ceiling() {
        assert!(ensure_listable(LISTING_CEILING).is_ok());
        assert!(matches!(
            ensure_listable(LISTING_CEILING + 1),
            Err(Error::Fetch { .. })
        ));
    }

    #[test]
    fn test_page_parses_without_results() {
        let page: Page<GameSummary> =
            serde_json::from_value(serde_json::json!({ "count": 0, "next": null })).unwrap();
        assert_eq!(page.count, 0);
        assert!(page.next.is_none());
        assert!(page.results.is_empty());
    }
}
