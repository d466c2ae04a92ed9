#![cfg(feature = "api")]
//! Smoke tests against the live service.
//!
//! These spend a real token. Opt in with `cargo test --features api` and
//! `SENTE_*` credentials (or a cached token) in the environment.

use sente::{ApiClient, GamesQuery, ServiceConfig, sort_for_report};

#[tokio::test]
async fn test_list_live_games() {
    let config = ServiceConfig::from_env().expect("credentials from environment");
    let client = ApiClient::connect(&config).await.expect("connect");

    let games = client
        .list_games(&GamesQuery::interesting(19))
        .await
        .expect("listing");
    let sorted = sort_for_report(games);

    assert!(
        sorted
            .windows(2)
            .all(|pair| pair[0].time_per_move <= pair[1].time_per_move)
    );
}

#[tokio::test]
async fn test_fetch_a_listed_game() {
    use sente::GameService;

    let config = ServiceConfig::from_env().expect("credentials from environment");
    let client = ApiClient::connect(&config).await.expect("connect");

    let games = client
        .list_games(&GamesQuery::interesting(19))
        .await
        .expect("listing");
    let Some(first) = games.first() else {
        return;
    };

    let game = client.fetch_game(first.id).await.expect("fetch");
    assert_eq!(game.size().expect("square board"), 19);
    game.board().expect("history replays");
}
