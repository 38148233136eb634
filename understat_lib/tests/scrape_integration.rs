use understat_lib::types::{ShotResult, Side};
use understat_lib::{ScrapeClient, UnderstatError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    let path = format!(
        "{}/../understat_api/tests/fixtures/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {}", path, e))
}

async fn serve(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn league_matches_keeps_completed() {
    let server = MockServer::start().await;
    serve(&server, "/league/EPL/2024", load_fixture("league_EPL_2024.html")).await;

    let client = ScrapeClient::with_base_url(&server.uri());
    let matches = client.league_matches("EPL", 2024).await.unwrap();
    let ids: Vec<i64> = matches.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![26779, 26780]);
    assert_eq!(matches[0].home.title, "Tottenham");
    assert_eq!(matches[0].away_goals(), Some(1));
}

#[tokio::test]
async fn league_listing_includes_unplayed() {
    let server = MockServer::start().await;
    serve(&server, "/league/EPL/2024", load_fixture("league_EPL_2024.html")).await;

    let client = ScrapeClient::with_base_url(&server.uri());
    let listing = client.league_listing("EPL", 2024).await.unwrap();
    assert_eq!(listing.len(), 3);
    assert!(!listing[2].is_result);
    assert_eq!(listing[2].home.title, "Liverpool");
}

#[tokio::test]
async fn match_shots_home_then_away() {
    let server = MockServer::start().await;
    serve(&server, "/match/26779", load_fixture("match_26779.html")).await;

    let client = ScrapeClient::with_base_url(&server.uri());
    let shots = client.match_shots(26779).await.unwrap();
    assert_eq!(shots.len(), 5);
    assert!(shots[..3].iter().all(|s| s.side == Side::Home));
    assert!(shots[3..].iter().all(|s| s.side == Side::Away));
    assert_eq!(shots[0].player, "Son Heung-Min");
    assert_eq!(shots[3].player, "Chris Wood");
    assert_eq!(shots[3].result, ShotResult::Goal);
    assert_eq!(shots[3].xg, Some(0.6102));
    assert_eq!(shots[2].player_assisted, None);
    assert!(shots.iter().all(|s| s.match_id == 26779));
}

#[tokio::test]
async fn match_shots_null_xg_stays_none() {
    let server = MockServer::start().await;
    serve(&server, "/match/26780", load_fixture("match_26780.html")).await;

    let client = ScrapeClient::with_base_url(&server.uri());
    let shots = client.match_shots(26780).await.unwrap();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].xg, None);
    assert_eq!(shots[0].team(), Some("Brentford"));
}

#[tokio::test]
async fn match_id_mismatch_is_schema_error() {
    let server = MockServer::start().await;
    serve(&server, "/match/5", load_fixture("match_26779.html")).await;

    let client = ScrapeClient::with_base_url(&server.uri());
    let err = client.match_shots(5).await.unwrap_err();
    assert!(matches!(err, UnderstatError::Schema(_)));
    assert!(err.to_string().contains("/match/5"));
}

#[tokio::test]
async fn page_without_payload_is_not_found() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/match/1",
        "<html><body><p>Match not found</p></body></html>".to_string(),
    )
    .await;

    let client = ScrapeClient::with_base_url(&server.uri());
    let err = client.match_shots(1).await.unwrap_err();
    assert!(matches!(err, UnderstatError::PayloadNotFound(_)));
}

#[tokio::test]
async fn http_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/match/1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&server)
        .await;

    let client = ScrapeClient::with_base_url(&server.uri());
    let err = client.match_shots(1).await.unwrap_err();
    match err {
        UnderstatError::Network(understat_lib::understat_api::Error::HttpStatus { status, .. }) => {
            assert_eq!(status, 503)
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}
