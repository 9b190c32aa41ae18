//! HTTP client behavior against a local catalog server.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use giveaway::catalog::{CatalogClient, HttpCatalogClient, NetworkMonitor};
use giveaway::{ApiError, AppEnvironment, GiveawayFilter, GiveawayItem};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn list() -> Json<Vec<GiveawayItem>> {
    Json(GiveawayItem::mock_list(3))
}

async fn filtered(
    State(seen): State<Seen>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<GiveawayItem>> {
    seen.lock().unwrap().push(query);
    Json(GiveawayItem::mock_list(2))
}

async fn detail(Query(query): Query<HashMap<String, String>>) -> Result<Json<GiveawayItem>, StatusCode> {
    let id = query
        .get("id")
        .and_then(|raw| raw.parse().ok())
        .ok_or(StatusCode::BAD_REQUEST)?;
    if id == 404 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(GiveawayItem::mock(id)))
}

async fn serve(seen: Seen) -> SocketAddr {
    let router = Router::new()
        .route("/api/giveaways", get(list))
        .route("/api/filter", get(filtered))
        .route("/api/giveaway", get(detail))
        .route("/missing/giveaways", get(|| async { StatusCode::NOT_FOUND }))
        .route(
            "/failing/giveaways",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/null/giveaways", get(|| async { "null" }))
        .route("/empty/giveaways", get(|| async { "" }))
        .route("/broken/giveaways", get(|| async { "[{\"id\": " }))
        .route("/binary/giveaways", get(|| async { vec![0xff_u8, 0xfe, 0xfd] }))
        .with_state(seen);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn client_at(addr: SocketAddr, root: &str) -> HttpCatalogClient {
    HttpCatalogClient::new(
        &format!("http://{addr}/{root}"),
        Duration::from_secs(5),
        AppEnvironment::Release,
        Arc::new(NetworkMonitor::default()),
    )
    .unwrap()
}

#[tokio::test]
async fn lists_all_giveaways() {
    let addr = serve(Seen::default()).await;
    let client = client_at(addr, "api");

    let items = client.giveaways(None).await.unwrap().unwrap();
    let ids: Vec<i64> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(items.iter().all(|item| !item.is_favorite));
}

#[tokio::test]
async fn filter_fields_become_query_parameters() {
    let seen = Seen::default();
    let addr = serve(Arc::clone(&seen)).await;
    let client = client_at(addr, "api");

    let filter = GiveawayFilter {
        platform: Some("epic-games-store.steam".to_string()),
        kind: None,
        sort_by: Some("popularity".to_string()),
    };
    let items = client.giveaways(Some(&filter)).await.unwrap().unwrap();
    assert_eq!(items.len(), 2);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].get("platform").map(String::as_str), Some("epic-games-store.steam"));
    assert_eq!(seen[0].get("sort-by").map(String::as_str), Some("popularity"));
    assert!(!seen[0].contains_key("type"));
}

#[tokio::test]
async fn fetches_detail_by_id() {
    let addr = serve(Seen::default()).await;
    let client = client_at(addr, "api");

    let item = client.giveaway_detail(77).await.unwrap().unwrap();
    assert_eq!(item.id, 77);
    assert_eq!(item.kind.as_deref(), Some("DLC"));

    assert_eq!(
        client.giveaway_detail(404).await,
        Err(ApiError::HttpStatus(404))
    );
}

#[tokio::test]
async fn error_statuses_are_reported_with_their_code() {
    let addr = serve(Seen::default()).await;

    assert_eq!(
        client_at(addr, "missing").giveaways(None).await,
        Err(ApiError::HttpStatus(404))
    );
    assert_eq!(
        client_at(addr, "failing").giveaways(None).await,
        Err(ApiError::HttpStatus(500))
    );
}

#[tokio::test]
async fn null_and_empty_bodies_are_absent_data() {
    let addr = serve(Seen::default()).await;

    assert_eq!(client_at(addr, "null").giveaways(None).await, Ok(None));
    assert_eq!(client_at(addr, "empty").giveaways(None).await, Ok(None));
}

#[tokio::test]
async fn undecodable_bodies_map_to_decode_errors() {
    let addr = serve(Seen::default()).await;

    assert_eq!(
        client_at(addr, "broken").giveaways(None).await,
        Err(ApiError::DecodeFailed)
    );
    assert_eq!(
        client_at(addr, "binary").giveaways(None).await,
        Err(ApiError::StringDecodeFailed)
    );
}

#[tokio::test]
async fn offline_monitor_short_circuits_requests() {
    let seen = Seen::default();
    let addr = serve(Arc::clone(&seen)).await;
    let monitor = Arc::new(NetworkMonitor::new(false));
    let client = HttpCatalogClient::new(
        &format!("http://{addr}/api"),
        Duration::from_secs(5),
        AppEnvironment::Release,
        Arc::clone(&monitor) as Arc<dyn giveaway::catalog::Connectivity>,
    )
    .unwrap();

    let filter = GiveawayFilter::platform("pc");
    assert_eq!(client.giveaways(Some(&filter)).await, Err(ApiError::NoNetwork));
    assert!(seen.lock().unwrap().is_empty());

    monitor.set_reachable(true);
    assert!(client.giveaways(Some(&filter)).await.is_ok());
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn refused_connection_is_no_network() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_at(addr, "api");
    assert_eq!(client.giveaways(None).await, Err(ApiError::NoNetwork));
}
