use std::net::SocketAddr;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Json, Router, extract::State, http::HeaderMap, http::StatusCode};
use cruisemaps::{
    Client,
    config::Config,
    geometry::{Feature, FeatureCollection},
    render::Headless,
};

/// Container id used by most lifecycle tests.
pub const CONTAINER: &str = "c1";

/// A small but realistic itinerary: start port, track, end port.
pub fn sample_itinerary() -> FeatureCollection {
    FeatureCollection::from_features(vec![
        Feature::point(4.9, 52.4, Some("start")),
        Feature::line_string(&[[4.9, 52.4], [-1.1, 50.8], [-3.7, 40.4]]),
        Feature::point(-3.7, 40.4, Some("end")),
    ])
}

/// Configuration pointing every endpoint at the given stub server.
pub fn test_config(addr: SocketAddr) -> Config {
    let mut config = Config::with_credentials("test-engine-key", "test-api-key")
        .expect("valid test credentials");
    let base = format!("http://{addr}/api/v1");
    config.api.api_base_url = base.clone();
    config.api.ships_endpoint = format!("{base}/ships");
    config.api.itineraries_endpoint = format!("{base}/ships");
    config
}

/// Shared state recorded by the stub servers.
#[derive(Default)]
pub struct ServerState {
    /// Number of requests received.
    pub hits: AtomicUsize,
    /// Authorization header seen on the most recent request.
    pub last_authorization: Mutex<Option<String>>,
}

async fn observe(state: &ServerState, headers: &HeaderMap) -> usize {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.last_authorization.lock().unwrap() = authorization;
    state.hits.fetch_add(1, Ordering::SeqCst) + 1
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    addr
}

/// Spawn a stub server that always answers with `status` and an empty body.
pub async fn spawn_status_server(status: StatusCode) -> (SocketAddr, Arc<ServerState>) {
    let state = Arc::new(ServerState::default());
    let router = Router::new()
        .fallback(
            move |State(state): State<Arc<ServerState>>, headers: HeaderMap| async move {
                observe(&state, &headers).await;
                status
            },
        )
        .with_state(state.clone());
    (serve(router).await, state)
}

/// Spawn a stub server that fails with 500 until `failures` requests have
/// been seen, then answers the itinerary with 200.
pub async fn spawn_flaky_itinerary_server(failures: usize) -> (SocketAddr, Arc<ServerState>) {
    let state = Arc::new(ServerState::default());
    let collection = sample_itinerary();
    let router = Router::new()
        .fallback(
            move |State(state): State<Arc<ServerState>>, headers: HeaderMap| {
                let collection = collection.clone();
                async move {
                    let hit = observe(&state, &headers).await;
                    if hit <= failures {
                        Err(StatusCode::INTERNAL_SERVER_ERROR)
                    } else {
                        Ok(Json(collection))
                    }
                }
            },
        )
        .with_state(state.clone());
    (serve(router).await, state)
}

/// Spawn a stub server answering every request with the sample itinerary.
pub async fn spawn_itinerary_server() -> (SocketAddr, Arc<ServerState>) {
    spawn_flaky_itinerary_server(0).await
}

/// A configured client over a headless engine that knows [`CONTAINER`].
pub async fn test_client() -> (Client, Arc<Headless>, Arc<ServerState>) {
    let (addr, state) = spawn_itinerary_server().await;
    let engine = Arc::new(Headless::with_containers([CONTAINER]));
    let client = Client::new(engine.clone());
    client.configure(test_config(addr));
    (client, engine, state)
}
