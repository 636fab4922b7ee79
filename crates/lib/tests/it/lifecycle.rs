//! End-to-end map lifecycle tests over the headless engine.

use std::sync::Arc;

use cruisemaps::{
    Client, LoadMapData, LoadMapParams,
    render::{Headless, layers},
};

use crate::helpers::{CONTAINER, sample_itinerary, test_client, test_config};

const WEEK_SECONDS: i64 = 7 * 86_400;

fn load_params(container: &str) -> LoadMapParams {
    LoadMapParams {
        container: container.to_string(),
        data: LoadMapData {
            ship_id: 8,
            start_date: 1_735_689_600,
            duration: WEEK_SECONDS,
        },
        map: None,
    }
}

#[tokio::test]
async fn load_then_destroy_round_trip() {
    let (client, engine, _state) = test_client().await;

    assert!(client.load_map(load_params(CONTAINER)).await);
    assert!(client.renderer().is_registered(CONTAINER));
    assert_eq!(
        client.renderer().loaded_style(CONTAINER).as_deref(),
        Some("styles/streets-v11")
    );
    assert_eq!(
        client.renderer().loaded_geometry(CONTAINER),
        Some(sample_itinerary())
    );

    let surface = engine.surface(CONTAINER).expect("surface acquired");
    assert!(surface.fitted_bounds().is_some());

    assert!(client.destroy(CONTAINER).await);
    assert!(!client.renderer().is_registered(CONTAINER));
    assert!(surface.is_removed());

    // Destroy is idempotent.
    assert!(client.destroy(CONTAINER).await);
}

#[tokio::test]
async fn composition_waits_for_style_ready_and_orders_layers() {
    let (client, engine, _state) = test_client().await;

    assert!(client.load_map(load_params(CONTAINER)).await);

    let surface = engine.surface(CONTAINER).unwrap();
    let ops = surface.op_log();
    assert_eq!(
        ops,
        vec![
            "acquire".to_string(),
            "style-ready".to_string(),
            "fit-bounds".to_string(),
            format!("set-source:{}", layers::TRACK_SOURCE),
            format!("add-layer:{}", layers::TRACK_LAYER),
            format!("add-layer:{}", layers::ARROWS_LAYER),
            format!("add-layer:{}", layers::PORTS_LAYER),
        ]
    );
}

#[tokio::test]
async fn bounds_fit_covers_the_itinerary() {
    let (client, engine, _state) = test_client().await;
    assert!(client.load_map(load_params(CONTAINER)).await);

    let surface = engine.surface(CONTAINER).unwrap();
    let (bounds, options) = surface.fitted_bounds().unwrap();
    assert_eq!(bounds.min_lng, -3.7);
    assert_eq!(bounds.max_lng, 4.9);
    assert_eq!(bounds.min_lat, 40.4);
    assert_eq!(bounds.max_lat, 52.4);
    assert_eq!(options.padding, 50.0);
    assert_eq!(options.max_zoom, 12.0);
}

#[tokio::test]
async fn unknown_container_fails_without_registering() {
    let (client, engine, state) = test_client().await;

    assert!(!client.load_map(load_params("missing")).await);
    assert!(!client.renderer().is_registered("missing"));
    assert!(engine.surface("missing").is_none());
    // The pipeline fails before any geometry fetch.
    assert_eq!(state.hits.load(std::sync::atomic::Ordering::SeqCst), 0);

    assert!(!client.resize_map("missing").await);
}

#[tokio::test]
async fn geometry_fetch_failure_rolls_back_the_surface() {
    let (addr, _state) =
        crate::helpers::spawn_status_server(axum::http::StatusCode::NOT_FOUND).await;
    let engine = Arc::new(Headless::with_containers([CONTAINER]));
    let client = Client::new(engine.clone());
    let mut config = test_config(addr);
    config.network.max_retries = 1;
    client.configure(config);

    assert!(!client.load_map(load_params(CONTAINER)).await);
    assert!(!client.renderer().is_registered(CONTAINER));
    // The partially acquired surface was released.
    let surface = engine.surface(CONTAINER).expect("surface was acquired");
    assert!(surface.is_removed());
    assert_eq!(surface.layer_count(), 0);

    assert!(!client.resize_map(CONTAINER).await);
    // Destroy still succeeds on the empty registry slot.
    assert!(client.destroy(CONTAINER).await);
}

#[tokio::test]
async fn unconfigured_client_reports_load_failure() {
    let engine = Arc::new(Headless::with_containers([CONTAINER]));
    let client = Client::new(engine);

    assert!(!client.load_map(load_params(CONTAINER)).await);
}

#[tokio::test]
async fn reload_replaces_the_previous_instance() {
    let (client, engine, _state) = test_client().await;

    assert!(client.load_map(load_params(CONTAINER)).await);
    let first = engine.surface(CONTAINER).unwrap();

    assert!(client.load_map(load_params(CONTAINER)).await);
    let second = engine.surface(CONTAINER).unwrap();

    // The replaced instance's surface was released; the new one is live.
    assert!(first.is_removed());
    assert!(!second.is_removed());
    assert!(client.renderer().is_registered(CONTAINER));
}

#[tokio::test]
async fn resize_reaches_the_engine_only_when_registered() {
    let (client, engine, _state) = test_client().await;

    assert!(!client.resize_map(CONTAINER).await);

    assert!(client.load_map(load_params(CONTAINER)).await);
    assert!(client.resize_map(CONTAINER).await);
    assert!(client.resize_map(CONTAINER).await);
    assert_eq!(engine.surface(CONTAINER).unwrap().resize_count(), 2);
}

#[tokio::test]
async fn map_override_controls_arrows_and_3d() {
    let (client, engine, _state) = test_client().await;

    let mut params = load_params(CONTAINER);
    let mut map = client.config().unwrap().map_defaults;
    map.has_arrows = false;
    map.is_3d = true;
    map.is_static = true;
    params.map = Some(map);

    assert!(client.load_map(params).await);

    let surface = engine.surface(CONTAINER).unwrap();
    let ids = surface.layer_ids();
    assert!(ids.contains(&layers::TRACK_LAYER.to_string()));
    assert!(ids.contains(&layers::PORTS_LAYER.to_string()));
    assert!(!ids.contains(&layers::ARROWS_LAYER.to_string()));
    assert!(surface.effects().is_some());
    assert!(!surface.options().interactive);
}

#[tokio::test]
async fn concurrent_loads_on_different_containers_both_register() {
    let (client, engine, _state) = test_client().await;
    engine.register_container("c2");

    let (left, right) = tokio::join!(
        client.load_map(load_params(CONTAINER)),
        client.load_map(load_params("c2"))
    );
    assert!(left);
    assert!(right);
    assert!(client.renderer().is_registered(CONTAINER));
    assert!(client.renderer().is_registered("c2"));
}
