//! `HttpLayoutGateway` against the reference layout server on a local port.

use assert_matches::assert_matches;
use vitalboard_api::config::ServerConfig;
use vitalboard_api::router::build_app_router;
use vitalboard_api::state::AppState;
use vitalboard_client::config::ClientConfig;
use vitalboard_client::gateway::{GatewayError, LayoutGateway};
use vitalboard_client::http::HttpLayoutGateway;
use vitalboard_client::store::LayoutStore;
use vitalboard_core::defaults::default_widgets;

/// Serve the layout API on an ephemeral port and return its base URL.
async fn spawn_server() -> String {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    };
    let app = build_app_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api/v1")
}

fn gateway(api_url: &str, token: &str) -> HttpLayoutGateway {
    HttpLayoutGateway::new(&ClientConfig::new(api_url).with_token(token)).unwrap()
}

#[tokio::test]
async fn missing_layout_is_none() {
    let api_url = spawn_server().await;

    let fetched = gateway(&api_url, "alice").fetch_layout().await.unwrap();

    assert!(fetched.is_none());
}

#[tokio::test]
async fn save_is_echoed_and_fetchable() {
    let api_url = spawn_server().await;
    let gateway = gateway(&api_url, "alice");
    let mut widgets = default_widgets();
    widgets.swap(0, 1);
    widgets[2].visible = false;

    let saved = gateway.save_layout(&widgets).await.unwrap();
    let fetched = gateway.fetch_layout().await.unwrap().unwrap();

    assert_eq!(saved.widgets, widgets);
    assert_eq!(fetched, saved);
}

#[tokio::test]
async fn reset_returns_defaults() {
    let api_url = spawn_server().await;
    let gateway = gateway(&api_url, "alice");
    gateway.save_layout(&default_widgets()[..2]).await.unwrap();

    let reset = gateway.reset_layout().await.unwrap();

    assert_eq!(reset.widgets, default_widgets());
}

#[tokio::test]
async fn rejected_save_surfaces_status() {
    let api_url = spawn_server().await;
    let mut widgets = default_widgets();
    widgets[1].id = widgets[0].id.clone();

    let err = gateway(&api_url, "alice").save_layout(&widgets).await.unwrap_err();

    assert_matches!(err, GatewayError::Api { status: 400, .. });
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let api_url = spawn_server().await;
    let gateway = HttpLayoutGateway::new(&ClientConfig::new(&api_url)).unwrap();

    let err = gateway.fetch_layout().await.unwrap_err();

    assert_matches!(err, GatewayError::Api { status: 401, .. });
}

#[tokio::test]
async fn store_round_trip_over_http() {
    let api_url = spawn_server().await;
    let store = LayoutStore::new(std::sync::Arc::new(gateway(&api_url, "alice")));
    store.load().await.unwrap();

    store.enter_customize_mode().await;
    store.toggle_widget_visibility("awards").await;
    store.save_layout().await.unwrap();

    let reloaded = LayoutStore::new(std::sync::Arc::new(gateway(&api_url, "alice")));
    reloaded.load().await.unwrap();

    assert_eq!(reloaded.visible_widgets().await.len(), 6);
    assert_eq!(reloaded.effective_widgets().await, store.effective_widgets().await);
}
