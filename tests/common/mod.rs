//! Shared helpers: spin up the app on an ephemeral port.

use async_trait::async_trait;
use ribbit::domain::model::CHALLENGE_COUNT;
use ribbit::domain::ports::PowValidator;
use ribbit::{router, AppState, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Stands in for a client that solved every challenge.
pub struct AcceptAllPow;

#[async_trait]
impl PowValidator for AcceptAllPow {
    async fn is_valid_pow(&self, _challenges: &[String; CHALLENGE_COUNT]) -> bool {
        true
    }
}

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.server.host = "127.0.0.1".to_string();
    settings.server.port = 0;
    settings
}

/// Starts the server and returns its base URL.
pub async fn spawn_app(state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[allow(dead_code)]
pub async fn spawn_accepting_app(settings: Settings) -> String {
    let state = AppState::from_settings(settings)
        .await
        .unwrap()
        .with_pow_validator(Arc::new(AcceptAllPow));
    spawn_app(state).await
}

#[allow(dead_code)]
pub fn publish_body(title: &str, body: &str, tags: &str) -> serde_json::Value {
    let challenges: Vec<String> = (0..CHALLENGE_COUNT).map(|i| format!("solved-{i}")).collect();
    serde_json::json!({
        "title": title,
        "body": body,
        "tags": tags,
        "challenges": challenges,
    })
}
