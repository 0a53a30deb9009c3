pub mod access_log;
pub mod handlers;
pub mod lang;

use crate::adapters::{pow, Repository};
use crate::config::Settings;
use crate::domain::ports::PowValidator;
use crate::utils::error::Result;
use crate::view::Renderer;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub repo: Repository,
    pub renderer: Renderer,
    pub settings: Arc<Settings>,
    pub pow: Arc<dyn PowValidator>,
}

impl AppState {
    pub async fn from_settings(settings: Settings) -> Result<Self> {
        pow::init_secret()?;
        let repo = Repository::open(&settings).await?;
        let renderer = Renderer::new()?;

        Ok(Self {
            pow: Arc::new(repo.cache.clone()),
            repo,
            renderer,
            settings: Arc::new(settings),
        })
    }

    pub fn with_pow_validator(mut self, validator: Arc<dyn PowValidator>) -> Self {
        self.pow = validator;
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{lang}/signup", get(handlers::signup))
        .route("/{lang}/home", get(handlers::home))
        .route("/{lang}/search", get(handlers::search_posts))
        .route(
            "/{lang}/post",
            get(handlers::get_challenge_form).post(handlers::post_form),
        )
        .route("/{lang}/post/{slug}", get(handlers::get_post))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(access_log::log_access))
        .with_state(state)
}

/// Serves until ctrl-c.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutting down");
}
