pub mod api;
pub mod views;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;
use chrono_tz::Tz;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

use crate::config;
use crate::models::Config;
use crate::roster::Roster;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) roster: Arc<Mutex<Roster>>,
    pub(crate) school_name: Arc<str>,
    pub(crate) timezone: Tz,
}

impl AppState {
    pub(crate) fn new(config: &Config) -> Result<Self> {
        let roster = Roster::from_seed(&config.activities).context("Invalid activity seed")?;
        Ok(Self {
            roster: Arc::new(Mutex::new(roster)),
            school_name: Arc::from(config.school.name.as_str()),
            timezone: config::school_timezone(config)?,
        })
    }

    /// Every roster operation validates before it mutates, so a poisoned
    /// lock never guards a half-applied change.
    pub(crate) fn roster(&self) -> MutexGuard<'_, Roster> {
        self.roster.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) fn router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/static/index.html") }))
        .route("/health", get(|| async { "OK" }))
        .route("/activities", get(api::list_activities_handler))
        .route(
            "/activities/{activity_name}/signup",
            post(api::signup_handler),
        )
        .route(
            "/activities/{activity_name}/withdraw",
            post(api::withdraw_handler),
        )
        .route("/roster", get(views::roster_page_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

pub async fn serve(config: Config, addr: &str) -> Result<()> {
    let state = AppState::new(&config)?;
    info!(
        "Loaded {} activities for {}",
        state.roster().list_activities().len(),
        state.school_name
    );

    let app = router(state, &config.server.static_dir);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Activities API listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
