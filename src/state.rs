//! # state
//!
//! Shared application state injected into every axum handler.
//!
//! One dashboard process serves one operator, so the table state lives here
//! rather than per browser session, the same way the credential does.

use std::sync::Arc;

use anyhow::Context;

use crate::api::TradingApi;
use crate::config::Config;
use crate::session::{SessionGuard, TokenStore};
use crate::views::{PositionsView, StepsView};

#[derive(Clone)]
pub struct AppState {
    pub config:    Arc<Config>,
    pub session:   Arc<SessionGuard>,
    pub steps:     Arc<StepsView>,
    pub positions: Arc<PositionsView>,
}

impl AppState {
    /// Load the stored credential and wire both views to the trading API.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = TokenStore::new(&config.token_path);
        let session = Arc::new(
            SessionGuard::load(store).context("Failed to read stored access token")?,
        );

        let api = TradingApi::new(
            Arc::clone(&session),
            config.algo_api_url.clone(),
            config.stock_api_url.clone(),
            config.http_timeout,
        )
        .context("Failed to build HTTP client")?;

        Ok(Self {
            steps:     Arc::new(StepsView::new(api.clone(), config.step_probe_count)),
            positions: Arc::new(PositionsView::new(api, config.close_settle_delay)),
            session,
            config:    Arc::new(config),
        })
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

pub fn build_state(config: Config) -> anyhow::Result<SharedState> {
    Ok(Arc::new(AppState::new(config)?))
}
