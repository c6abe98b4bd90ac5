//! # api — outbound client for the trading API
//!
//! Two services sit behind the dashboard: the step/algo service
//! (`/api/v1/...`) and the stock position service (`/trades/...`).  Both take
//! the same bearer credential, so one [`TradingApi`] holds both base URLs and
//! routes every call through the shared [`SessionGuard`].
//!
//! Request and response bodies are passed through as-is; nothing here
//! interprets them beyond (de)serialising the records.

mod positions;
mod steps;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Response;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::session::SessionGuard;

#[derive(Debug, Clone)]
pub struct TradingApi {
    http:          reqwest::Client,
    session:       Arc<SessionGuard>,
    algo_api_url:  String,
    stock_api_url: String,
}

impl TradingApi {
    pub fn new(
        session: Arc<SessionGuard>,
        algo_api_url: impl Into<String>,
        stock_api_url: impl Into<String>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            session,
            algo_api_url:  algo_api_url.into(),
            stock_api_url: stock_api_url.into(),
        })
    }

    pub fn session(&self) -> &Arc<SessionGuard> {
        &self.session
    }

    fn algo_url(&self, path: &str) -> String {
        format!("{}{}", self.algo_api_url, path)
    }

    fn stock_url(&self, path: &str) -> String {
        format!("{}{}", self.stock_api_url, path)
    }
}

/// Non-2xx → [`ApiError::Status`] carrying whatever body came back.
async fn expect_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(%status, body = %body, "Trading API returned an error status");
    Err(ApiError::Status { status, body })
}
