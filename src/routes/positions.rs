//! # routes::positions
//!
//! Stock position handlers.  Positions are only fetched on request because
//! the upstream join with live prices is slow.

use std::sync::Arc;

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use tracing::error;

use super::view_error;
use crate::dashboard;
use crate::error::AppError;
use crate::state::SharedState;

async fn render(state: &SharedState) -> Html<String> {
    let table = state.positions.table().await;
    Html(dashboard::positions::render(&state.config.base_path, &table))
}

// ─── GET /stocks ──────────────────────────────────────────────────────────────

pub async fn show_positions(State(state): State<SharedState>) -> Html<String> {
    render(&state).await
}

// ─── POST /stocks/fetch ───────────────────────────────────────────────────────

pub async fn fetch_positions(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    state.positions.list().await.map_err(view_error(&state))?;
    Ok(render(&state).await)
}

// ─── POST /stocks/close ───────────────────────────────────────────────────────

/// The position the operator clicked: its symbol and the quantity shown.
#[derive(Debug, Deserialize)]
pub struct CloseForm {
    pub symbol: String,
    pub qty:    Option<f64>,
}

/// Disable the row and answer right away; the close, the settle delay and
/// the re-list run in the background.
pub async fn close_position(
    State(state): State<SharedState>,
    Form(form): Form<CloseForm>,
) -> Result<Html<String>, AppError> {
    let close = state
        .positions
        .begin_close(&form.symbol, form.qty)
        .await
        .map_err(view_error(&state))?;

    if let Some(close) = close {
        let positions = Arc::clone(&state.positions);
        tokio::spawn(async move {
            let symbol = close.symbol.clone();
            // A 401 here surfaces as a redirect on the operator's next request.
            if let Err(e) = positions.finish_close(close).await {
                error!(symbol = %symbol, error = %e, "Close flow failed");
            }
        });
    }

    Ok(render(&state).await)
}
