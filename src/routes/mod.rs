//! # routes
//!
//! Browser-facing handlers.  All paths are prefixed with `BASE_PATH`.
//!
//! | Method | Path                   | Description                          |
//! |--------|------------------------|--------------------------------------|
//! | GET    | `/`                    | List steps and render the ladder     |
//! | POST   | `/steps`               | Add a zero-valued step               |
//! | POST   | `/steps/probe`         | Change the probe count, re-list      |
//! | POST   | `/steps/delete`        | Delete the step with form field `id` |
//! | POST   | `/steps/:index/edit`   | Enter edit mode on a row             |
//! | POST   | `/steps/:index/save`   | Commit a row's inputs (form `id`)    |
//! | POST   | `/steps/:index/cancel` | Leave edit mode without saving       |
//! | POST   | `/algo/restart`        | Restart the algo                     |
//! | GET    | `/stocks`              | Render the position table            |
//! | POST   | `/stocks/fetch`        | List positions                       |
//! | POST   | `/stocks/close`        | Sell the position in form `symbol`   |
//! | GET    | `/login`               | Credential entry form                |
//! | POST   | `/login`               | Store the credential                 |
//! | GET    | `/health`              | Liveness                             |

pub mod login;
pub mod positions;
pub mod steps;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::SharedState;
use crate::views::ViewError;

/// Assemble the dashboard router.
pub fn build_router(state: SharedState) -> Router {
    let config = &state.config;
    let at = |route: &str| config.path(route);

    let mut router = Router::new()
        // ── Step ladder ───────────────────────────────────────────────────────
        .route(&at("/"),                     get(steps::show_steps))
        .route(&at("/steps"),                post(steps::add_step))
        .route(&at("/steps/probe"),          post(steps::probe_steps))
        .route(&at("/steps/delete"),         post(steps::delete_step))
        .route(&at("/steps/:index/edit"),    post(steps::edit_step))
        .route(&at("/steps/:index/save"),    post(steps::save_step))
        .route(&at("/steps/:index/cancel"),  post(steps::cancel_edit))
        .route(&at("/algo/restart"),         post(steps::restart_algo))
        // ── Positions ─────────────────────────────────────────────────────────
        .route(&at("/stocks"),               get(positions::show_positions))
        .route(&at("/stocks/fetch"),         post(positions::fetch_positions))
        .route(&at("/stocks/close"),         post(positions::close_position))
        // ── Session ───────────────────────────────────────────────────────────
        .route(&at("/login"),                get(login::show_login).post(login::store_token))
        .route(&at("/health"),               get(health_check));

    // "/Algo_Front_end" as well as "/Algo_Front_end/"
    if !config.base_path.is_empty() {
        router = router.route(&config.base_path, get(steps::show_steps));
    }

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Map a view failure for this request, 401 → login redirect.
fn view_error(state: &SharedState) -> impl Fn(ViewError) -> AppError {
    let login_path = state.config.login_path();
    move |err| AppError::from_view(err, &login_path)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}
