//! # routes::steps
//!
//! Step ladder handlers.  Every mutation answers with the freshly rendered
//! page rather than a redirect, mirroring a single-page table that re-renders
//! in place.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    response::Html,
    Form,
};
use serde::Deserialize;
use tracing::warn;

use super::view_error;
use crate::dashboard;
use crate::error::AppError;
use crate::models::StepField;
use crate::state::SharedState;

async fn render(state: &SharedState, restarted: bool) -> Html<String> {
    let table = state.steps.table().await;
    Html(dashboard::steps::render(&state.config.base_path, &table, restarted))
}

// ─── GET / ────────────────────────────────────────────────────────────────────

pub async fn show_steps(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    state.steps.list().await.map_err(view_error(&state))?;
    Ok(render(&state, false).await)
}

// ─── POST /steps ──────────────────────────────────────────────────────────────

pub async fn add_step(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    state.steps.add().await.map_err(view_error(&state))?;
    Ok(render(&state, false).await)
}

// ─── POST /steps/probe ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProbeForm {
    pub count: String,
}

pub async fn probe_steps(
    State(state): State<SharedState>,
    Form(form): Form<ProbeForm>,
) -> Result<Html<String>, AppError> {
    let result = match form.count.trim().parse::<i64>() {
        Ok(count) => state.steps.probe(count).await,
        Err(_) => {
            warn!(count = %form.count, "Probe count is not a whole number — keeping the current one");
            state.steps.list().await
        }
    };
    result.map_err(view_error(&state))?;
    Ok(render(&state, false).await)
}

// ─── POST /steps/delete ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub id: i64,
}

pub async fn delete_step(
    State(state): State<SharedState>,
    Form(form): Form<DeleteForm>,
) -> Result<Html<String>, AppError> {
    state.steps.delete(form.id).await.map_err(view_error(&state))?;
    Ok(render(&state, false).await)
}

// ─── POST /steps/:index/edit ──────────────────────────────────────────────────

pub async fn edit_step(
    State(state): State<SharedState>,
    Path(index): Path<usize>,
) -> Result<Html<String>, AppError> {
    state.steps.begin_edit(index).await.map_err(view_error(&state))?;
    Ok(render(&state, false).await)
}

// ─── POST /steps/:index/save ──────────────────────────────────────────────────

/// Form fields are named after the editable columns, plus the hidden `id` of
/// the step being edited; anything else is ignored.
pub async fn save_step(
    State(state): State<SharedState>,
    Path(index): Path<usize>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let id = fields
        .get("id")
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .ok_or_else(|| AppError::BadRequest("Save form is missing the step id".into()))?;

    let edits: Vec<(StepField, String)> = fields
        .into_iter()
        .filter_map(|(name, value)| StepField::from_name(&name).map(|f| (f, value)))
        .collect();

    state
        .steps
        .commit(index, id, edits)
        .await
        .map_err(view_error(&state))?;
    Ok(render(&state, false).await)
}

// ─── POST /steps/:index/cancel ────────────────────────────────────────────────

pub async fn cancel_edit(
    State(state): State<SharedState>,
    Path(index): Path<usize>,
) -> Result<Html<String>, AppError> {
    state.steps.cancel_edit(index).await.map_err(view_error(&state))?;
    Ok(render(&state, false).await)
}

// ─── POST /algo/restart ───────────────────────────────────────────────────────

pub async fn restart_algo(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let restarted = state.steps.restart().await.map_err(view_error(&state))?;
    Ok(render(&state, restarted).await)
}
