//! # routes::login
//!
//! Credential entry.  Whatever is submitted is stored verbatim and the
//! operator is sent back to the step page; there is no validation.

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

use crate::dashboard;
use crate::error::AppError;
use crate::state::SharedState;

pub async fn show_login(State(state): State<SharedState>) -> Html<String> {
    Html(dashboard::login::render(&state.config.login_path()))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

pub async fn store_token(
    State(state): State<SharedState>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    state
        .session
        .login(form.token)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Redirect::to(&state.config.path("/")))
}
