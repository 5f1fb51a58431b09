//! Password reset handlers.

use axum::{Json, extract::Path, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_cookies::Cookies;

use crate::auth::reset;
use crate::prelude::*;

use super::AppState;
use super::session::{SessionBody, set_session_cookie};

#[derive(Debug, Deserialize, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ResetPasswordRequest {
    pub password: String,
    pub password_confirm: String,
}

/// Responds identically for known and unknown addresses.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>> {
    reset::request_reset(
        state.store.as_ref(),
        state.notifier.as_ref(),
        &payload.email,
        state.auth_config.reset_window(),
    )?;
    Ok(Json(json!({
        "status": "ok",
        "message": "If that account exists, a reset token has been sent"
    })))
}

/// Redeems the one-time token and logs the account in with its new password.
pub async fn reset_password(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(token): Path<String>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<SessionBody>> {
    let (account, auth) = reset::redeem_reset(
        state.store.as_ref(),
        &state.codec,
        &token,
        payload.password,
        payload.password_confirm,
    )
    .await?;
    set_session_cookie(&cookies, &auth.access_token, &state);
    Ok(Json(SessionBody { account, auth }))
}
