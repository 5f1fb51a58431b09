//! Session handlers: signup, login, logout, current account.

use axum::{Json, extract::Path, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_cookies::cookie::time::Duration as CookieDuration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use crate::account::AccountApi;
use crate::auth::auth_body::AuthBody;
use crate::auth::session::{self as auth_session, LoginRequest, SignupRequest};
use crate::prelude::*;

use super::AppState;
use super::ctx::{AUTH_TOKEN_COOKIE, Ctx};

/// Body returned by every credential-issuing endpoint: the public account
/// plus the bearer token, which is also set as the session cookie.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionBody {
    pub account: AccountApi,
    #[serde(flatten)]
    pub auth: AuthBody,
}

pub async fn signup(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SessionBody>)> {
    let (account, auth) =
        auth_session::signup(state.store.as_ref(), &state.codec, payload).await?;
    set_session_cookie(&cookies, &auth.access_token, &state);
    Ok((StatusCode::CREATED, Json(SessionBody { account, auth })))
}

pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionBody>> {
    let (account, auth) = auth_session::login(
        state.store.as_ref(),
        &state.codec,
        &payload.email,
        &payload.password,
    )
    .await?;
    set_session_cookie(&cookies, &auth.access_token, &state);
    Ok(Json(SessionBody { account, auth }))
}

/// Replaces the session cookie with an already-expired dummy value.
pub async fn logout(cookies: Cookies) -> Json<Value> {
    let cookie = Cookie::build((AUTH_TOKEN_COOKIE, "logged-out"))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::ZERO)
        .build();
    cookies.add(cookie);
    Json(json!({ "status": "ok" }))
}

pub async fn me(ctx: Ctx) -> Json<AccountApi> {
    Json(ctx.account)
}

/// Admin-only account lookup.
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountApi>> {
    let account = state.store.find_by_id(&id)?.ok_or(Error::NotFound)?;
    Ok(Json(AccountApi::from(&account)))
}

/// Cookie contract: HTTP-only, SameSite=Strict, `Secure` in production
/// configuration, max-age equal to the credential TTL.
pub(crate) fn set_session_cookie(cookies: &Cookies, token: &str, state: &AppState) {
    let max_age = CookieDuration::seconds(state.auth_config.token_ttl().num_seconds());
    let cookie = Cookie::build((AUTH_TOKEN_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(state.auth_config.cookie_secure)
        .max_age(max_age)
        .build();
    cookies.add(cookie);
}
