//! Request identity resolution.
//!
//! `mw_ctx_resolver` is the non-blocking guard variant: it runs on every
//! request, resolves the caller if it can, and stores the outcome in request
//! extensions. Pages that render differently for anonymous visitors read the
//! `Result` directly; protected routes layer `mw_require_auth` on top.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use tower_cookies::{Cookie, Cookies};

use crate::account::AccountApi;
use crate::auth::AuthError;
use crate::prelude::*;

use super::AppState;

/// Identity resolved for the current request. Lives in request extensions
/// for the duration of the request only.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub account: AccountApi,
}

pub const AUTH_TOKEN_COOKIE: &str = "jwt";
pub const AUTH_HEADER: &str = "Authorization";
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";

pub async fn mw_ctx_resolver(
    State(state): State<AppState>,
    cookies: Cookies,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = resolve_ctx(&state, &cookies, &headers);

    // A session cookie that failed any check is useless; drop it so the
    // client stops sending it.
    if ctx.is_err() && cookies.get(AUTH_TOKEN_COOKIE).is_some() {
        let mut dead = Cookie::from(AUTH_TOKEN_COOKIE);
        dead.set_path("/");
        cookies.remove(dead);
    }
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

fn resolve_ctx(
    state: &AppState,
    cookies: &Cookies,
    headers: &HeaderMap,
) -> std::result::Result<Ctx, AuthError> {
    // Authorization header wins; the session cookie is the fallback.
    let token = headers
        .get(AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(AUTH_HEADER_PREFIX))
        .map(|s| s.to_string())
        .or_else(|| cookies.get(AUTH_TOKEN_COOKIE).map(|c| c.value().to_string()))
        .ok_or(AuthError::TokenMissing)?;

    let claims = state.codec.verify(&token)?;

    // A deleted account can still hold an unexpired token.
    let account = state
        .store
        .find_by_id(&claims.sub)
        .map_err(|err| {
            log::error!("account lookup failed during auth: {err}");
            AuthError::AccountGone
        })?
        .ok_or(AuthError::AccountGone)?;

    if account.changed_password_after(claims.iat) {
        return Err(AuthError::PasswordChanged);
    }

    Ok(Ctx {
        account: AccountApi::from(&account),
    })
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<std::result::Result<Ctx, AuthError>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}
