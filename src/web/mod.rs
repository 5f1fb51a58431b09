//! HTTP surface of the auth core: request context resolution, enforcement
//! middleware, session and password-reset handlers, and the router that
//! composes them.

pub mod ctx;
pub mod error;
pub mod mw_auth;
pub mod password_reset;
pub mod session;

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use tower_cookies::CookieManagerLayer;

use crate::account::Role;
use crate::account::store::AccountStore;
use crate::auth::jwt::TokenCodec;
use crate::config::AuthConfig;
use crate::notify::ResetNotifier;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AccountStore>,
    pub notifier: Arc<dyn ResetNotifier>,
    pub codec: Arc<TokenCodec>,
    pub auth_config: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(
        config: AuthConfig,
        store: Arc<dyn AccountStore>,
        notifier: Arc<dyn ResetNotifier>,
    ) -> Self {
        Self {
            store,
            notifier,
            codec: Arc::new(TokenCodec::from_config(&config)),
            auth_config: Arc::new(config),
        }
    }
}

fn v1(path: &str) -> String {
    format!("/api/v1/{path}")
}

/// Builds the API router. The context resolver runs on every request and
/// never rejects by itself; `mw_require_auth` and `restrict_to!` are layered
/// onto the routes that need them.
pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route(&v1("accounts/{id}"), get(session::get_account))
        .route_layer(crate::restrict_to!(Role::Admin))
        .route_layer(middleware::from_fn(mw_auth::mw_require_auth));

    let protected = Router::new()
        .route(&v1("accounts/me"), get(session::me))
        .route_layer(middleware::from_fn(mw_auth::mw_require_auth));

    let public = Router::new()
        .route(&v1("accounts/signup"), post(session::signup))
        .route(&v1("accounts/login"), post(session::login))
        .route(&v1("accounts/logout"), post(session::logout))
        .route(
            &v1("accounts/forgot-password"),
            post(password_reset::forgot_password),
        )
        .route(
            &v1("accounts/reset-password/{token}"),
            patch(password_reset::reset_password),
        );

    Router::new()
        .merge(admin)
        .merge(protected)
        .merge(public)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ctx::mw_ctx_resolver,
        ))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
