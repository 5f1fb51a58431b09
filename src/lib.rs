//! Authentication and authorization core for the tourbook content API.
//!
//! Tourbook is a multi-tenant tours/users/reviews API; this crate holds the
//! part with real protocol character: issuing and verifying bearer
//! credentials, gating routes by account role, and the one-time-token
//! password reset flow. The surrounding CRUD handlers are collaborators that
//! compose the middleware and services exposed here.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tourbook::account::store::MemoryStore;
//! use tourbook::config::AuthConfig;
//! use tourbook::notify::LogNotifier;
//! use tourbook::web::{self, AppState};
//!
//! let config = AuthConfig::from_env();
//! let state = AppState::new(
//!     config,
//!     Arc::new(MemoryStore::default()),
//!     Arc::new(LogNotifier),
//! );
//! let app = web::router(state);
//! ```

pub mod account;
pub mod auth;
pub mod config;
pub mod error;
pub mod notify;
pub mod prelude;
pub mod web;
