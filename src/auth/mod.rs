//! Credential issuance and verification.

pub mod auth_body;
pub mod jwt;
pub mod password;
pub mod reset;
pub mod session;

use crate::prelude::*;

pub const TOKEN_TYPE: &str = "Bearer";

/// Guard-stage failures. Each maps to a distinct 401 message so callers know
/// whether to log in again; none of them reveals account existence.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid Token")]
    InvalidToken,
    #[error("Token Missing")]
    TokenMissing,
    #[error("Token Expired")]
    TokenExpired,
    #[error("Account Gone")]
    AccountGone,
    #[error("Password Changed")]
    PasswordChanged,
}

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::InvalidToken => Self::AuthInvalidToken,
            AuthError::TokenMissing => Self::AuthTokenMissing,
            AuthError::TokenExpired => Self::AuthTokenExpired,
            AuthError::AccountGone => Self::AuthAccountGone,
            AuthError::PasswordChanged => Self::AuthPasswordChanged,
        }
    }
}
