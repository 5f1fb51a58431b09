//! Main Crate Error

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    JWT(#[from] jsonwebtoken::errors::Error),

    #[error("PasswordHash {0}")]
    PasswordHash(argon2::password_hash::Error),

    #[error("Config {0}")]
    Config(String),

    /* Api Errors */
    #[error("Validation: {0}")]
    Validation(String),
    #[error("Not Found")]
    NotFound,
    #[error("API Forbidden")]
    ApiForbidden,

    /* Auth Errors */
    #[error("Auth Token Missing")]
    AuthTokenMissing,
    #[error("Auth Token Expired")]
    AuthTokenExpired,
    #[error("Invalid Token")]
    AuthInvalidToken,
    #[error("Auth Token Creation")]
    AuthTokenCreation,
    #[error("Account Gone")]
    AuthAccountGone,
    #[error("Password Changed After Issuance")]
    AuthPasswordChanged,
    #[error("Wrong Credentials")]
    WrongCredentials,

    /* Password Reset Errors */
    #[error("Invalid Reset Token")]
    InvalidResetToken,
    #[error("Notification {0}")]
    Notification(String),

    #[error("Context Missing")]
    CtxMissing,
}
