use crate::prelude::*;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            // Auth-related errors
            Error::AuthTokenMissing => (
                StatusCode::UNAUTHORIZED,
                String::from("You are not logged in"),
            ),
            Error::AuthTokenExpired | Error::AuthInvalidToken => (
                StatusCode::UNAUTHORIZED,
                String::from("Invalid or expired session, please log in again"),
            ),
            Error::AuthAccountGone => (
                StatusCode::UNAUTHORIZED,
                String::from("The account for this session no longer exists"),
            ),
            Error::AuthPasswordChanged => (
                StatusCode::UNAUTHORIZED,
                String::from("Password recently changed, please log in again"),
            ),
            Error::WrongCredentials => (
                StatusCode::UNAUTHORIZED,
                String::from("Incorrect email or password"),
            ),

            // Permission-related errors
            Error::ApiForbidden => (
                StatusCode::FORBIDDEN,
                String::from("You do not have permission to perform this action"),
            ),

            // Caller's fault, message safe to show
            Error::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Error::InvalidResetToken => (
                StatusCode::BAD_REQUEST,
                String::from("Reset token is invalid or has expired"),
            ),
            Error::NotFound => (StatusCode::NOT_FOUND, String::from("Not found")),

            // Internal errors - hide details
            Error::AuthTokenCreation
            | Error::Generic(_)
            | Error::IO(_)
            | Error::JWT(_)
            | Error::PasswordHash(_)
            | Error::Config(_)
            | Error::Notification(_)
            | Error::CtxMissing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Internal server error"),
            ),
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}
