//! Stateless bearer credential codec.
//!
//! Signs and verifies compact HS256 tokens carrying the subject id and the
//! issuance instant. The signing secret and TTL come from [`AuthConfig`];
//! there is no process-global key state.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::prelude::*;

use super::AuthError;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Signed token payload, seconds resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDelta,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: TimeDelta) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.as_bytes(), config.token_ttl())
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Signs a credential for `subject`, valid for the configured TTL.
    pub fn issue(&self, subject: Uuid) -> Result<String> {
        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or(Error::AuthTokenCreation)?;

        let claims = Claims {
            sub: subject,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        Ok(encode(&Header::new(ALGORITHM), &claims, &self.encoding)?)
    }

    /// Checks signature, structure and freshness. Tampering and malformed
    /// input collapse to [`AuthError::InvalidToken`]; an elapsed TTL yields
    /// [`AuthError::TokenExpired`].
    pub fn verify(&self, token: &str) -> std::result::Result<Claims, AuthError> {
        let mut validation = Validation::new(ALGORITHM);
        // Seconds-resolution expiry, no grace period.
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => {
                    log::error!("Failed to decode jwt token {err}");
                    AuthError::InvalidToken
                }
            })
    }
}
