//! Password reset flow.
//!
//! Request: generate a one-time token, persist only its SHA-256 hash plus an
//! expiry, and hand the plaintext to the notification collaborator. Redeem:
//! look the account up by token hash, burn the token, and set the new
//! password. The plaintext token is never stored or logged.

use chrono::TimeDelta;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::account::store::AccountStore;
use crate::account::{AccountApi, normalize_email};
use crate::notify::ResetNotifier;
use crate::prelude::*;

use super::auth_body::AuthBody;
use super::jwt::TokenCodec;
use super::session::{hash_password_blocking, issue_credential, validate_new_password};

pub const RESET_TOKEN_BYTES: usize = 32;

/// Generates a fresh one-time reset token as lowercase hex.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// SHA-256 of a reset token, as lowercase hex.
///
/// Deliberately unsalted and deterministic: the stored hash doubles as the
/// lookup key at redemption time.
pub fn hash_reset_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// First step of the flow: store a hashed token and notify the account.
///
/// An unknown email returns `Ok` with no side effects; the HTTP response is
/// identical either way so the endpoint cannot confirm which addresses are
/// registered. If the notifier fails, the stored token is rolled back before
/// the error surfaces, otherwise a redeemable token would exist that nobody
/// ever received.
pub fn request_reset(
    store: &dyn AccountStore,
    notifier: &dyn ResetNotifier,
    email: &str,
    window: TimeDelta,
) -> Result<()> {
    let email = normalize_email(email);
    let Some(mut account) = store.find_by_email(&email)? else {
        log::debug!("password reset requested for unknown email");
        return Ok(());
    };

    let token = generate_reset_token();
    account.set_reset_token(hash_reset_token(&token), window);
    store.save(&account)?;

    if let Err(err) = notifier.send_password_reset(&account.email, &token) {
        log::error!("Failed to send password reset message: {err}");
        account.clear_reset_token();
        store.save(&account)?;
        return Err(Error::Notification(err.to_string()));
    }
    Ok(())
}

/// Second step: trade the plaintext token for a new password.
///
/// Presenting a matching token burns it whatever happens next, so a second
/// redemption with the same plaintext fails. Expiry is a pure time check at
/// this point; no separate stored state. On success the account's
/// `password_changed_at` moves to now, which invalidates every previously
/// issued credential, and a fresh one is returned.
pub async fn redeem_reset(
    store: &dyn AccountStore,
    codec: &TokenCodec,
    token: &str,
    new_password: String,
    new_password_confirm: String,
) -> Result<(AccountApi, AuthBody)> {
    let token_hash = hash_reset_token(token);
    let Some(mut account) = store.find_by_reset_hash(&token_hash)? else {
        return Err(Error::InvalidResetToken);
    };

    let expired = account.reset_expired();
    account.clear_reset_token();
    store.save(&account)?;
    if expired {
        return Err(Error::InvalidResetToken);
    }

    validate_new_password(&new_password, &new_password_confirm)?;
    let password_hash = hash_password_blocking(new_password).await?;
    account.set_password(password_hash);
    store.save(&account)?;

    let body = issue_credential(codec, &account)?;
    Ok((AccountApi::from(&account), body))
}
