//! Session issuance: signup and login.
//!
//! Argon2 work is pushed onto the blocking thread pool so a burst of logins
//! cannot stall unrelated requests on the async workers.

use serde::{Deserialize, Serialize};

use crate::account::store::AccountStore;
use crate::account::{Account, AccountApi, Role, normalize_email};
use crate::prelude::*;

use super::auth_body::AuthBody;
use super::jwt::TokenCodec;
use super::password::{self, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN};

#[derive(Debug, Deserialize, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub fn validate_new_password(password: &str, confirm: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(Error::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(Error::Validation(format!(
            "password must be at most {MAX_PASSWORD_LEN} bytes"
        )));
    }
    if password != confirm {
        return Err(Error::Validation(String::from("passwords do not match")));
    }
    Ok(())
}

pub fn issue_credential(codec: &TokenCodec, account: &Account) -> Result<AuthBody> {
    let token = codec.issue(account.id)?;
    Ok(AuthBody::new(token))
}

/// Creates an account and logs it in.
///
/// Public signup always produces a `user` role; privileged roles are granted
/// out of band.
pub async fn signup(
    store: &dyn AccountStore,
    codec: &TokenCodec,
    request: SignupRequest,
) -> Result<(AccountApi, AuthBody)> {
    let email = normalize_email(&request.email);
    if !email.contains('@') {
        return Err(Error::Validation(String::from(
            "a valid email address is required",
        )));
    }
    validate_new_password(&request.password, &request.password_confirm)?;
    if store.find_by_email(&email)?.is_some() {
        return Err(Error::Validation(String::from("email already in use")));
    }

    let password_hash = hash_password_blocking(request.password).await?;
    let account = Account::new(request.name, email, password_hash, Role::User);
    store.save(&account)?;

    let body = issue_credential(codec, &account)?;
    Ok((AccountApi::from(&account), body))
}

/// Authenticates by email and password.
///
/// An unknown address and a wrong password fail identically so responses
/// cannot be used to probe for registered emails.
pub async fn login(
    store: &dyn AccountStore,
    codec: &TokenCodec,
    email: &str,
    password: &str,
) -> Result<(AccountApi, AuthBody)> {
    if email.is_empty() || password.is_empty() {
        return Err(Error::WrongCredentials);
    }
    let email = normalize_email(email);
    let Some(account) = store.find_by_email(&email)? else {
        return Err(Error::WrongCredentials);
    };

    let stored_hash = account.password_hash.clone();
    let candidate = password.to_string();
    let is_valid = tokio::task::spawn_blocking(move || {
        password::verify_password(&candidate, &stored_hash)
    })
    .await
    .map_err(|_| Error::Generic(String::from("password verification task failed")))??;

    if !is_valid {
        return Err(Error::WrongCredentials);
    }

    let body = issue_credential(codec, &account)?;
    Ok((AccountApi::from(&account), body))
}

pub(crate) async fn hash_password_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|_| Error::Generic(String::from("password hashing task failed")))?
}
