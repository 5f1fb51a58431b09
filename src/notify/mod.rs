//! Outbound notification collaborator.

use crate::prelude::*;

/// Delivers the plaintext reset token to the account holder.
///
/// The auth core hands the token over exactly once and never stores or logs
/// it; getting it to the user (email in production) is the implementor's
/// concern. A failure here is treated as part of the reset-request
/// transaction and rolls back the stored token.
pub trait ResetNotifier: Send + Sync {
    fn send_password_reset(&self, email: &str, token: &str) -> Result<()>;
}

/// Notifier for local development: records that a message would go out
/// without putting the token in the logs.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl ResetNotifier for LogNotifier {
    fn send_password_reset(&self, email: &str, _token: &str) -> Result<()> {
        log::info!("password reset message queued for {email}");
        Ok(())
    }
}
