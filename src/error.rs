use std::time::SystemTimeError;

use thiserror::Error;

/// Failures of the OAuth helpers. Signing itself can only fail on a broken system clock.
#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("failed to compute time since Unix Epoch, {0}")]
    Clock(#[from] SystemTimeError),
    #[error("the provider response lacks the `{0}` field")]
    IncompleteResponse(&'static str),
    #[error("the authorization callback carries no token")]
    AuthorizationDenied,
}

pub type Result<T> = std::result::Result<T, OAuthError>;
