//! OAuth 1.0a request signing for web service exporters.
//!
//! [`OAuthService`] adds the protocol parameters and an HMAC-SHA1 `oauth_signature` to the
//! parameters of an outgoing request. Sending the request is left to the caller.

use std::collections::HashMap;

pub mod consumer;
pub mod encoding;
pub mod error;
pub mod service;

pub use consumer::{Consumer, TokenCredentials};
pub use error::{OAuthError, Result};
pub use service::{AccessToken, Authorization, OAuthService};

/// Request parameters by name. The order is irrelevant, signing sorts them.
pub type Parameters = HashMap<String, String>;
