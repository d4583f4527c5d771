//! OAuth 1.0a request signing with HMAC-SHA1, plus the pure parts of the three-legged
//! authorization handshake (building the signed token requests and reading the responses).

use std::time::{Duration, SystemTime};

use log::{debug, trace};
use pixauth_hashes::hmac::{compute_signature_for_string, SignatureEncoding};
use pixauth_hashes::md5::MD5Hash;
use pixauth_hashes::sha1::SHA1Hash;
use pixauth_hashes::compute_checksum_for_string;

use crate::consumer::{Consumer, TokenCredentials};
use crate::encoding::{form_decode, percent_encode};
use crate::error::{OAuthError, Result};
use crate::Parameters;

pub const OAUTH_VERSION: &str = "1.0";
pub const OAUTH_SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// Redirect target handed to the provider when asking for a request token. The provider
/// sends the user back here once access has been granted.
pub const OAUTH_CALLBACK: &str = "http://localhost/";

pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
pub const OAUTH_CONSUMER_KEY_KEY: &str = "oauth_consumer_key";
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
pub const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
pub const OAUTH_VERSION_KEY: &str = "oauth_version";

/// What the provider passed back through the callback after the user granted access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    pub token: String,
    pub verifier: Option<String>,
}

/// Token credentials of an authorized user, together with whatever else the provider sent in
/// the access token response (user name, home page, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub credentials: TokenCredentials,
    pub extra: Parameters,
}

/// Signs requests for one consumer and keeps the token of the current user session.
#[derive(Debug, Clone)]
pub struct OAuthService {
    consumer: Consumer,
    timestamp: Option<String>,
    nonce: Option<String>,
    signature: Option<String>,
    token: Option<String>,
    token_secret: Option<String>,
}

impl OAuthService {
    pub fn new(consumer: Consumer) -> Self {
        OAuthService {
            consumer,
            timestamp: None,
            nonce: None,
            signature: None,
            token: None,
            token_secret: None,
        }
    }

    pub fn consumer(&self) -> &Consumer {
        &self.consumer
    }

    /// Add the OAuth protocol parameters and the `oauth_signature` to `parameters`.
    ///
    /// `url` is the request URL without query string: query parameters must be part of
    /// `parameters`, otherwise the provider computes a different signature. `method` is the
    /// upper case HTTP verb.
    ///
    /// # Errors
    ///
    /// If the system clock is set before the Unix epoch.
    pub fn add_signature(&mut self, method: &str, url: &str, parameters: &mut Parameters) -> Result<()> {
        let now = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH)?;
        let timestamp = create_timestamp(now);
        let nonce = create_nonce(now, rand::random::<u32>());

        self.add_signature_with(method, url, parameters, timestamp, nonce);
        Ok(())
    }

    /// Like [`OAuthService::add_signature`], with a caller supplied timestamp and nonce.
    pub fn add_signature_with(&mut self,
                              method: &str,
                              url: &str,
                              parameters: &mut Parameters,
                              timestamp: String,
                              nonce: String) {
        debug!("signing {} request to {}", method, url);

        parameters.remove(OAUTH_SIGNATURE_KEY);
        parameters.insert(OAUTH_TIMESTAMP_KEY.to_owned(), timestamp.clone());
        parameters.insert(OAUTH_NONCE_KEY.to_owned(), nonce.clone());
        parameters.insert(OAUTH_VERSION_KEY.to_owned(), OAUTH_VERSION.to_owned());
        parameters.insert(OAUTH_SIGNATURE_METHOD_KEY.to_owned(), OAUTH_SIGNATURE_METHOD.to_owned());
        parameters.insert(OAUTH_CONSUMER_KEY_KEY.to_owned(), self.consumer.consumer_key.clone());
        if let Some(token) = &self.token {
            parameters.insert(OAUTH_TOKEN_KEY.to_owned(), token.clone());
        }

        let base_string = signature_base_string(method, url, parameters);
        trace!("signature base string: {}", base_string);

        let key = signing_key(&self.consumer.consumer_secret, self.token_secret.as_deref());
        let signature = compute_signature_for_string::<SHA1Hash>(SignatureEncoding::Base64, &key, &base_string);

        parameters.insert(OAUTH_SIGNATURE_KEY.to_owned(), signature.clone());

        self.timestamp = Some(timestamp);
        self.nonce = Some(nonce);
        self.signature = Some(signature);
    }

    /// Timestamp of the most recently signed request.
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// Nonce of the most recently signed request.
    pub fn nonce(&self) -> Option<&str> {
        self.nonce.as_deref()
    }

    /// Signature of the most recently signed request.
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<&str>) {
        debug!("token {}", if token.is_some() { "set" } else { "cleared" });
        self.token = token.map(str::to_owned);
    }

    pub fn token_secret(&self) -> Option<&str> {
        self.token_secret.as_deref()
    }

    pub fn set_token_secret(&mut self, token_secret: Option<&str>) {
        self.token_secret = token_secret.map(str::to_owned);
    }

    /// Forget the current user session, e.g. after the provider rejected the token.
    pub fn reset_credentials(&mut self) {
        self.set_token(None);
        self.set_token_secret(None);
    }

    /// Start a new authorization: drops the current credentials and returns the signed
    /// parameters of the `POST` request to the request token URL.
    pub fn request_token_parameters(&mut self) -> Result<Parameters> {
        self.reset_credentials();

        let mut parameters = Parameters::new();
        parameters.insert(OAUTH_CALLBACK_KEY.to_owned(), OAUTH_CALLBACK.to_owned());

        let url = self.consumer.request_token_url.clone();
        self.add_signature("POST", &url, &mut parameters)?;
        Ok(parameters)
    }

    /// Read the request token from the form encoded response `body` and keep it.
    pub fn handle_request_token_response(&mut self, body: &str) -> Result<TokenCredentials> {
        let mut values = form_decode(body);
        let credentials = take_credentials(&mut values)?;
        self.store_credentials(&credentials);
        Ok(credentials)
    }

    /// The page where the user grants access to the current request token.
    pub fn authorization_url(&self) -> Option<String> {
        let token = self.token.as_deref()?;
        let url = &self.consumer.authorization_url;
        let separator = if url.contains('?') { '&' } else { '?' };

        Some(format!("{}{}{}={}", url, separator, OAUTH_TOKEN_KEY, percent_encode(token)))
    }

    /// Inspect a URI the authorization page navigated to. Returns `None` for anything but the
    /// callback, otherwise keeps the returned token and hands out the verifier needed to
    /// request the access token.
    pub fn handle_callback_uri(&mut self, uri: &str) -> Result<Option<Authorization>> {
        if !uri.starts_with(OAUTH_CALLBACK) {
            return Ok(None);
        }

        let query = uri[OAUTH_CALLBACK.len()..].trim_start_matches('?');
        let mut values = form_decode(query);

        let token = values.remove(OAUTH_TOKEN_KEY).ok_or(OAuthError::AuthorizationDenied)?;
        self.set_token(Some(&token));

        Ok(Some(Authorization { token, verifier: values.remove(OAUTH_VERIFIER_KEY) }))
    }

    /// The signed parameters of the `POST` request exchanging the authorized request token for
    /// an access token.
    pub fn access_token_parameters(&mut self, verifier: Option<&str>) -> Result<Parameters> {
        let mut parameters = Parameters::new();
        if let Some(verifier) = verifier {
            parameters.insert(OAUTH_VERIFIER_KEY.to_owned(), verifier.to_owned());
        }

        let url = self.consumer.access_token_url.clone();
        self.add_signature("POST", &url, &mut parameters)?;
        Ok(parameters)
    }

    /// Read the access token from the form encoded response `body` and keep it for signing
    /// the following requests.
    pub fn handle_access_token_response(&mut self, body: &str) -> Result<AccessToken> {
        let mut values = form_decode(body);
        let credentials = take_credentials(&mut values)?;
        self.store_credentials(&credentials);
        Ok(AccessToken { credentials, extra: values })
    }

    fn store_credentials(&mut self, credentials: &TokenCredentials) {
        self.set_token(Some(&credentials.token));
        self.set_token_secret(Some(&credentials.token_secret));
    }
}

/// Build the string that is signed: the percent-encoded method, URL and parameter string
/// joined by `&`. The parameter string lists every parameter sorted by name.
pub fn signature_base_string(method: &str, url: &str, parameters: &Parameters) -> String {
    let mut keys = parameters.keys().collect::<Vec<_>>();
    keys.sort();

    let parameter_string = keys
        .into_iter()
        .map(|key| format!("{}={}", percent_encode(key), percent_encode(&parameters[key])))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}&{}&{}",
            percent_encode(method),
            percent_encode(url),
            percent_encode(&parameter_string))
}

/// The HMAC key: consumer secret and token secret, each percent-encoded, joined by `&`. The
/// `&` is kept when there is no token secret yet.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
    format!("{}&{}", percent_encode(consumer_secret), percent_encode(token_secret.unwrap_or_default()))
}

fn create_timestamp(now: Duration) -> String {
    now.as_secs().to_string()
}

fn create_nonce(now: Duration, random: u32) -> String {
    compute_checksum_for_string::<MD5Hash>(&format!("{}{}", now.subsec_micros(), random))
}

fn take_credentials(values: &mut Parameters) -> Result<TokenCredentials> {
    let token = values.remove(OAUTH_TOKEN_KEY).ok_or(OAuthError::IncompleteResponse(OAUTH_TOKEN_KEY))?;
    let token_secret = values
        .remove(OAUTH_TOKEN_SECRET_KEY)
        .ok_or(OAuthError::IncompleteResponse(OAUTH_TOKEN_SECRET_KEY))?;

    Ok(TokenCredentials { token, token_secret })
}
