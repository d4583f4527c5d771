/// Credentials and endpoints of an application registered with an OAuth 1.0a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumer {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub request_token_url: String,
    pub authorization_url: String,
    pub access_token_url: String,
}

impl Consumer {
    /// A consumer without endpoints. Enough for signing requests with already known tokens.
    pub fn new<K, S>(consumer_key: K, consumer_secret: S) -> Self
        where K: Into<String>,
              S: Into<String> {
        Consumer {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            request_token_url: String::new(),
            authorization_url: String::new(),
            access_token_url: String::new(),
        }
    }

    pub fn with_request_token_url<U: Into<String>>(mut self, url: U) -> Self {
        self.request_token_url = url.into();
        self
    }

    /// The page the user is sent to for granting access. The request token is appended as
    /// `oauth_token` query parameter.
    pub fn with_authorization_url<U: Into<String>>(mut self, url: U) -> Self {
        self.authorization_url = url.into();
        self
    }

    pub fn with_access_token_url<U: Into<String>>(mut self, url: U) -> Self {
        self.access_token_url = url.into();
        self
    }
}

/// A token together with the secret used to sign requests on its behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCredentials {
    pub token: String,
    pub token_secret: String,
}
