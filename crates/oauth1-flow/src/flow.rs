//! Three-legged OAuth 1.0a flow (RFC 5849 Section 2).

use oauth1_core::encoding::encode;
use oauth1_core::names::{OAUTH_CALLBACK, OAUTH_TOKEN, OAUTH_VERIFIER};
use oauth1_core::{Authorizer, Request};
use tracing::{info, warn};

use crate::error::{FlowError, Stage};
use crate::handler::AuthenticatedHandler;
use crate::response::TokenPair;
use crate::store::TokenStore;
use crate::transport::{HttpResponse, HttpTransport};

/// Local path prefix under which the login endpoints are mounted.
pub const BASE_PATH: &str = "oauth/twitter/1";

/// Local endpoint that starts a login.
pub const AUTHENTICATE_PATH: &str = "authenticate";

/// Local endpoint the provider redirects back to.
pub const CALLBACK_PATH: &str = "callback";

/// Absolute URL of the local callback endpoint under `base_url`.
pub fn callback_url_for(base_url: &str) -> String {
    local_url(base_url, CALLBACK_PATH)
}

/// Absolute URL of the local endpoint that starts a login.
pub fn authenticate_url_for(base_url: &str) -> String {
    local_url(base_url, AUTHENTICATE_PATH)
}

fn local_url(base_url: &str, path: &str) -> String {
    format!("{}/{BASE_PATH}/{path}", base_url.trim_end_matches('/'))
}

/// Application credentials issued by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerCredentials {
    /// Consumer key.
    pub key: String,
    /// Consumer secret.
    pub secret: String,
}

impl ConsumerCredentials {
    /// Create credentials.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

/// Provider URLs for the three legs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Temporary credential request URL.
    pub request_token_url: String,
    /// Page the user is sent to for authorization.
    pub authenticate_url: String,
    /// Token exchange URL.
    pub access_token_url: String,
}

impl Endpoints {
    /// Twitter's OAuth 1.0a endpoints.
    pub fn twitter() -> Self {
        Self {
            request_token_url: "https://api.twitter.com/oauth/request_token".to_owned(),
            authenticate_url: "https://api.twitter.com/oauth/authenticate".to_owned(),
            access_token_url: "https://api.twitter.com/oauth/access_token".to_owned(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::twitter()
    }
}

/// Instruction to send the end user elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Absolute target URL.
    pub location: String,
}

impl Redirect {
    /// HTTP status for the redirect (Temporary Redirect).
    pub const STATUS: u16 = 307;
}

/// Three-legged login against one provider.
///
/// Holds no per-login state: the temporary secret issued by [`initiate`]
/// lives in the [`TokenStore`] until [`callback`] reads it, so independent
/// logins may interleave freely.
///
/// [`initiate`]: LoginFlow::initiate
/// [`callback`]: LoginFlow::callback
pub struct LoginFlow<S, H, T> {
    consumer: ConsumerCredentials,
    callback_url: String,
    endpoints: Endpoints,
    authorizer: Authorizer,
    store: S,
    handler: H,
    transport: T,
}

impl<S, H, T> LoginFlow<S, H, T>
where
    S: TokenStore,
    H: AuthenticatedHandler,
    T: HttpTransport,
{
    /// Create a flow with the default [`Authorizer`].
    ///
    /// # Arguments
    /// * `consumer` - Application credentials
    /// * `callback_url` - Absolute URL of this service's callback endpoint
    /// * `endpoints` - Provider URLs
    /// * `store` - Temporary secret storage
    /// * `handler` - Receives the access credentials
    /// * `transport` - Sends requests to the provider
    pub fn new(
        consumer: ConsumerCredentials,
        callback_url: impl Into<String>,
        endpoints: Endpoints,
        store: S,
        handler: H,
        transport: T,
    ) -> Self {
        Self {
            consumer,
            callback_url: callback_url.into(),
            endpoints,
            authorizer: Authorizer::new(),
            store,
            handler,
            transport,
        }
    }

    /// Replace the authorizer (signature method, clock, nonces, version).
    #[must_use]
    pub fn with_authorizer(mut self, authorizer: Authorizer) -> Self {
        self.authorizer = authorizer;
        self
    }

    /// Local callback URL sent as `oauth_callback`.
    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Provider URLs.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Token store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Post-login handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// HTTP transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Step 1: obtain temporary credentials and point the user at the provider.
    ///
    /// The redirect targets the authenticate URL with the temporary token
    /// appended as `oauth_token` (see [`LoginFlow::authorization_url`]).
    ///
    /// # Errors
    ///
    /// Returns a provider error on a non-200 status or a response without
    /// `oauth_token`/`oauth_token_secret`; transport and store failures are
    /// passed through.
    pub fn initiate(&self) -> Result<Redirect, FlowError> {
        let unsigned = Request::builder(Request::POST, &self.endpoints.request_token_url)
            .query(OAUTH_CALLBACK, &self.callback_url)
            .build()?;
        let signed = self.authorizer.authorize_consumer(
            &unsigned,
            &self.consumer.key,
            &self.consumer.secret,
        );

        info!(url = %self.endpoints.request_token_url, "requesting temporary credentials");
        let response = self.transport.send(&signed)?;
        let pair = parse_success(response, Stage::RequestToken)?;

        self.store.put(&pair.token, &pair.token_secret)?;

        Ok(Redirect {
            location: self.authorization_url(&pair.token),
        })
    }

    /// Authenticate page URL carrying the temporary token.
    pub fn authorization_url(&self, oauth_token: &str) -> String {
        let url = &self.endpoints.authenticate_url;
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{url}{separator}{OAUTH_TOKEN}={}", encode(oauth_token))
    }

    /// Step 3: exchange the verifier for access credentials and run the handler.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::UnknownToken`] if `oauth_token` was never stored,
    /// a provider error on a non-200 status or incomplete response, and passes
    /// transport, store and handler failures through.
    pub fn callback(&self, oauth_token: &str, oauth_verifier: &str) -> Result<H::Output, FlowError> {
        let Some(token_secret) = self.store.get(oauth_token)? else {
            warn!("callback with unknown oauth_token");
            return Err(FlowError::UnknownToken(oauth_token.to_owned()));
        };

        let unsigned = Request::builder(Request::POST, &self.endpoints.access_token_url)
            .query(OAUTH_TOKEN, oauth_token)
            .query(OAUTH_VERIFIER, oauth_verifier)
            .build()?;
        let signed = self.authorizer.authorize(
            &unsigned,
            &self.consumer.key,
            &self.consumer.secret,
            Some(oauth_token),
            Some(&token_secret),
        );

        info!(url = %self.endpoints.access_token_url, "exchanging verifier for access token");
        let response = self.transport.send(&signed)?;
        let access = parse_success(response, Stage::AccessToken)?;

        info!("access token obtained");
        Ok(self
            .handler
            .authenticated(&access.token, &access.token_secret)?)
    }
}

/// Require a 200 and extract the token pair.
fn parse_success(response: HttpResponse, stage: Stage) -> Result<TokenPair, FlowError> {
    if response.status != 200 {
        warn!(%stage, status = response.status, "provider rejected request");
        return Err(FlowError::ProviderStatus {
            stage,
            status: response.status,
            body: response.body,
        });
    }
    TokenPair::from_body(&response.body, stage)
}
