//! `Authorization` header assembly (RFC 5849 Section 3.5.1).

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use tracing::debug;

use crate::clock::{Clock, NonceSource, RandomNonce, SystemClock};
use crate::encoding::encode;
use crate::names;
use crate::parameter::{Header, Parameter};
use crate::request::Request;
use crate::signer::{HmacSha1Signer, Signer};

/// Header name the authorizer appends.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Default `oauth_version`.
pub const DEFAULT_OAUTH_VERSION: &str = "1.0";

/// Signs requests and attaches the OAuth `Authorization` header.
///
/// Holds no mutable state: the signer, clock and nonce source are
/// capabilities fixed at construction, so one instance can serve any number
/// of threads.
pub struct Authorizer {
    signer: Box<dyn Signer>,
    clock: Box<dyn Clock>,
    nonces: Box<dyn NonceSource>,
    oauth_version: String,
}

impl Default for Authorizer {
    fn default() -> Self {
        Self {
            signer: Box::new(HmacSha1Signer),
            clock: Box::new(SystemClock::default()),
            nonces: Box::new(RandomNonce),
            oauth_version: DEFAULT_OAUTH_VERSION.to_owned(),
        }
    }
}

impl std::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorizer")
            .field("signature_method", &self.signer.signature_method())
            .field("oauth_version", &self.oauth_version)
            .finish_non_exhaustive()
    }
}

impl Authorizer {
    /// HMAC-SHA1, OAuth version 1.0, wall clock, random nonces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the signature method.
    #[must_use]
    pub fn with_signer(mut self, signer: impl Signer + 'static) -> Self {
        self.signer = Box::new(signer);
        self
    }

    /// Replace the timestamp source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the nonce source.
    #[must_use]
    pub fn with_nonce_source(mut self, nonces: impl NonceSource + 'static) -> Self {
        self.nonces = Box::new(nonces);
        self
    }

    /// Replace the `oauth_version` value.
    #[must_use]
    pub fn with_oauth_version(mut self, version: impl Into<String>) -> Self {
        self.oauth_version = version.into();
        self
    }

    /// Signature method in use.
    pub fn signature_method(&self) -> &str {
        self.signer.signature_method()
    }

    /// `oauth_version` in use.
    pub fn oauth_version(&self) -> &str {
        &self.oauth_version
    }

    /// Sign `request` with consumer credentials only (no token yet).
    #[must_use]
    pub fn authorize_consumer(
        &self,
        request: &Request,
        consumer_key: &str,
        consumer_secret: &str,
    ) -> Request {
        self.authorize(request, consumer_key, consumer_secret, None, None)
    }

    /// Return a copy of `request` with an OAuth `Authorization` header appended.
    ///
    /// Draws exactly one timestamp and one nonce. `oauth_token` appears in the
    /// header only when `token` is given.
    #[must_use]
    pub fn authorize(
        &self,
        request: &Request,
        consumer_key: &str,
        consumer_secret: &str,
        token: Option<&str>,
        token_secret: Option<&str>,
    ) -> Request {
        let timestamp = self.clock.now();
        let nonce = self.nonces.nonce();

        let signature = self.signer.sign(
            request,
            &nonce,
            timestamp,
            &self.oauth_version,
            consumer_key,
            consumer_secret,
            token,
            token_secret,
        );

        let mut oauth_params = vec![
            Parameter::new(names::OAUTH_CONSUMER_KEY, consumer_key),
            Parameter::new(names::OAUTH_NONCE, nonce),
            Parameter::new(names::OAUTH_SIGNATURE, BASE64_STANDARD.encode(signature)),
            Parameter::new(names::OAUTH_SIGNATURE_METHOD, self.signer.signature_method()),
            Parameter::new(names::OAUTH_TIMESTAMP, timestamp.to_string()),
            Parameter::new(names::OAUTH_VERSION, self.oauth_version.as_str()),
        ];
        if let Some(token) = token {
            oauth_params.push(Parameter::new(names::OAUTH_TOKEN, token));
        }
        oauth_params.sort();

        debug!(
            method = request.method(),
            url = request.url(),
            signature_method = self.signer.signature_method(),
            with_token = token.is_some(),
            "authorized request"
        );

        request.with_header(Header::new(
            AUTHORIZATION_HEADER,
            build_authorization_header(&oauth_params),
        ))
    }
}

/// Render `OAuth k1="v1", k2="v2", ...` from already-sorted parameters.
fn build_authorization_header(oauth_params: &[Parameter]) -> String {
    let header_parts: Vec<String> = oauth_params
        .iter()
        .map(|p| format!("{}=\"{}\"", encode(p.key()), encode(p.value())))
        .collect();
    format!("OAuth {}", header_parts.join(", "))
}
