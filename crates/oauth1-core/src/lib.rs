//! OAuth 1.0a request signing (RFC 5849).
//!
//! This crate turns an unsigned [`Request`] into a signed one carrying an
//! `Authorization` header. The pieces, leaf-first:
//!
//! - [`encoding`]: RFC 3986 percent-encoding used for every protocol token
//! - [`Parameter`]: key/value pair with the canonical signature ordering
//! - [`Request`]: immutable description of the HTTP request to sign
//! - [`Signer`]: computes the raw signature ([`HmacSha1Signer`])
//! - [`Authorizer`]: generates timestamp and nonce, signs, and appends the header
//!
//! # Example
//!
//! ```
//! use oauth1_core::{Authorizer, FixedClock, FixedNonce, Request};
//!
//! let request = Request::builder("POST", "https://api.example.com/1.1/statuses/update.json")
//!     .query("include_entities", "true")
//!     .build()
//!     .unwrap();
//!
//! let authorizer = Authorizer::new()
//!     .with_clock(FixedClock(1_318_622_958))
//!     .with_nonce_source(FixedNonce::new("abc"));
//!
//! let signed = authorizer.authorize(&request, "key", "secret", Some("token"), Some("token-secret"));
//! assert!(signed.authorization().unwrap().starts_with("OAuth oauth_consumer_key=\"key\""));
//! ```

mod authorizer;
mod clock;
pub mod encoding;
mod error;
mod parameter;
mod request;
mod signer;

pub use authorizer::{AUTHORIZATION_HEADER, Authorizer, DEFAULT_OAUTH_VERSION};
pub use clock::{
    Clock, FixedClock, FixedNonce, NonceSource, RandomNonce, SystemClock, TimestampUnit,
};
pub use error::RequestError;
pub use parameter::{Header, Parameter};
pub use request::{Request, RequestBuilder};
pub use signer::{HmacSha1Signer, Signer, signature_base_string, signing_key};

/// Protocol parameter names (RFC 5849 Section 3.1 and 2.1-2.3).
pub mod names {
    /// `oauth_callback`
    pub const OAUTH_CALLBACK: &str = "oauth_callback";
    /// `oauth_consumer_key`
    pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
    /// `oauth_nonce`
    pub const OAUTH_NONCE: &str = "oauth_nonce";
    /// `oauth_signature`
    pub const OAUTH_SIGNATURE: &str = "oauth_signature";
    /// `oauth_signature_method`
    pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
    /// `oauth_timestamp`
    pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
    /// `oauth_token`
    pub const OAUTH_TOKEN: &str = "oauth_token";
    /// `oauth_token_secret`
    pub const OAUTH_TOKEN_SECRET: &str = "oauth_token_secret";
    /// `oauth_verifier`
    pub const OAUTH_VERIFIER: &str = "oauth_verifier";
    /// `oauth_version`
    pub const OAUTH_VERSION: &str = "oauth_version";
}
