//! Three-legged OAuth 1.0a login.
//!
//! [`LoginFlow`] drives the handshake against a provider:
//!
//! 1. [`LoginFlow::initiate`] obtains temporary credentials and returns a
//!    [`Redirect`] to the provider's authenticate page
//! 2. the provider sends the user back with `oauth_token` and `oauth_verifier`
//! 3. [`LoginFlow::callback`] exchanges them for access credentials and hands
//!    those to the [`AuthenticatedHandler`]
//!
//! Everything outside the handshake is consumed through narrow traits:
//! [`TokenStore`] for temporary secrets, [`AuthenticatedHandler`] for the
//! post-login step, and [`HttpTransport`] for the wire ([`UreqTransport`] is
//! the shipped implementation).

mod error;
mod flow;
mod handler;
mod response;
mod store;
mod transport;

pub use error::{FlowError, Stage, TransportError};
pub use flow::{
    AUTHENTICATE_PATH, BASE_PATH, CALLBACK_PATH, ConsumerCredentials, Endpoints, LoginFlow,
    Redirect, authenticate_url_for, callback_url_for,
};
pub use handler::AuthenticatedHandler;
pub use response::{TokenPair, parse_form_body};
pub use store::{MemoryTokenStore, TokenStore};
pub use transport::{DEFAULT_TIMEOUT, FORM_CONTENT_TYPE, HttpResponse, HttpTransport, UreqTransport};
