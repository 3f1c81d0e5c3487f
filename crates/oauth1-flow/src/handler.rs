//! Post-login hook.

use std::io;

/// Receives the access credentials once the handshake completes.
///
/// The output is whatever the hosting application answers the callback
/// with (an HTTP response, a session id, ...).
pub trait AuthenticatedHandler: Send + Sync {
    /// Value returned from [`LoginFlow::callback`](crate::LoginFlow::callback).
    type Output;

    /// Handle freshly issued access credentials.
    fn authenticated(&self, access_token: &str, access_token_secret: &str)
    -> io::Result<Self::Output>;
}

impl<F, R> AuthenticatedHandler for F
where
    F: Fn(&str, &str) -> io::Result<R> + Send + Sync,
{
    type Output = R;

    fn authenticated(&self, access_token: &str, access_token_secret: &str) -> io::Result<R> {
        self(access_token, access_token_secret)
    }
}
