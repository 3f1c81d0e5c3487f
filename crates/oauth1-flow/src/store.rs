//! Temporary credential storage between the two legs of the flow.

use std::io;

use dashmap::DashMap;

/// Maps a temporary `oauth_token` to its `oauth_token_secret`.
///
/// Implementations must allow concurrent `put`/`get` on distinct tokens and
/// make a completed `put` visible to every later `get` of the same token.
pub trait TokenStore: Send + Sync {
    /// Remember the secret for `token`, replacing any previous value.
    fn put(&self, token: &str, token_secret: &str) -> io::Result<()>;

    /// Look up the secret for `token`.
    fn get(&self, token: &str) -> io::Result<Option<String>>;
}

/// In-process [`TokenStore`] backed by a sharded concurrent map.
///
/// Entries live until [`MemoryTokenStore::remove`] is called. A
/// long-running host should remove each token once its callback completes.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    secrets: DashMap<String, String>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens.
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Forget `token`, returning its secret if it was stored.
    pub fn remove(&self, token: &str) -> Option<String> {
        self.secrets.remove(token).map(|(_, secret)| secret)
    }
}

impl TokenStore for MemoryTokenStore {
    fn put(&self, token: &str, token_secret: &str) -> io::Result<()> {
        self.secrets.insert(token.to_owned(), token_secret.to_owned());
        Ok(())
    }

    fn get(&self, token: &str) -> io::Result<Option<String>> {
        Ok(self.secrets.get(token).map(|entry| entry.value().clone()))
    }
}
