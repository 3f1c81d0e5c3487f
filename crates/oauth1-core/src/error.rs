//! Error types for request construction.

/// Error building a [`Request`](crate::Request) or parsing a [`Parameter`](crate::Parameter).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RequestError {
    /// HTTP method was empty.
    #[error("HTTP method is required")]
    MissingMethod,

    /// URL was empty.
    #[error("request URL is required")]
    MissingUrl,

    /// URL is not of the form `scheme://host[/path]`.
    #[error("request URL must be absolute: {0}")]
    RelativeUrl(String),

    /// Textual parameter was empty.
    #[error("parameter text is empty")]
    EmptyParameter,
}
