//! CLI error types.

use oauth1_config::ConfigError;
use oauth1_core::RequestError;
use oauth1_flow::FlowError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Flow(#[from] FlowError),

    #[error("{0}")]
    Request(#[from] RequestError),

    #[error("{0}")]
    Validation(String),
}
