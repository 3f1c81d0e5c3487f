//! CLI command implementations.

pub(crate) mod login;
pub(crate) mod sign;

pub(crate) use login::LoginArgs;
pub(crate) use sign::SignArgs;

use std::path::PathBuf;

use clap::Args;
use oauth1_config::{CliSettings, Config};

/// Options shared by every command that needs consumer credentials.
#[derive(Args)]
pub(crate) struct ConsumerArgs {
    /// Path to configuration file (default: auto-discover oauth1.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// OAuth consumer key (overrides config).
    #[arg(long, env = "OAUTH1_CONSUMER_KEY")]
    consumer_key: Option<String>,

    /// OAuth consumer secret (overrides config).
    #[arg(long, env = "OAUTH1_CONSUMER_SECRET", hide_env_values = true)]
    consumer_secret: Option<String>,
}

impl ConsumerArgs {
    /// Load config with these arguments applied on top.
    pub(crate) fn load(
        self,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Config, oauth1_config::ConfigError> {
        let cli_settings = CliSettings {
            consumer_key: self.consumer_key,
            consumer_secret: self.consumer_secret,
            base_url,
            timeout_secs,
        };
        Config::load(self.config.as_deref(), Some(&cli_settings))
    }
}
