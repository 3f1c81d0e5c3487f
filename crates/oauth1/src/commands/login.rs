//! `oauth1 login` command implementation.

use std::io::{self, BufRead, Write};

use clap::Args;
use oauth1_config::Config;
use oauth1_core::{Authorizer, SystemClock};
use oauth1_flow::{
    ConsumerCredentials, Endpoints, LoginFlow, MemoryTokenStore, UreqTransport, callback_url_for,
};
use tracing::debug;

use super::ConsumerArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the login command.
#[derive(Args)]
pub(crate) struct LoginArgs {
    #[command(flatten)]
    consumer: ConsumerArgs,

    /// Public base URL of the service receiving the callback (overrides config).
    #[arg(short = 'u', long)]
    base_url: Option<String>,

    /// HTTP timeout in seconds (overrides config).
    #[arg(long)]
    timeout: Option<u64>,
}

impl LoginArgs {
    /// Execute the login command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or any leg of the flow fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.consumer.load(self.base_url, self.timeout)?;
        let consumer = config.require_consumer()?;
        let callback_url = config
            .service
            .callback_url
            .clone()
            .unwrap_or_else(|| callback_url_for(&config.service.base_url));
        debug!(%callback_url, "starting login");

        let flow = LoginFlow::new(
            ConsumerCredentials::new(&consumer.key, &consumer.secret),
            callback_url,
            endpoints(&config),
            MemoryTokenStore::new(),
            |token: &str, secret: &str| -> io::Result<(String, String)> {
                Ok((token.to_owned(), secret.to_owned()))
            },
            UreqTransport::new(config.provider.timeout()),
        )
        .with_authorizer(
            Authorizer::new()
                .with_clock(SystemClock::new(config.signing.timestamp_unit()?))
                .with_oauth_version(&config.signing.oauth_version),
        );

        output.step(1, "Requesting temporary credentials...");
        let redirect = flow.initiate()?;
        output.success("Temporary token received");

        output.banner("Step 2: Authorization Required");
        output.info("Please open this URL in your browser:");
        output.link(&redirect.location);
        output.info("After approving, copy the parameters from the callback URL.");

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let token = prompt(&mut input, "oauth_token")?;
        let verifier = prompt(&mut input, "oauth_verifier")?;

        output.step(3, "Exchanging for access token...");
        let (access_token, access_secret) = flow.callback(&token, &verifier)?;
        flow.store().remove(&token);

        output.banner("OAuth Authorization Successful!");
        let mut stdout = io::stdout();
        writeln!(stdout, "access_token = \"{access_token}\"")?;
        writeln!(stdout, "access_secret = \"{access_secret}\"")?;

        Ok(())
    }
}

/// Provider URLs from `[provider]`, falling back to the built-in defaults.
fn endpoints(config: &Config) -> Endpoints {
    let defaults = Endpoints::default();
    let provider = &config.provider;
    Endpoints {
        request_token_url: provider
            .request_token_url
            .clone()
            .unwrap_or(defaults.request_token_url),
        authenticate_url: provider
            .authenticate_url
            .clone()
            .unwrap_or(defaults.authenticate_url),
        access_token_url: provider
            .access_token_url
            .clone()
            .unwrap_or(defaults.access_token_url),
    }
}

/// Ask for one callback parameter and read a trimmed, non-empty line.
fn prompt(input: &mut impl BufRead, name: &str) -> Result<String, CliError> {
    let mut stdout = io::stdout();
    write!(stdout, "Enter {name}: ")?;
    stdout.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let value = line.trim();
    if value.is_empty() {
        return Err(CliError::Validation(format!("{name} is required")));
    }
    Ok(value.to_owned())
}
