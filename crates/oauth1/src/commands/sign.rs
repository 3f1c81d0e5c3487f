//! `oauth1 sign` command implementation.

use std::io::{self, Write};

use clap::Args;
use oauth1_config::Config;
use oauth1_core::{
    AUTHORIZATION_HEADER, Authorizer, FixedClock, FixedNonce, Parameter, Request, SystemClock,
};

use super::ConsumerArgs;
use crate::error::CliError;

/// Arguments for the sign command.
#[derive(Args)]
pub(crate) struct SignArgs {
    #[command(flatten)]
    consumer: ConsumerArgs,

    /// HTTP method.
    #[arg(short = 'X', long, default_value = "GET")]
    method: String,

    /// Absolute request URL without query string.
    #[arg(short, long)]
    url: String,

    /// Query parameter as key=value (repeatable).
    #[arg(short, long = "query", value_parser = parse_key_value)]
    queries: Vec<Parameter>,

    /// Form body parameter as key=value (repeatable).
    #[arg(short, long = "form", value_parser = parse_key_value)]
    forms: Vec<Parameter>,

    /// User access token.
    #[arg(long, requires = "token_secret")]
    token: Option<String>,

    /// User access token secret.
    #[arg(long, requires = "token")]
    token_secret: Option<String>,

    /// Fixed timestamp instead of the system clock.
    #[arg(long)]
    timestamp: Option<u64>,

    /// Fixed nonce instead of a random one.
    #[arg(long)]
    nonce: Option<String>,
}

impl SignArgs {
    /// Execute the sign command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the request is malformed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.consumer.load(None, None)?;
        let consumer = config.require_consumer()?;

        let request = Request::builder(self.method.to_uppercase(), self.url)
            .queries(self.queries)
            .forms(self.forms)
            .build()?;

        let authorizer = build_authorizer(&config, self.timestamp, self.nonce)?;
        let signed = authorizer.authorize(
            &request,
            &consumer.key,
            &consumer.secret,
            self.token.as_deref(),
            self.token_secret.as_deref(),
        );

        let header = signed
            .authorization()
            .ok_or_else(|| CliError::Validation("request was not signed".to_owned()))?;
        writeln!(io::stdout(), "{AUTHORIZATION_HEADER}: {header}")?;
        Ok(())
    }
}

/// Authorizer honoring `[signing]` and the fixed-value overrides.
fn build_authorizer(
    config: &Config,
    timestamp: Option<u64>,
    nonce: Option<String>,
) -> Result<Authorizer, CliError> {
    let mut authorizer = Authorizer::new().with_oauth_version(&config.signing.oauth_version);
    authorizer = match timestamp {
        Some(timestamp) => authorizer.with_clock(FixedClock(timestamp)),
        None => authorizer.with_clock(SystemClock::new(config.signing.timestamp_unit()?)),
    };
    if let Some(nonce) = nonce {
        authorizer = authorizer.with_nonce_source(FixedNonce::new(nonce));
    }
    Ok(authorizer)
}

/// Split `key=value` on the first `=`; values are taken literally.
fn parse_key_value(arg: &str) -> Result<Parameter, String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{arg}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{arg}`"));
    }
    Ok(Parameter::new(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("status=Hello Ladies + Gentlemen").unwrap(),
            Parameter::new("status", "Hello Ladies + Gentlemen")
        );
        assert_eq!(
            parse_key_value("redirect=https://a.test/?x=1").unwrap(),
            Parameter::new("redirect", "https://a.test/?x=1")
        );
        assert_eq!(parse_key_value("flag=").unwrap(), Parameter::new("flag", ""));
    }

    #[test]
    fn test_parse_key_value_rejects_malformed() {
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=value").is_err());
    }

    #[test]
    fn test_build_authorizer_fixed_values() {
        let config = Config::default();
        let authorizer =
            build_authorizer(&config, Some(1_318_622_958), Some("n".to_owned())).unwrap();
        let request = Request::builder("GET", "https://api.example.com/1/items")
            .build()
            .unwrap();

        let header = authorizer
            .authorize_consumer(&request, "ck", "cs")
            .authorization()
            .unwrap()
            .to_owned();

        assert!(header.contains("oauth_timestamp=\"1318622958\""));
        assert!(header.contains("oauth_nonce=\"n\""));
        assert!(header.contains("oauth_version=\"1.0\""));
    }
}
