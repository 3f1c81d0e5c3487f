//! Provider response parsing.

use oauth1_core::Parameter;
use oauth1_core::names::{OAUTH_TOKEN, OAUTH_TOKEN_SECRET};

use crate::error::{FlowError, Stage};

/// Token and secret issued by the provider on either leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// `oauth_token`
    pub token: String,
    /// `oauth_token_secret`
    pub token_secret: String,
}

impl TokenPair {
    /// Extract `oauth_token` and `oauth_token_secret` from a response body.
    pub(crate) fn from_body(body: &str, stage: Stage) -> Result<Self, FlowError> {
        let params = parse_form_body(body);
        Ok(Self {
            token: get_required_param(&params, OAUTH_TOKEN, stage)?,
            token_secret: get_required_param(&params, OAUTH_TOKEN_SECRET, stage)?,
        })
    }
}

/// Parse an `&`-joined `key=value` body, percent-decoding each half.
///
/// Empty segments are skipped; order is preserved.
pub fn parse_form_body(body: &str) -> Vec<Parameter> {
    body.split('&')
        .filter_map(|pair| pair.parse::<Parameter>().ok())
        .collect()
}

/// First value for `name`, or a provider error.
fn get_required_param(
    params: &[Parameter],
    name: &'static str,
    stage: Stage,
) -> Result<String, FlowError> {
    params
        .iter()
        .find(|p| p.key() == name)
        .map(|p| p.value().to_owned())
        .ok_or(FlowError::MissingParameter { stage, name })
}
