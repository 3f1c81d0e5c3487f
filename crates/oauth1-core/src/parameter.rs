//! Parameter and header value types.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::encoding::{decode, encode};
use crate::error::RequestError;

/// Unencoded key/value pair from a query string, form body, or the protocol itself.
///
/// Equality is structural on the raw strings. Ordering is the canonical
/// signature order of RFC 5849 Section 3.4.1.3.2: the percent-encoded key
/// compared byte-wise, then the percent-encoded value. Because encoding is
/// injective the ordering agrees with equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    key: String,
    value: String,
}

impl Parameter {
    /// Create a parameter from raw (unencoded) key and value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Raw key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Ord for Parameter {
    fn cmp(&self, other: &Self) -> Ordering {
        encode(&self.key)
            .cmp(&encode(&other.key))
            .then_with(|| encode(&self.value).cmp(&encode(&other.value)))
    }
}

impl PartialOrd for Parameter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Renders `encode(key)=encode(value)`.
impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", encode(&self.key), encode(&self.value))
    }
}

/// Parses `key=value`, percent-decoding both halves.
///
/// Only the first `=` separates; a missing `=` yields an empty value.
impl FromStr for Parameter {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(RequestError::EmptyParameter);
        }
        let (key, value) = s.split_once('=').unwrap_or((s, ""));
        Ok(Self::new(decode(key), decode(value)))
    }
}

/// HTTP header, unencoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    /// Create a header.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Header name as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted(mut params: Vec<Parameter>) -> Vec<Parameter> {
        params.sort();
        params
    }

    #[test]
    fn test_order_by_key_then_value() {
        let params = sorted(vec![
            Parameter::new("b", "1"),
            Parameter::new("a", "2"),
            Parameter::new("a", "1"),
        ]);
        assert_eq!(
            params,
            vec![
                Parameter::new("a", "1"),
                Parameter::new("a", "2"),
                Parameter::new("b", "1"),
            ]
        );
    }

    #[test]
    fn test_order_compares_encoded_bytes() {
        // '|' sorts after 'a' raw, but "%7C" sorts before it
        let params = sorted(vec![Parameter::new("a", ""), Parameter::new("|", "")]);
        assert_eq!(params[0].key(), "|");

        // Uppercase sorts before lowercase
        let params = sorted(vec![Parameter::new("b", ""), Parameter::new("B", "")]);
        assert_eq!(params[0].key(), "B");
    }

    #[test]
    fn test_order_independent_of_insertion() {
        let canonical = sorted(vec![
            Parameter::new("oauth_version", "1.0"),
            Parameter::new("status", "Hello Ladies + Gentlemen"),
            Parameter::new("include_entities", "true"),
            Parameter::new("oauth_nonce", "abc"),
            Parameter::new("a", "z"),
            Parameter::new("a", "y"),
            Parameter::new("a b", "x"),
            Parameter::new("a~", "w"),
        ]);

        // Rotate and reverse through every starting point
        for shift in 0..canonical.len() {
            let mut shuffled = canonical.clone();
            shuffled.rotate_left(shift);
            assert_eq!(sorted(shuffled.clone()), canonical);
            shuffled.reverse();
            assert_eq!(sorted(shuffled), canonical);
        }
    }

    #[test]
    fn test_equal_parameters_compare_equal() {
        let a = Parameter::new("k", "v");
        let b = Parameter::new("k", "v");
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_encodes_both_halves() {
        let param = Parameter::new("a b", "c&d=e");
        assert_eq!(param.to_string(), "a%20b=c%26d%3De");
    }

    #[test]
    fn test_from_str_decodes() {
        let param: Parameter = "oauth_token=abc%2B123".parse().unwrap();
        assert_eq!(param, Parameter::new("oauth_token", "abc+123"));
    }

    #[test]
    fn test_from_str_splits_on_first_equals() {
        let param: Parameter = "k=a=b".parse().unwrap();
        assert_eq!(param.value(), "a=b");
    }

    #[test]
    fn test_from_str_without_value() {
        let param: Parameter = "flag".parse().unwrap();
        assert_eq!(param, Parameter::new("flag", ""));
    }

    #[test]
    fn test_from_str_empty_is_error() {
        assert_eq!(
            "".parse::<Parameter>(),
            Err(RequestError::EmptyParameter)
        );
    }
}
