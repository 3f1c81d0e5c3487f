//! Percent-encoding per RFC 3986 Section 2.1, as required by RFC 5849 Section 3.6.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};

/// OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode every UTF-8 byte outside the unreserved set.
///
/// Hex digits are uppercase. Unlike form encoding, `/`, `:` and space are
/// all escaped (`%2F`, `%3A`, `%20`).
pub fn encode(input: &str) -> String {
    percent_encode(input.as_bytes(), OAUTH_ENCODE_SET).to_string()
}

/// Reverse `%XY` escapes, leaving every other character untouched.
///
/// `+` is not treated as a space. Malformed escapes are passed through and
/// byte sequences that do not form valid UTF-8 are replaced with U+FFFD.
pub fn decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}
