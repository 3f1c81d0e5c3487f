//! OAuth 1.0 signature generation (RFC 5849 Section 3.4).

use hmac::{Hmac, KeyInit, Mac};
use sha1::Sha1;

use crate::encoding::encode;
use crate::names;
use crate::parameter::Parameter;
use crate::request::Request;

type HmacSha1 = Hmac<Sha1>;

/// Computes the raw signature for a request.
///
/// Implementations must be stateless and deterministic: identical inputs
/// always produce identical bytes. Each signature method is its own
/// implementation.
pub trait Signer: Send + Sync {
    /// Value sent as `oauth_signature_method` (e.g. `HMAC-SHA1`).
    fn signature_method(&self) -> &str;

    /// Sign `request` with the given protocol values and shared secrets.
    ///
    /// An absent `token` is left out of the signed parameters; an absent
    /// `token_secret` signs with an empty token secret.
    #[allow(clippy::too_many_arguments)]
    fn sign(
        &self,
        request: &Request,
        nonce: &str,
        timestamp: u64,
        oauth_version: &str,
        consumer_key: &str,
        consumer_secret: &str,
        token: Option<&str>,
        token_secret: Option<&str>,
    ) -> Vec<u8>;
}

/// `HMAC-SHA1` signature method (RFC 5849 Section 3.4.2).
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha1Signer;

impl HmacSha1Signer {
    /// Method identifier.
    pub const METHOD: &'static str = "HMAC-SHA1";
}

impl Signer for HmacSha1Signer {
    fn signature_method(&self) -> &str {
        Self::METHOD
    }

    fn sign(
        &self,
        request: &Request,
        nonce: &str,
        timestamp: u64,
        oauth_version: &str,
        consumer_key: &str,
        consumer_secret: &str,
        token: Option<&str>,
        token_secret: Option<&str>,
    ) -> Vec<u8> {
        let base_string = signature_base_string(
            request,
            self.signature_method(),
            nonce,
            timestamp,
            oauth_version,
            consumer_key,
            token,
        );
        let key = signing_key(consumer_secret, token_secret);

        // HMAC accepts keys of any length, so this cannot fail at runtime
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .expect("HMAC-SHA1 must accept a key of any length");
        mac.update(base_string.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Build the signature base string per RFC 5849 Section 3.4.1.
///
/// Format: `METHOD&encode(url)&encode(parameter_string)`, where the parameter
/// string is every query and form parameter plus the protocol parameters
/// (minus `oauth_signature`), canonically sorted and `&`-joined.
#[allow(clippy::too_many_arguments)]
pub fn signature_base_string(
    request: &Request,
    signature_method: &str,
    nonce: &str,
    timestamp: u64,
    oauth_version: &str,
    consumer_key: &str,
    token: Option<&str>,
) -> String {
    let timestamp = timestamp.to_string();
    let protocol: [(&str, Option<&str>); 6] = [
        (names::OAUTH_CONSUMER_KEY, Some(consumer_key)),
        (names::OAUTH_NONCE, Some(nonce)),
        (names::OAUTH_SIGNATURE_METHOD, Some(signature_method)),
        (names::OAUTH_TIMESTAMP, Some(&timestamp)),
        (names::OAUTH_TOKEN, token),
        (names::OAUTH_VERSION, Some(oauth_version)),
    ];

    // Absent values (no token yet) drop out here
    let mut params: Vec<Parameter> = request
        .query_parameters()
        .iter()
        .chain(request.form_parameters())
        .cloned()
        .chain(
            protocol
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| Parameter::new(key, v))),
        )
        .collect();
    params.sort();

    let parameter_string = params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        request.method().to_uppercase(),
        encode(request.url()),
        encode(&parameter_string)
    )
}

/// Build the HMAC key: `encode(consumer_secret)&encode(token_secret)`.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
    format!(
        "{}&{}",
        encode(consumer_secret),
        encode(token_secret.unwrap_or_default())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::prelude::BASE64_STANDARD;
    use pretty_assertions::assert_eq;

    const CONSUMER_KEY: &str = "xvz1evFS4wEEPTGEFPHBog";
    const CONSUMER_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
    const TOKEN: &str = "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb";
    const TOKEN_SECRET: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";
    const NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
    const TIMESTAMP: u64 = 1_318_622_958;

    fn twitter_request() -> Request {
        Request::builder("post", "https://api.twitter.com/1.1/statuses/update.json")
            .query("include_entities", "true")
            .form("status", "Hello Ladies + Gentlemen, a signed OAuth request!")
            .build()
            .unwrap()
    }

    #[test]
    fn test_twitter_base_string() {
        let base = signature_base_string(
            &twitter_request(),
            HmacSha1Signer::METHOD,
            NONCE,
            TIMESTAMP,
            "1.0",
            CONSUMER_KEY,
            Some(TOKEN),
        );

        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
             include_entities%3Dtrue%26\
             oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
             oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
             oauth_signature_method%3DHMAC-SHA1%26\
             oauth_timestamp%3D1318622958%26\
             oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
             oauth_version%3D1.0%26\
             status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn test_twitter_signing_key() {
        assert_eq!(
            signing_key(CONSUMER_SECRET, Some(TOKEN_SECRET)),
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw&LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE"
        );
    }

    #[test]
    fn test_signing_key_without_token_secret() {
        assert_eq!(signing_key("c&s", None), "c%26s&");
    }

    #[test]
    fn test_twitter_signature() {
        let signature = HmacSha1Signer.sign(
            &twitter_request(),
            NONCE,
            TIMESTAMP,
            "1.0",
            CONSUMER_KEY,
            CONSUMER_SECRET,
            Some(TOKEN),
            Some(TOKEN_SECRET),
        );

        assert_eq!(signature.len(), 20);
        assert_eq!(
            BASE64_STANDARD.encode(&signature),
            "hCtSmYh+iHYCEqBWrE7C7hYmtUk="
        );
    }

    #[test]
    fn test_rfc_photos_signature() {
        // Example from the OAuth Core 1.0 specification, Appendix A.5
        let request = Request::builder("GET", "http://photos.example.net/photos")
            .query("file", "vacation.jpg")
            .query("size", "original")
            .build()
            .unwrap();

        let signature = HmacSha1Signer.sign(
            &request,
            "kllo9940pd9333jh",
            1_191_242_096,
            "1.0",
            "dpf43f3p2l4k3l03",
            "kd94hf93k423kf44",
            Some("nnch734d00sl2jdk"),
            Some("pfkkdhi9sl3r4s00"),
        );

        assert_eq!(
            BASE64_STANDARD.encode(&signature),
            "tR3+Ty81lMeYAr/Fid0kMTYa/WM="
        );
    }

    #[test]
    fn test_base_string_without_token() {
        let request = Request::builder("POST", "https://example.com/oauth/request_token")
            .query("oauth_callback", "http://localhost:8080/cb")
            .build()
            .unwrap();

        let base = signature_base_string(
            &request,
            HmacSha1Signer::METHOD,
            "n",
            1,
            "1.0",
            "ck",
            None,
        );

        assert!(!base.contains("oauth_token"));
        assert!(base.contains("oauth_callback%3Dhttp%253A%252F%252Flocalhost%253A8080%252Fcb"));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let sign = || {
            HmacSha1Signer.sign(
                &twitter_request(),
                NONCE,
                TIMESTAMP,
                "1.0",
                CONSUMER_KEY,
                CONSUMER_SECRET,
                None,
                None,
            )
        };
        assert_eq!(sign(), sign());
    }

    #[test]
    fn test_sign_depends_on_token_secret() {
        let sign = |secret| {
            HmacSha1Signer.sign(
                &twitter_request(),
                NONCE,
                TIMESTAMP,
                "1.0",
                CONSUMER_KEY,
                CONSUMER_SECRET,
                Some(TOKEN),
                secret,
            )
        };
        assert_ne!(sign(Some(TOKEN_SECRET)), sign(None));
    }

    #[test]
    fn test_sign_accepts_keys_beyond_block_size() {
        // HMAC-SHA1 hashes keys longer than its 64-byte block first
        let long_secret = "s".repeat(100);
        let sign = |secret: &str| {
            HmacSha1Signer.sign(
                &twitter_request(),
                NONCE,
                TIMESTAMP,
                "1.0",
                CONSUMER_KEY,
                secret,
                None,
                None,
            )
        };

        let signature = sign(&long_secret);

        assert_eq!(signature.len(), 20);
        assert_ne!(signature, sign(&long_secret[..64]));
        assert_eq!(sign("").len(), 20);
    }

    #[test]
    fn test_duplicate_keys_sorted_by_value() {
        let request = Request::builder("GET", "https://example.com/")
            .query("a", "2")
            .form("a", "1")
            .build()
            .unwrap();

        let base = signature_base_string(&request, "HMAC-SHA1", "n", 1, "1.0", "ck", None);
        assert!(base.contains("a%3D1%26a%3D2%26oauth_consumer_key"));
    }
}
