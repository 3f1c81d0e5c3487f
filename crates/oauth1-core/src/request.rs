//! Immutable request model.

use crate::error::RequestError;
use crate::parameter::{Header, Parameter};

/// HTTP request to be signed.
///
/// Values are immutable once built. Signing produces a new `Request`; the
/// original is never modified. The URL is used verbatim in the signature base
/// string, so callers are responsible for lowercasing scheme and host and for
/// leaving the query string out of it (query parameters go in
/// [`RequestBuilder::query`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Request {
    method: String,
    url: String,
    headers: Vec<Header>,
    query_parameters: Vec<Parameter>,
    form_parameters: Vec<Parameter>,
}

impl Request {
    /// `POST`
    pub const POST: &'static str = "POST";

    /// Start building a request.
    pub fn builder(method: impl Into<String>, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
            query_parameters: Vec::new(),
            form_parameters: Vec::new(),
        }
    }

    /// HTTP method as given.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Absolute URL without query string.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Headers in insertion order.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Query parameters in insertion order.
    pub fn query_parameters(&self) -> &[Parameter] {
        &self.query_parameters
    }

    /// Form (body) parameters in insertion order.
    pub fn form_parameters(&self) -> &[Parameter] {
        &self.form_parameters
    }

    /// Value of the last `Authorization` header, matched case-insensitively.
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|h| h.name().eq_ignore_ascii_case("authorization"))
            .map(Header::value)
    }

    /// Copy of this request with `header` appended after all existing headers.
    #[must_use]
    pub fn with_header(&self, header: Header) -> Self {
        let mut headers = Vec::with_capacity(self.headers.len() + 1);
        headers.extend_from_slice(&self.headers);
        headers.push(header);
        Self {
            method: self.method.clone(),
            url: self.url.clone(),
            headers,
            query_parameters: self.query_parameters.clone(),
            form_parameters: self.form_parameters.clone(),
        }
    }

    /// URL with the query parameters appended as an encoded query string.
    pub fn target_url(&self) -> String {
        if self.query_parameters.is_empty() {
            return self.url.clone();
        }
        format!("{}?{}", self.url, join(&self.query_parameters))
    }

    /// Form parameters rendered as an `application/x-www-form-urlencoded` body.
    pub fn form_body(&self) -> String {
        join(&self.form_parameters)
    }
}

fn join(params: &[Parameter]) -> String {
    params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("&")
}

/// Builder for [`Request`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: String,
    url: String,
    headers: Vec<Header>,
    query_parameters: Vec<Parameter>,
    form_parameters: Vec<Parameter>,
}

impl RequestBuilder {
    /// Append a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    /// Append a query parameter (unencoded).
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters.push(Parameter::new(key, value));
        self
    }

    /// Append a form parameter (unencoded).
    #[must_use]
    pub fn form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form_parameters.push(Parameter::new(key, value));
        self
    }

    /// Append several query parameters.
    #[must_use]
    pub fn queries(mut self, params: impl IntoIterator<Item = Parameter>) -> Self {
        self.query_parameters.extend(params);
        self
    }

    /// Append several form parameters.
    #[must_use]
    pub fn forms(mut self, params: impl IntoIterator<Item = Parameter>) -> Self {
        self.form_parameters.extend(params);
        self
    }

    /// Validate required fields and produce the request.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the method is empty or the URL is not absolute.
    pub fn build(self) -> Result<Request, RequestError> {
        if self.method.trim().is_empty() {
            return Err(RequestError::MissingMethod);
        }
        if self.url.trim().is_empty() {
            return Err(RequestError::MissingUrl);
        }
        if !is_absolute(&self.url) {
            return Err(RequestError::RelativeUrl(self.url));
        }

        Ok(Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            query_parameters: self.query_parameters,
            form_parameters: self.form_parameters,
        })
    }
}

/// `scheme://authority...` with an RFC 3986 scheme and a non-empty authority.
fn is_absolute(url: &str) -> bool {
    let Some((scheme, rest)) = url.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    scheme_ok && !rest.is_empty() && !rest.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Request {
        Request::builder("POST", "https://api.example.com/resource")
            .header("Accept", "text/plain")
            .query("include_entities", "true")
            .form("status", "Hello Ladies + Gentlemen")
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_keeps_fields_in_order() {
        let request = Request::builder("GET", "https://example.com/a")
            .query("b", "2")
            .query("a", "1")
            .header("X-Two", "2")
            .header("X-One", "1")
            .build()
            .unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.url(), "https://example.com/a");
        assert_eq!(
            request.query_parameters(),
            &[Parameter::new("b", "2"), Parameter::new("a", "1")]
        );
        assert_eq!(
            request.headers(),
            &[Header::new("X-Two", "2"), Header::new("X-One", "1")]
        );
        assert!(request.form_parameters().is_empty());
    }

    #[test]
    fn test_build_missing_method() {
        let err = Request::builder("", "https://example.com").build().unwrap_err();
        assert_eq!(err, RequestError::MissingMethod);
    }

    #[test]
    fn test_build_missing_url() {
        let err = Request::builder("POST", "").build().unwrap_err();
        assert_eq!(err, RequestError::MissingUrl);
    }

    #[test]
    fn test_build_relative_url() {
        for url in ["/oauth/request_token", "example.com/x", "://host", "https:///path"] {
            let err = Request::builder("POST", url).build().unwrap_err();
            assert_eq!(err, RequestError::RelativeUrl(url.to_owned()));
        }
    }

    #[test]
    fn test_with_header_leaves_original_untouched() {
        let original = sample();
        let snapshot = original.clone();

        let extended = original.with_header(Header::new("Authorization", "OAuth x=\"y\""));

        assert_eq!(original, snapshot);
        assert_eq!(extended.headers().len(), 2);
        assert_eq!(&extended.headers()[..1], original.headers());
        assert_eq!(extended.authorization(), Some("OAuth x=\"y\""));
        assert_eq!(original.authorization(), None);
    }

    #[test]
    fn test_authorization_is_case_insensitive() {
        let request = Request::builder("GET", "https://example.com")
            .header("authorization", "OAuth a=\"b\"")
            .build()
            .unwrap();
        assert_eq!(request.authorization(), Some("OAuth a=\"b\""));
    }

    #[test]
    fn test_target_url_and_form_body() {
        let request = sample();
        assert_eq!(
            request.target_url(),
            "https://api.example.com/resource?include_entities=true"
        );
        assert_eq!(request.form_body(), "status=Hello%20Ladies%20%2B%20Gentlemen");
    }

    #[test]
    fn test_target_url_without_query() {
        let request = Request::builder("POST", "https://example.com/x").build().unwrap();
        assert_eq!(request.target_url(), "https://example.com/x");
        assert_eq!(request.form_body(), "");
    }
}
