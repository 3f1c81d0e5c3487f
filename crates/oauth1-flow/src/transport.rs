//! Outbound HTTP.

use std::time::Duration;

use oauth1_core::Request;
use ureq::Agent;

use crate::error::TransportError;

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Content type sent with form parameters.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Status and body of a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body decoded as UTF-8.
    pub body: String,
}

/// Sends a signed [`Request`] and returns the raw response.
///
/// Any status code is a successful send; interpreting it is the caller's
/// job. Timeouts and cancellation are the implementation's concern.
pub trait HttpTransport: Send + Sync {
    /// Perform the request.
    fn send(&self, request: &Request) -> Result<HttpResponse, TransportError>;
}

/// Blocking [`HttpTransport`] on a shared `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl UreqTransport {
    /// Transport with the given global timeout per request.
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: &Request) -> Result<HttpResponse, TransportError> {
        let mut builder = ureq::http::Request::builder()
            .method(request.method())
            .uri(request.target_url());
        for header in request.headers() {
            builder = builder.header(header.name(), header.value());
        }

        let body = request.form_body();
        if !request.form_parameters().is_empty() || request.method() == Request::POST {
            builder = builder.header("Content-Type", FORM_CONTENT_TYPE);
        }
        let http_request = builder
            .body(body.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let response = self.agent.run(http_request)?;

        let status = response.status().as_u16();
        let body = response.into_body().read_to_string()?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;

    /// Serve one canned response on a loopback port, reporting the raw request.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some((name, value)) = line.split_once(':')
                    && name.eq_ignore_ascii_case("content-length")
                {
                    content_length = value.trim().parse().unwrap();
                }
                head.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut body_bytes = vec![0u8; content_length];
            reader.read_exact(&mut body_bytes).unwrap();
            head.push_str(&String::from_utf8(body_bytes).unwrap());
            tx.send(head).unwrap();

            let mut stream = stream;
            write!(
                stream,
                "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
        });

        (format!("http://{addr}"), rx)
    }

    #[test]
    fn test_send_renders_query_headers_and_form() {
        let (base, rx) = serve_once("HTTP/1.1 200 OK", "oauth_token=a&oauth_token_secret=b");
        let request = Request::builder("POST", format!("{base}/oauth/request_token"))
            .query("oauth_callback", "http://localhost:8080/cb")
            .form("status", "a b")
            .header("Authorization", "OAuth oauth_consumer_key=\"ck\"")
            .build()
            .unwrap();

        let response = UreqTransport::default().send(&request).unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "oauth_token=a&oauth_token_secret=b");

        let raw = rx.recv().unwrap();
        assert!(raw.starts_with(
            "POST /oauth/request_token?oauth_callback=http%3A%2F%2Flocalhost%3A8080%2Fcb HTTP/1.1\r\n"
        ));
        let lower = raw.to_ascii_lowercase();
        assert!(lower.contains("authorization: oauth oauth_consumer_key=\"ck\""));
        assert!(lower.contains("content-type: application/x-www-form-urlencoded; charset=utf-8"));
        assert!(raw.ends_with("\r\n\r\nstatus=a%20b"));
    }

    #[test]
    fn test_error_status_is_not_a_transport_error() {
        let (base, _rx) = serve_once("HTTP/1.1 500 Internal Server Error", "nope");
        let request = Request::builder("POST", format!("{base}/x")).build().unwrap();

        let response = UreqTransport::new(Duration::from_secs(5))
            .send(&request)
            .unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(response.body, "nope");
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let request = Request::builder("POST", format!("http://127.0.0.1:{port}/x"))
            .build()
            .unwrap();

        let result = UreqTransport::new(Duration::from_secs(5)).send(&request);

        assert!(matches!(result, Err(TransportError::Http(_))));
    }
}
