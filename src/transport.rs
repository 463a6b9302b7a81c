//! Blocking HTTP plumbing and plain-data snapshots of what went over the wire.
//!
//! A [`Session`] wraps one cookie-holding blocking client. It is created per
//! logical scenario so session state such as the authentication cookie never
//! leaks between unrelated scenarios. Every call returns an [`Exchange`]:
//! owned snapshots of the request that was sent and the response that came
//! back, suitable for diagnostics long after the connection is gone.

use std::borrow::Cow;

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{CONTENT_TYPE, SET_COOKIE};
use reqwest::Method;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the transport itself, before any expectation is checked.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What was sent: method, URL, explicitly set headers, and the body bytes.
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// What came back, fully read into memory.
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Names of the cookies the response set.
    pub cookies: Vec<String>,
}

impl ResponseSnapshot {
    /// Body as text, lossily decoded.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// One request paired with its response.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub request: RequestSnapshot,
    pub response: ResponseSnapshot,
}

enum Payload {
    None,
    Json(Vec<u8>),
    Bytes(Vec<u8>),
}

/// A blocking HTTP session with a private cookie store.
pub struct Session {
    client: HttpClient,
}

impl Session {
    pub fn new() -> Result<Self, TransportError> {
        let client = HttpClient::builder().cookie_store(true).build()?;
        Ok(Self { client })
    }

    pub fn get(&self, url: &str) -> Result<Exchange, TransportError> {
        self.send(Method::GET, url, Payload::None)
    }

    pub fn delete(&self, url: &str) -> Result<Exchange, TransportError> {
        self.send(Method::DELETE, url, Payload::None)
    }

    pub fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<Exchange, TransportError> {
        self.send(Method::POST, url, Payload::Json(serde_json::to_vec(body)?))
    }

    pub fn patch_json<B: Serialize>(&self, url: &str, body: &B) -> Result<Exchange, TransportError> {
        self.send(Method::PATCH, url, Payload::Json(serde_json::to_vec(body)?))
    }

    pub fn post_bytes(&self, url: &str, body: &[u8]) -> Result<Exchange, TransportError> {
        self.send(Method::POST, url, Payload::Bytes(body.to_vec()))
    }

    fn send(&self, method: Method, url: &str, payload: Payload) -> Result<Exchange, TransportError> {
        let mut headers = Vec::new();
        let mut builder = self.client.request(method.clone(), url);
        let body = match payload {
            Payload::None => None,
            Payload::Json(bytes) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                builder = builder.header(CONTENT_TYPE, "application/json").body(bytes.clone());
                Some(bytes)
            }
            Payload::Bytes(bytes) => {
                headers.push(("Content-Type".to_string(), "application/octet-stream".to_string()));
                builder = builder
                    .header(CONTENT_TYPE, "application/octet-stream")
                    .body(bytes.clone());
                Some(bytes)
            }
        };
        let request = RequestSnapshot {
            method: method.to_string(),
            url: url.to_string(),
            headers,
            body,
        };

        let response = builder.send()?;
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();
        let response_headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(key, value)| {
                (
                    key.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(cookie_name)
            .map(str::to_string)
            .collect();
        let body = response.bytes()?.to_vec();

        Ok(Exchange {
            request,
            response: ResponseSnapshot {
                status: status.as_u16(),
                reason,
                headers: response_headers,
                body,
                cookies,
            },
        })
    }
}

/// Extracts the cookie name from a `Set-Cookie` header value.
fn cookie_name(value: &str) -> Option<&str> {
    let pair = value.split(';').next()?;
    let name = pair.split('=').next()?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_name_takes_text_before_equals() {
        assert_eq!(cookie_name("scc-session=abc123; Path=/"), Some("scc-session"));
        assert_eq!(cookie_name("plain=v"), Some("plain"));
        assert_eq!(cookie_name("=nameless"), None);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let response = ResponseSnapshot {
            status: 200,
            reason: "OK".to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Vec::new(),
            cookies: Vec::new(),
        };
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn text_decodes_body_lossily() {
        let response = ResponseSnapshot {
            status: 200,
            reason: "OK".to_string(),
            headers: Vec::new(),
            body: b"hello".to_vec(),
            cookies: Vec::new(),
        };
        assert_eq!(response.text(), "hello");
    }
}
