//! Assertion primitives over exactly one HTTP exchange.
//!
//! A [`Validator`] is bound to a single [`Exchange`] for the lifetime of one
//! assertion block and is never reused across requests. Every failed
//! expectation produces a structured [`AssertionFailure`] carrying a snapshot
//! of the offending exchange; nothing is ever silently swallowed.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::registry::Failure;
use crate::transport::Exchange;

/// An expectation about a response was not met.
#[derive(Debug, Clone)]
pub struct AssertionFailure {
    pub exchange: Exchange,
    pub message: String,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AssertionFailure {}

/// Expected status: an exact code or any member of a set.
#[derive(Debug, Clone)]
pub enum StatusExpectation {
    Exact(u16),
    OneOf(Vec<u16>),
}

impl From<u16> for StatusExpectation {
    fn from(code: u16) -> Self {
        StatusExpectation::Exact(code)
    }
}

impl From<Vec<u16>> for StatusExpectation {
    fn from(codes: Vec<u16>) -> Self {
        StatusExpectation::OneOf(codes)
    }
}

impl<const N: usize> From<[u16; N]> for StatusExpectation {
    fn from(codes: [u16; N]) -> Self {
        StatusExpectation::OneOf(codes.to_vec())
    }
}

impl fmt::Display for StatusExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusExpectation::Exact(code) => write!(f, "{code}"),
            StatusExpectation::OneOf(codes) => write!(f, "{codes:?}"),
        }
    }
}

/// Scoped assertion helper over one exchange.
pub struct Validator<'a> {
    exchange: &'a Exchange,
}

/// Opens an assertion block over the given exchange.
pub fn validate(exchange: &Exchange) -> Validator<'_> {
    Validator { exchange }
}

impl<'a> Validator<'a> {
    fn failure(&self, message: String) -> AssertionFailure {
        AssertionFailure { exchange: self.exchange.clone(), message }
    }

    /// Exact match for a scalar expectation, membership for a set.
    pub fn status_code(&self, expected: impl Into<StatusExpectation>) -> Result<(), AssertionFailure> {
        let expected = expected.into();
        let actual = self.exchange.response.status;
        let matched = match &expected {
            StatusExpectation::Exact(code) => actual == *code,
            StatusExpectation::OneOf(codes) => codes.contains(&actual),
        };
        if matched {
            Ok(())
        } else {
            Err(self.failure(format!("Expected status code {expected}, got {actual}")))
        }
    }

    pub fn status_code_success(&self) -> Result<(), AssertionFailure> {
        let actual = self.exchange.response.status;
        if (200..300).contains(&actual) {
            Ok(())
        } else {
            Err(self.failure(format!(
                "Expected status code in range 200-299, got {actual}"
            )))
        }
    }

    pub fn status_code_failure(&self) -> Result<(), AssertionFailure> {
        let actual = self.exchange.response.status;
        if (400..500).contains(&actual) {
            Ok(())
        } else {
            Err(self.failure(format!(
                "Expected status code in range 400-499, got {actual}"
            )))
        }
    }

    pub fn content_type(&self, expected: &str) -> Result<(), AssertionFailure> {
        let actual = self.exchange.response.header("Content-Type");
        if actual == Some(expected) {
            Ok(())
        } else {
            Err(self.failure(format!(
                "Expected content type {expected}, got {}",
                actual.unwrap_or("<none>")
            )))
        }
    }

    pub fn content(&self, expected: &[u8]) -> Result<(), AssertionFailure> {
        if self.exchange.response.body == expected {
            Ok(())
        } else {
            Err(self.failure(format!(
                "Expected content {:?}, got {:?}",
                String::from_utf8_lossy(expected),
                self.exchange.response.text()
            )))
        }
    }

    pub fn cookie_exists(&self, name: &str) -> Result<(), AssertionFailure> {
        if self.exchange.response.cookies.iter().any(|c| c == name) {
            Ok(())
        } else {
            Err(self.failure(format!("Expected cookie {name} to exist")))
        }
    }

    pub fn equals<V: PartialEq + fmt::Debug>(
        &self,
        actual: V,
        expected: V,
        message: &str,
    ) -> Result<(), AssertionFailure> {
        if actual == expected {
            Ok(())
        } else {
            Err(self.failure(format!("Expected {expected:?}, got {actual:?}. {message}")))
        }
    }

    pub fn not_equals<V: PartialEq + fmt::Debug>(
        &self,
        actual: V,
        expected: V,
        message: &str,
    ) -> Result<(), AssertionFailure> {
        if actual != expected {
            Ok(())
        } else {
            Err(self.failure(format!(
                "Expected {expected:?} to not equal {actual:?}. {message}"
            )))
        }
    }

    /// Unconditional failure.
    pub fn fail(&self, message: &str) -> Result<(), AssertionFailure> {
        Err(self.failure(format!("Failed: {message}")))
    }
}

/// Decodes a JSON response body, attributing decode errors to the exchange so
/// the runner can still print a transcript.
pub fn parse_json<T: DeserializeOwned>(exchange: &Exchange) -> Result<T, Failure> {
    serde_json::from_slice(&exchange.response.body).map_err(|error| {
        Failure::error_with_context(
            format!("could not decode response body: {error}"),
            exchange.clone(),
        )
    })
}
