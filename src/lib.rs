//! recon: black-box contract tests for the SCC auction REST service.
//!
//! The crate is organized around four pieces:
//! - request shapes and their single-field invalidators ([`requests`], [`invalidator`]),
//! - a [`validator`] bound to exactly one HTTP exchange,
//! - a [`registry`] that turns declarations into runnable test cases,
//! - a sequential [`runner`] that reports one colorized line per case and a
//!   full request/response transcript on failure.

pub mod cases;
pub mod cli;
pub mod clients;
pub mod endpoints;
pub mod fake;
pub mod invalidator;
pub mod registry;
pub mod requests;
pub mod responses;
pub mod runner;
pub mod transport;
pub mod validator;

pub use invalidator::{Corruption, InvalidRequest, Invalidator};
pub use registry::{Failure, Registry, TestCase};
pub use transport::{Exchange, RequestSnapshot, ResponseSnapshot, Session, TransportError};
pub use validator::{parse_json, validate, AssertionFailure, Validator};

/// Name of the session cookie the backend issues on authentication.
///
/// Shared between the client (to confirm a login took) and test assertions.
pub const AUTH_COOKIE: &str = "scc-session";
