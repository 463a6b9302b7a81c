//! Declaration-to-execution plumbing for test cases.
//!
//! A [`Registry`] is an explicit, ordered list of factories. It is populated
//! once during a single-threaded registration phase and read-only afterwards;
//! realizing it against a concrete [`Endpoints`] configuration yields the
//! same ordered case list every time. One declaration with invalidators
//! expands into one case per invalidator, each owning its own copy of the
//! strategy.

use std::rc::Rc;

use thiserror::Error;

use crate::endpoints::Endpoints;
use crate::invalidator::Invalidator;
use crate::transport::{Exchange, TransportError};
use crate::validator::AssertionFailure;

/// How one test case body ended, when it did not pass.
///
/// This is the explicit result type for case bodies: assertion failures carry
/// the exchange they judged, and any other error may carry the last exchange
/// the body completed so diagnostics can still show a transcript.
#[derive(Debug, Error)]
pub enum Failure {
    /// An expectation about a response was not met.
    #[error("{}", .0.message)]
    Assertion(AssertionFailure),
    /// Anything else that went wrong while the body ran.
    #[error("{message}")]
    Error {
        message: String,
        context: Option<Exchange>,
    },
}

impl Failure {
    pub fn error(message: impl Into<String>) -> Self {
        Failure::Error { message: message.into(), context: None }
    }

    pub fn error_with_context(message: impl Into<String>, exchange: Exchange) -> Self {
        Failure::Error { message: message.into(), context: Some(exchange) }
    }
}

impl From<AssertionFailure> for Failure {
    fn from(failure: AssertionFailure) -> Self {
        Failure::Assertion(failure)
    }
}

impl From<TransportError> for Failure {
    fn from(error: TransportError) -> Self {
        Failure::error(error.to_string())
    }
}

/// A named, zero-argument, runnable verification unit. Immutable once built.
pub struct TestCase {
    name: String,
    runnable: Box<dyn FnOnce() -> Result<(), Failure>>,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        runnable: impl FnOnce() -> Result<(), Failure> + 'static,
    ) -> Self {
        Self { name: name.into(), runnable: Box::new(runnable) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the case to completion. Consumes the case; a realized list is
    /// executed at most once.
    pub fn run(self) -> Result<(), Failure> {
        (self.runnable)()
    }
}

type Factory = Box<dyn Fn(&Endpoints) -> Vec<TestCase>>;

/// Ordered collection of test-case factories.
#[derive(Default)]
pub struct Registry {
    factories: Vec<Factory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a single test case.
    ///
    /// Colliding names are permitted; they only make filtering ambiguous.
    pub fn register<F>(&mut self, name: &str, body: F)
    where
        F: Fn(&Endpoints) -> Result<(), Failure> + 'static,
    {
        let name = name.to_string();
        let body = Rc::new(body);
        self.factories.push(Box::new(move |endpoints| {
            let endpoints = endpoints.clone();
            let body = Rc::clone(&body);
            vec![TestCase::new(name.clone(), move || body(&endpoints))]
        }));
    }

    /// Declares one test case per invalidator, named `"{name} {description}"`.
    ///
    /// Each generated case captures its invalidator by value copy, so no case
    /// can observe another case's strategy.
    pub fn register_invalid<T, F>(&mut self, name: &str, invalidators: Vec<Invalidator<T>>, body: F)
    where
        T: 'static,
        F: Fn(&Endpoints, Invalidator<T>) -> Result<(), Failure> + 'static,
    {
        let name = name.to_string();
        let body = Rc::new(body);
        self.factories.push(Box::new(move |endpoints| {
            invalidators
                .iter()
                .map(|invalidator| {
                    let invalidator = *invalidator;
                    let endpoints = endpoints.clone();
                    let body = Rc::clone(&body);
                    TestCase::new(format!("{} {}", name, invalidator.description()), move || {
                        body(&endpoints, invalidator)
                    })
                })
                .collect()
        }));
    }

    /// Realizes every factory against the configuration, in registration order.
    pub fn create_test_cases(&self, endpoints: &Endpoints) -> Vec<TestCase> {
        self.factories
            .iter()
            .flat_map(|factory| factory(endpoints))
            .collect()
    }
}
