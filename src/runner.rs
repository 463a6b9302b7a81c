//! Sequential test execution and reporting.
//!
//! Cases run strictly in order, one colorized status line each. A failure
//! prints the full request/response transcript; by default the run then
//! stops, unless the ignore-errors policy says to keep going. Cases whose
//! name does not match the filter are skipped without leaving any record.

use std::io::Write;

use regex::Regex;
use serde_json::Value;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::registry::{Failure, TestCase};
use crate::transport::Exchange;

/// A serialized JSON field larger than this is elided from the transcript.
const FIELD_ELISION_LIMIT: usize = 1024;
/// Non-JSON bodies larger than this are not printed at all.
const RAW_BODY_LIMIT: usize = 4096 * 10;

/// Runner configuration, built by the entrypoint.
pub struct RunConfig {
    /// Prefix-anchored pattern; `None` runs every realized case.
    pub filter: Option<Regex>,
    /// Keep running after a failure instead of stopping at the first one.
    pub ignore_errors: bool,
    pub color: ColorChoice,
}

impl Default for RunConfig {
    fn default() -> Self {
        let color = if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self { filter: None, ignore_errors: false, color }
    }
}

/// Compiles a filter pattern, anchored at the start of the case name.
pub fn compile_filter(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})"))
}

/// Terminal states of one executed case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    AssertionFailed,
    Errored,
}

/// Aggregate result of one run.
#[derive(Debug, Default, Clone)]
pub struct Summary {
    pub executed: usize,
    pub passed: usize,
    pub assertion_failures: usize,
    pub errors: usize,
    pub stopped_early: bool,
}

impl Summary {
    pub fn failed(&self) -> usize {
        self.assertion_failures + self.errors
    }

    fn record(&mut self, outcome: Outcome) {
        self.executed += 1;
        match outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::AssertionFailed => self.assertion_failures += 1,
            Outcome::Errored => self.errors += 1,
        }
    }
}

/// Executes the realized case list in order and reports each case.
pub fn run(cases: Vec<TestCase>, config: &RunConfig) -> Summary {
    let mut out = StandardStream::stdout(config.color);
    let mut summary = Summary::default();

    for case in cases {
        if let Some(filter) = &config.filter {
            if !filter.is_match(case.name()) {
                continue;
            }
        }
        let name = case.name().to_string();
        match case.run() {
            Ok(()) => {
                summary.record(Outcome::Passed);
                print_status(&mut out, "OK", Color::Green, &name);
            }
            Err(failure) => {
                let outcome = match &failure {
                    Failure::Assertion(_) => Outcome::AssertionFailed,
                    Failure::Error { .. } => Outcome::Errored,
                };
                summary.record(outcome);
                print_status(&mut out, "FAIL", Color::Red, &name);
                print_failure(&failure);
                if !config.ignore_errors {
                    summary.stopped_early = true;
                    break;
                }
            }
        }
    }

    println!(
        "\n{} executed, {} passed, {} failed{}",
        summary.executed,
        summary.passed,
        summary.failed(),
        if summary.stopped_early { " (stopped at first failure)" } else { "" },
    );
    summary
}

fn print_status(out: &mut StandardStream, tag: &str, color: Color, name: &str) {
    let _ = write!(out, "[");
    let _ = out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(out, "{tag}");
    let _ = out.reset();
    let _ = writeln!(out, "] {name}");
    let _ = out.flush();
}

fn print_failure(failure: &Failure) {
    match failure {
        Failure::Assertion(assertion) => {
            println!("{}", assertion.message);
            print_exchange(&assertion.exchange);
        }
        Failure::Error { message, context } => {
            if let Some(exchange) = context {
                print_exchange(exchange);
            }
            println!("{message}");
        }
    }
}

/// Full request/response transcript for a failed case.
fn print_exchange(exchange: &Exchange) {
    println!("-------------------- Request --------------------");
    println!("{} {}", exchange.request.method, exchange.request.url);
    for (key, value) in &exchange.request.headers {
        println!("{key}: {value}");
    }
    if let Some(body) = &exchange.request.body {
        println!("{}", render_body(body));
    }
    println!("-------------------- Response --------------------");
    println!("{} {}", exchange.response.status, exchange.response.reason);
    for (key, value) in &exchange.response.headers {
        println!("{key}: {value}");
    }
    println!("{}", exchange.response.text());
    println!("-------------------------------------------------");
}

/// Pretty-prints a JSON body with oversized fields elided; falls back to
/// raw (possibly suppressed) text for non-JSON payloads.
fn render_body(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(mut map)) => {
            for (_, value) in map.iter_mut() {
                let oversized = serde_json::to_string(value)
                    .map(|s| s.len() > FIELD_ELISION_LIMIT)
                    .unwrap_or(false);
                if oversized {
                    *value = Value::String("...".to_string());
                }
            }
            serde_json::to_string_pretty(&Value::Object(map))
                .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned())
        }
        Ok(other) => serde_json::to_string_pretty(&other)
            .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned()),
        Err(_) => {
            if body.len() > RAW_BODY_LIMIT {
                format!("Body too large to print ({} bytes)", body.len())
            } else {
                String::from_utf8_lossy(body).into_owned()
            }
        }
    }
}
