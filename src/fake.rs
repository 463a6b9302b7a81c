//! Random but syntactically valid field values for request generation.

use chrono::{Duration, SecondsFormat, Utc};
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

const WORDS: &[&str] = &[
    "amber", "basalt", "cedar", "delta", "ember", "fjord", "garnet", "harbor",
    "iris", "juniper", "krona", "lumen", "meadow", "nectar", "onyx", "prism",
    "quartz", "raven", "sable", "tundra", "umber", "velvet", "willow", "zephyr",
];

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Clara", "Diego", "Elena", "Felix", "Greta", "Hugo",
    "Ines", "Jonas", "Karla", "Luis", "Marta", "Nuno", "Olga", "Pedro",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Brandt", "Costa", "Duarte", "Esteves", "Ferreira", "Gomes",
    "Hansen", "Ilves", "Jensen", "Keller", "Lopes", "Martins", "Nunes",
];

fn word() -> &'static str {
    let mut rng = thread_rng();
    WORDS.choose(&mut rng).copied().unwrap_or("word")
}

fn alphanumeric(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// A likely-unique login name such as `cedar_x8Kq2mZa`.
pub fn username() -> String {
    format!("{}_{}", word(), alphanumeric(8))
}

/// A plausible display name.
pub fn full_name() -> String {
    let mut rng = thread_rng();
    format!(
        "{} {}",
        FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Alice"),
        LAST_NAMES.choose(&mut rng).copied().unwrap_or("Almeida"),
    )
}

pub fn password() -> String {
    alphanumeric(16)
}

/// A short sentence of random words.
pub fn sentence() -> String {
    let mut rng = thread_rng();
    let count = rng.gen_range(4..9);
    let words: Vec<&str> = (0..count).map(|_| word()).collect();
    format!("{}.", words.join(" "))
}

pub fn paragraph() -> String {
    let mut rng = thread_rng();
    let count = rng.gen_range(2..5);
    (0..count).map(|_| sentence()).collect::<Vec<_>>().join(" ")
}

/// A positive price with at most two decimal places.
///
/// Whole cents survive a JSON round trip exactly, so echo assertions can
/// compare with plain equality.
pub fn price() -> f64 {
    let cents: i64 = thread_rng().gen_range(100..100_000);
    cents as f64 / 100.0
}

/// An RFC 3339 timestamp between one and thirty days in the future.
pub fn future_timestamp() -> String {
    let days = thread_rng().gen_range(1..30);
    (Utc::now() + Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// An RFC 3339 timestamp a few seconds in the past, for resources whose
/// deadline has already elapsed.
pub fn elapsed_timestamp() -> String {
    (Utc::now() - Duration::seconds(5)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Arbitrary binary content, e.g. for media uploads.
pub fn bytes(len: usize) -> Vec<u8> {
    let mut rng = thread_rng();
    (0..len).map(|_| rng.gen()).collect()
}
