//! Single-field corruption strategies for probing input validation.
//!
//! An [`Invalidator`] pairs a field name with one tagged [`Corruption`] and a
//! pure transform that applies it to an otherwise-valid request instance.
//! Each strategy touches exactly one field and leaves all others valid.

use std::fmt;

/// The catalogue of corruption kinds a request field can be subjected to.
///
/// Null and empty apply to required string fields, negative and zero to
/// numeric fields that must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    NullField,
    EmptyField,
    NegativeNumber,
    ZeroNumber,
}

impl Corruption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Corruption::NullField => "null",
            Corruption::EmptyField => "empty",
            Corruption::NegativeNumber => "negative",
            Corruption::ZeroNumber => "zero",
        }
    }
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, single-field corruption strategy for request type `T`.
///
/// The transform is a plain function value: stateless, and trivially copied
/// into each generated test case so no case aliases another's strategy.
pub struct Invalidator<T> {
    pub field: &'static str,
    pub corruption: Corruption,
    apply: fn(T) -> T,
}

impl<T> Invalidator<T> {
    pub fn null(field: &'static str, apply: fn(T) -> T) -> Self {
        Self { field, corruption: Corruption::NullField, apply }
    }

    pub fn empty(field: &'static str, apply: fn(T) -> T) -> Self {
        Self { field, corruption: Corruption::EmptyField, apply }
    }

    pub fn negative(field: &'static str, apply: fn(T) -> T) -> Self {
        Self { field, corruption: Corruption::NegativeNumber, apply }
    }

    pub fn zero(field: &'static str, apply: fn(T) -> T) -> Self {
        Self { field, corruption: Corruption::ZeroNumber, apply }
    }

    /// Applies the corruption to a freshly generated valid instance.
    pub fn apply(&self, valid: T) -> T {
        (self.apply)(valid)
    }

    /// Human-readable identity, e.g. `pwd: empty`.
    pub fn description(&self) -> String {
        format!("{}: {}", self.field, self.corruption)
    }
}

// fn pointers are Copy regardless of T, so a derive's T: Copy bound would be
// too strict.
impl<T> Clone for Invalidator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Invalidator<T> {}

impl<T> fmt::Debug for Invalidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invalidator")
            .field("field", &self.field)
            .field("corruption", &self.corruption)
            .finish()
    }
}

/// One corrupted request instance paired with the reason it is invalid.
#[derive(Debug, Clone)]
pub struct InvalidRequest<T> {
    pub data: T,
    pub reason: String,
}

/// Applies each invalidator to its own fresh valid baseline.
pub fn invalid_requests<T>(
    invalidators: Vec<Invalidator<T>>,
    fresh: impl Fn() -> T,
) -> Vec<InvalidRequest<T>> {
    invalidators
        .into_iter()
        .map(|invalidator| InvalidRequest {
            data: invalidator.apply(fresh()),
            reason: invalidator.description(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Probe {
        left: Option<String>,
        right: Option<f64>,
    }

    fn valid() -> Probe {
        Probe { left: Some("ok".into()), right: Some(1.5) }
    }

    #[test]
    fn description_pairs_field_and_kind() {
        let inv = Invalidator::empty("left", |p: Probe| Probe { left: Some(String::new()), ..p });
        assert_eq!(inv.description(), "left: empty");
        let inv = Invalidator::zero("right", |p: Probe| Probe { right: Some(0.0), ..p });
        assert_eq!(inv.description(), "right: zero");
    }

    #[test]
    fn apply_touches_only_the_named_field() {
        let inv = Invalidator::null("left", |p: Probe| Probe { left: None, ..p });
        let corrupted = inv.apply(valid());
        assert_eq!(corrupted.left, None);
        assert_eq!(corrupted.right, valid().right);
    }

    #[test]
    fn invalid_requests_pairs_each_strategy_with_its_reason() {
        let invalidators = vec![
            Invalidator::null("left", |p: Probe| Probe { left: None, ..p }),
            Invalidator::negative("right", |p: Probe| Probe { right: Some(-1.0), ..p }),
        ];
        let requests = invalid_requests(invalidators, valid);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].reason, "left: null");
        assert_eq!(requests[0].data.left, None);
        assert_eq!(requests[1].reason, "right: negative");
        assert_eq!(requests[1].data.right, Some(-1.0));
    }
}
