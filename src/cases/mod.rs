//! Per-entity test case declarations.
//!
//! These are the arrange-act-assert bodies built atop the core. Each module
//! contributes its cases to an explicit registry passed in by the entrypoint;
//! nothing registers itself behind the caller's back.

pub mod auction;
pub mod bid;
pub mod media;
pub mod question;
pub mod user;

use crate::registry::Registry;

/// Registers every suite, in declaration order.
pub fn register_all(registry: &mut Registry) {
    user::register(registry);
    media::register(registry);
    auction::register(registry);
    bid::register(registry);
    question::register(registry);
}
