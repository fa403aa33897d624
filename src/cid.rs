//! Content-ID generation for inline images.
//!
//! Identifiers look like `9f1c0b3e6d7a4f1e8b2a5c4d3e2f1a0b@img`: a random
//! v4 UUID in simple form, an `@`, and a configurable domain.

use uuid::Uuid;

/// Default right-hand side of generated Content-IDs.
pub const DEFAULT_DOMAIN: &str = "img";

/// Hands out Content-IDs that are unique within a run.
#[derive(Debug, Clone)]
pub struct ContentIdGenerator {
    domain: String,
}

impl ContentIdGenerator {
    /// Create a generator for the given domain. An empty domain falls back
    /// to [`DEFAULT_DOMAIN`].
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        let domain = if domain.trim().is_empty() {
            DEFAULT_DOMAIN.to_string()
        } else {
            domain.trim().to_string()
        };
        Self { domain }
    }

    /// Produce a fresh Content-ID (without angle brackets).
    pub fn next_id(&mut self) -> String {
        format!("{}@{}", Uuid::new_v4().simple(), self.domain)
    }
}

impl Default for ContentIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAIN)
    }
}
