//! External name-resolution lookup capability.

use std::collections::BTreeSet;

use thiserror::Error;

/// Answers "does this domain have at least one mail-routing record?".
/// Callable synchronously; transport failures are surfaced to the
/// engine, which applies the configured [`LookupFailurePolicy`].
pub trait MxLookup {
    fn has_mx(&mut self, domain: &str) -> std::result::Result<bool, LookupError>;
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup transport failure: {0}")]
    Transport(String),
    #[error("malformed lookup response: {0}")]
    Malformed(String),
}

/// What to do when the lookup itself fails (not when the domain is
/// known-unreachable). The default assumes valid so a transient
/// resolver outage cannot mass-invalidate correct addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupFailurePolicy {
    #[default]
    AssumeValid,
    AssumeInvalid,
    /// Abort the pass before any write.
    Reject,
}

/// Fixed-answer lookup for tests; records every queried domain so
/// tests can assert the memoization contract.
#[derive(Debug, Default)]
pub struct StaticLookup {
    reachable: BTreeSet<String>,
    failing: BTreeSet<String>,
    pub queries: Vec<String>,
}

impl StaticLookup {
    pub fn new(reachable: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            reachable: reachable.into_iter().map(str::to_string).collect(),
            failing: BTreeSet::new(),
            queries: Vec::new(),
        }
    }

    /// Make a domain fail with a transport error instead of answering.
    pub fn with_failing(mut self, domains: impl IntoIterator<Item = &'static str>) -> Self {
        self.failing = domains.into_iter().map(str::to_string).collect();
        self
    }
}

impl MxLookup for StaticLookup {
    fn has_mx(&mut self, domain: &str) -> std::result::Result<bool, LookupError> {
        self.queries.push(domain.to_string());
        if self.failing.contains(domain) {
            return Err(LookupError::Transport("connection refused".to_string()));
        }
        Ok(self.reachable.contains(domain))
    }
}
