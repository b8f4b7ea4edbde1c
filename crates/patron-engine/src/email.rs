//! Email syntax and domain-reachability validation.
//!
//! Syntax is checked first with a conservative grammar; only a
//! syntactically valid address incurs a lookup. Reachability answers
//! are memoized per pass in a [`DomainCache`] that is discarded when
//! the pass completes, so no stale answer outlives one invocation.
//! The validator judges addresses, it never rewrites them.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use patron_model::CellValue;

use crate::error::Result;
use crate::lookup::{LookupError, LookupFailurePolicy, MxLookup};
use crate::outcome::{InvalidReason, Outcome};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("email regex compiles")
});

/// A well-known domain that is never worth a network round trip.
const ALWAYS_REACHABLE: &str = "gmail.com";

/// Per-pass memo of lowercased domain -> reachable. Each domain is
/// looked up at most once per pass, whatever the answer's source.
#[derive(Debug, Default)]
pub struct DomainCache {
    entries: HashMap<String, bool>,
}

impl DomainCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(
        &mut self,
        domain: &str,
        lookup: &mut dyn MxLookup,
        policy: LookupFailurePolicy,
    ) -> Result<bool> {
        if domain == ALWAYS_REACHABLE {
            self.entries.insert(domain.to_string(), true);
        }
        if let Some(reachable) = self.entries.get(domain) {
            return Ok(*reachable);
        }
        let reachable = match lookup.has_mx(domain) {
            Ok(reachable) => reachable,
            Err(error) => fallback_for_failure(domain, &error, policy)?,
        };
        self.entries.insert(domain.to_string(), reachable);
        Ok(reachable)
    }
}

/// Apply the fail-open/fail-closed policy to a lookup failure.
fn fallback_for_failure(
    domain: &str,
    error: &LookupError,
    policy: LookupFailurePolicy,
) -> Result<bool> {
    match policy {
        LookupFailurePolicy::AssumeValid => {
            warn!(domain, %error, "MX lookup failed; assuming domain is reachable");
            Ok(true)
        }
        LookupFailurePolicy::AssumeInvalid => {
            warn!(domain, %error, "MX lookup failed; treating domain as unreachable");
            Ok(false)
        }
        LookupFailurePolicy::Reject => Err(LookupError::Transport(error.to_string()).into()),
    }
}

/// Validate one cell. Non-text and empty cells are skipped.
pub fn check_email(
    value: &CellValue,
    cache: &mut DomainCache,
    lookup: &mut dyn MxLookup,
    policy: LookupFailurePolicy,
) -> Result<Outcome> {
    let CellValue::Text(raw) = value else {
        return Ok(Outcome::Unchanged);
    };
    let email = raw.trim();
    if email.is_empty() {
        return Ok(Outcome::Unchanged);
    }
    if !EMAIL_RE.is_match(email) {
        return Ok(Outcome::Invalid(InvalidReason::EmailSyntax));
    }

    let Some(at) = email.rfind('@') else {
        return Ok(Outcome::Invalid(InvalidReason::EmailSyntax));
    };
    let domain = email[at + 1..].to_lowercase();
    if cache.resolve(&domain, lookup, policy)? {
        Ok(Outcome::Unchanged)
    } else {
        Ok(Outcome::Invalid(InvalidReason::EmailDomainUnreachable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::StaticLookup;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn check(
        value: &CellValue,
        cache: &mut DomainCache,
        lookup: &mut StaticLookup,
    ) -> Outcome {
        check_email(value, cache, lookup, LookupFailurePolicy::AssumeValid).expect("no reject")
    }

    #[test]
    fn bad_syntax_never_touches_the_network() {
        let mut cache = DomainCache::new();
        let mut lookup = StaticLookup::new([]);
        assert_eq!(
            check(&text("not-an-email"), &mut cache, &mut lookup),
            Outcome::Invalid(InvalidReason::EmailSyntax)
        );
        assert_eq!(
            check(&text("a@b.c"), &mut cache, &mut lookup),
            Outcome::Invalid(InvalidReason::EmailSyntax)
        );
        assert!(lookup.queries.is_empty());
    }

    #[test]
    fn well_known_domain_skips_the_lookup() {
        let mut cache = DomainCache::new();
        let mut lookup = StaticLookup::new([]);
        assert_eq!(
            check(&text("user@gmail.com"), &mut cache, &mut lookup),
            Outcome::Unchanged
        );
        assert!(lookup.queries.is_empty());
    }

    #[test]
    fn domain_is_looked_up_at_most_once_per_pass() {
        let mut cache = DomainCache::new();
        let mut lookup = StaticLookup::new(["example.org"]);
        for address in ["a@example.org", "b@EXAMPLE.org", "c@nowhere.invalid"] {
            check(&text(address), &mut cache, &mut lookup);
        }
        check(&text("d@nowhere.invalid"), &mut cache, &mut lookup);
        assert_eq!(lookup.queries, vec!["example.org", "nowhere.invalid"]);
    }

    #[test]
    fn unreachable_domain_is_invalid_reachable_is_untouched() {
        let mut cache = DomainCache::new();
        let mut lookup = StaticLookup::new(["example.org"]);
        assert_eq!(
            check(&text("a@example.org"), &mut cache, &mut lookup),
            Outcome::Unchanged
        );
        assert_eq!(
            check(&text("a@gone.example"), &mut cache, &mut lookup),
            Outcome::Invalid(InvalidReason::EmailDomainUnreachable)
        );
    }

    #[test]
    fn lookup_failure_follows_policy() {
        let mut lookup = StaticLookup::new([]).with_failing(["flaky.example"]);
        let value = text("a@flaky.example");

        let mut cache = DomainCache::new();
        assert_eq!(
            check_email(&value, &mut cache, &mut lookup, LookupFailurePolicy::AssumeValid)
                .expect("fail open"),
            Outcome::Unchanged
        );

        let mut cache = DomainCache::new();
        assert_eq!(
            check_email(&value, &mut cache, &mut lookup, LookupFailurePolicy::AssumeInvalid)
                .expect("fail closed"),
            Outcome::Invalid(InvalidReason::EmailDomainUnreachable)
        );

        let mut cache = DomainCache::new();
        assert!(
            check_email(&value, &mut cache, &mut lookup, LookupFailurePolicy::Reject).is_err()
        );
    }

    #[test]
    fn failure_fallbacks_are_cached_too() {
        let mut cache = DomainCache::new();
        let mut lookup = StaticLookup::new([]).with_failing(["flaky.example"]);
        for _ in 0..3 {
            check(&text("a@flaky.example"), &mut cache, &mut lookup);
        }
        assert_eq!(lookup.queries.len(), 1);
    }
}
