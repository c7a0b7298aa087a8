//! The host gate: ordered pattern set and request-host evaluation.
//!
//! # Design Decisions
//! - Pattern set behind an `ArcSwap` snapshot: registration swaps in a new
//!   set, request-time evaluation loads the current one. Both sides are
//!   lock-free, matching the read-mostly usage (configure once, serve many)
//! - Fail closed: an absent or empty host never passes
//! - Existential check: any matching pattern admits the host, order only
//!   affects short-circuiting

use arc_swap::ArcSwap;

use crate::pattern::HostPattern;

/// Gate holding the compiled allow-list.
///
/// Patterns are kept in insertion order and deduplicated by the normalized
/// spec text they were compiled from, so registering `"example.com"` and
/// `"example.com."` stores a single pattern.
#[derive(Debug)]
pub struct HostGate {
    patterns: ArcSwap<Vec<HostPattern>>,
}

impl HostGate {
    /// Create a gate with an empty allow-list. Until specs are registered,
    /// every request is rejected.
    pub fn new() -> Self {
        Self {
            patterns: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Register a single host spec.
    ///
    /// Idempotent: a spec that normalizes to already-registered text is
    /// ignored. Safe to call while requests are being evaluated.
    pub fn allow(&self, spec: &str) {
        let pattern = HostPattern::compile(spec);
        tracing::debug!(spec = %pattern.source(), "registering host spec");
        self.patterns.rcu(|current| {
            let mut next = (**current).clone();
            if !next.iter().any(|p| p.source() == pattern.source()) {
                next.push(pattern.clone());
            }
            next
        });
    }

    /// Register every spec in order. Equivalent to calling [`allow`] once
    /// per element; duplicates are still dropped.
    ///
    /// [`allow`]: HostGate::allow
    pub fn allow_many<I, S>(&self, specs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for spec in specs {
            self.allow(spec.as_ref());
        }
    }

    /// Whether `host` matches any registered pattern.
    ///
    /// An absent or empty host never matches, regardless of what is
    /// registered.
    pub fn is_allowed(&self, host: Option<&str>) -> bool {
        let Some(host) = host else {
            return false;
        };
        if host.is_empty() {
            return false;
        }
        self.patterns.load().iter().any(|p| p.matches(host))
    }

    /// Evaluate the candidate hosts derived from a request.
    ///
    /// The host-header value comes first, then the server name; duplicates
    /// are dropped. Every remaining candidate must pass [`is_allowed`], and
    /// an absent candidate never passes, so a request carrying no host
    /// information at all is rejected.
    ///
    /// [`is_allowed`]: HostGate::is_allowed
    pub fn check(&self, host_header: Option<&str>, server_name: Option<&str>) -> bool {
        let mut candidates = vec![host_header];
        if server_name != host_header {
            candidates.push(server_name);
        }
        candidates.into_iter().all(|c| self.is_allowed(c))
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.patterns.load().len()
    }

    /// Whether no patterns are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HostGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let gate = HostGate::new();
        assert!(gate.is_empty());
        assert_eq!(gate.len(), 0);
    }

    #[test]
    fn test_registered_host_is_allowed() {
        let gate = HostGate::new();
        gate.allow("example.com");
        assert!(gate.is_allowed(Some("example.com")));
        assert!(!gate.is_allowed(Some("example.comx")));
    }

    #[test]
    fn test_unregistered_host_is_not_allowed() {
        let gate = HostGate::new();
        assert!(!gate.is_allowed(Some("example.com")));
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let gate = HostGate::new();
        gate.allow("example.com");
        gate.allow("example.com");
        assert_eq!(gate.len(), 1);
    }

    #[test]
    fn test_trailing_dot_spec_deduplicates() {
        let gate = HostGate::new();
        gate.allow("example.com");
        gate.allow("example.com.");
        assert_eq!(gate.len(), 1);
        assert!(gate.is_allowed(Some("example.com")));
    }

    #[test]
    fn test_allow_many_preserves_order_and_dedups() {
        let gate = HostGate::new();
        gate.allow_many(["*.example.com", "example.com", "example.com"]);
        assert_eq!(gate.len(), 2);
        assert!(gate.is_allowed(Some("www.example.com")));
        assert!(gate.is_allowed(Some("example.com")));
    }

    #[test]
    fn test_any_pattern_suffices() {
        let gate = HostGate::new();
        gate.allow_many(["other.org", "example.com"]);
        assert!(gate.is_allowed(Some("example.com")));
    }

    #[test]
    fn test_absent_host_is_never_allowed() {
        let gate = HostGate::new();
        gate.allow("example.com");
        assert!(!gate.is_allowed(None));
        assert!(!gate.is_allowed(Some("")));
    }

    #[test]
    fn test_empty_spec_matches_no_host() {
        let gate = HostGate::new();
        gate.allow("");
        assert!(!gate.is_allowed(Some("example.com")));
        assert!(!gate.is_allowed(Some("")));
    }

    #[test]
    fn test_check_requires_both_candidates() {
        let gate = HostGate::new();
        gate.allow("example.com");
        assert!(gate.check(Some("example.com"), Some("example.com")));
        assert!(!gate.check(Some("example.com"), None));
        assert!(!gate.check(None, Some("example.com")));
        assert!(!gate.check(None, None));
        assert!(!gate.check(Some("someother.com"), Some("example.com")));
    }

    #[test]
    fn test_check_dedups_candidates() {
        // Equal candidates collapse to one check; distinct candidates must
        // each pass on their own.
        let gate = HostGate::new();
        gate.allow_many(["example.com", "www.example.com"]);
        assert!(gate.check(Some("www.example.com"), Some("example.com")));
        assert!(!gate.check(Some("www.example.com"), Some("other.com")));
    }
}
