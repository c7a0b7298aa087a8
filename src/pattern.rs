//! Host pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile operator-supplied host specs into label-matcher sequences
//! - Match candidate hosts label-by-label, anchored at both ends
//!
//! # Design Decisions
//! - No regex: literal labels compare with `==`, so a `*` inside a longer
//!   label, `?`, `(` etc. are literal by construction
//! - A wildcard label covers one or more non-empty labels
//!   (`*.example.com` matches `a.b.example.com`, never `example.com`)
//! - Compilation never fails; an unmatchable spec simply never matches

/// A single compiled label matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Label {
    /// Matches exactly this text (case-sensitive).
    Literal(String),
    /// Matches one or more consecutive non-empty labels.
    Wildcard,
}

/// A compiled host pattern: an anchored sequence of label matchers.
///
/// Immutable once compiled. A candidate matches only when its full label
/// sequence is covered start-to-end, with no extra leading or trailing
/// labels and no mid-string matches.
#[derive(Debug, Clone)]
pub struct HostPattern {
    source: String,
    labels: Vec<Label>,
}

impl HostPattern {
    /// Compile a host spec into a pattern.
    ///
    /// Exactly one trailing `.` is stripped (FQDN-style specs). The spec is
    /// then split on `.`; a label that is exactly `*` becomes a wildcard,
    /// every other label is matched literally. Compilation never fails: a
    /// malformed spec (empty string, leading dot, a full URL) produces a
    /// pattern that matches no realistic host.
    pub fn compile(spec: &str) -> Self {
        let normalized = spec.strip_suffix('.').unwrap_or(spec);
        let labels = normalized
            .split('.')
            .map(|label| {
                if label == "*" {
                    Label::Wildcard
                } else {
                    Label::Literal(label.to_string())
                }
            })
            .collect();
        Self {
            source: normalized.to_string(),
            labels,
        }
    }

    /// The normalized spec text this pattern was compiled from.
    ///
    /// Used by the gate to deduplicate registrations: `"example.com"` and
    /// `"example.com."` normalize to the same source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether `host` matches this pattern in full.
    pub fn matches(&self, host: &str) -> bool {
        let candidate: Vec<&str> = host.split('.').collect();
        match_labels(&self.labels, &candidate)
    }
}

/// Anchored label-by-label comparison. A wildcard consumes one or more
/// candidate labels, each non-empty, backtracking over the amount consumed.
fn match_labels(pattern: &[Label], candidate: &[&str]) -> bool {
    match pattern.split_first() {
        None => candidate.is_empty(),
        Some((Label::Literal(expected), rest)) => candidate
            .split_first()
            .map(|(label, remaining)| *label == expected.as_str() && match_labels(rest, remaining))
            .unwrap_or(false),
        Some((Label::Wildcard, rest)) => {
            for consumed in 1..=candidate.len() {
                if candidate[consumed - 1].is_empty() {
                    break;
                }
                if match_labels(rest, &candidate[consumed..]) {
                    return true;
                }
            }
            false
        }
    }
}
