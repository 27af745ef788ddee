//! First-seen deduplication of candidates.

use std::collections::HashSet;

use tracing::trace;

use crate::candidate::SubscriptionCandidate;

/// Collapses candidates sharing a `(provider, product)` key.
///
/// The first candidate pushed for a key is kept and later ones are dropped,
/// even when they carry more complete data. Output keeps insertion order.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    seen: HashSet<String>,
    candidates: Vec<SubscriptionCandidate>,
    duplicates: usize,
}

impl Aggregator {
    /// Creates an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a candidate. Returns false if its key was already present.
    pub fn push(&mut self, candidate: SubscriptionCandidate) -> bool {
        let key = candidate.dedup_key();
        if self.seen.contains(&key) {
            trace!(%key, message = %candidate.evidence.source_message_id, "Dropping duplicate");
            self.duplicates += 1;
            return false;
        }
        self.seen.insert(key);
        self.candidates.push(candidate);
        true
    }

    /// Number of distinct candidates kept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if nothing has been kept yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of candidates dropped as duplicates.
    #[must_use]
    pub const fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Kept candidates in insertion order.
    #[must_use]
    pub fn into_candidates(self) -> Vec<SubscriptionCandidate> {
        self.candidates
    }
}

impl Extend<SubscriptionCandidate> for Aggregator {
    fn extend<I: IntoIterator<Item = SubscriptionCandidate>>(&mut self, iter: I) {
        for candidate in iter {
            self.push(candidate);
        }
    }
}

impl FromIterator<SubscriptionCandidate> for Aggregator {
    fn from_iter<I: IntoIterator<Item = SubscriptionCandidate>>(iter: I) -> Self {
        let mut aggregator = Self::new();
        aggregator.extend(iter);
        aggregator
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::candidate::{Currency, Evidence, Price};

    fn candidate(
        id: &str,
        provider: &str,
        product: Option<&str>,
        amount: f64,
    ) -> SubscriptionCandidate {
        SubscriptionCandidate {
            provider: provider.to_string(),
            product: product.map(ToString::to_string),
            price: Some(Price {
                amount,
                currency: Currency::Usd,
            }),
            billing: None,
            evidence: Evidence {
                source_message_id: id.to_string(),
                raw_text: String::new(),
            },
        }
    }

    #[test]
    fn test_first_seen_wins() {
        let mut agg = Aggregator::new();
        assert!(agg.push(candidate("m1", "spotify", Some("Premium"), 9.99)));
        assert!(!agg.push(candidate("m2", "spotify", Some("Premium"), 10.99)));
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.duplicates(), 1);

        let out = agg.into_candidates();
        assert_eq!(out[0].evidence.source_message_id, "m1");
        assert_eq!(out[0].amount(), Some(9.99));
    }

    #[test]
    fn test_keeps_insertion_order() {
        let agg: Aggregator = [
            candidate("m1", "netflix", None, 1.0),
            candidate("m2", "apple", Some("One"), 2.0),
            candidate("m3", "netflix", Some("Basic"), 3.0),
            candidate("m4", "apple", Some("One"), 4.0),
        ]
        .into_iter()
        .collect();

        let ids: Vec<_> = agg
            .into_candidates()
            .into_iter()
            .map(|c| c.evidence.source_message_id)
            .collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_missing_product_shares_unknown_key() {
        let mut agg = Aggregator::new();
        assert!(agg.push(candidate("m1", "openai", None, 20.0)));
        assert!(!agg.push(candidate("m2", "openai", Some("unknown"), 20.0)));
        assert!(agg.push(candidate("m3", "unknown", None, 20.0)));
    }

    #[test]
    fn test_empty() {
        let agg = Aggregator::new();
        assert!(agg.is_empty());
        assert!(agg.into_candidates().is_empty());
    }
}
