//! Candidate filter.
//!
//! Cheap substring checks run before any extractor so that only messages
//! that look like billing mail get the full treatment.

use std::sync::LazyLock;

use regex::Regex;

/// A currency symbol, or a number next to a three-letter currency code.
#[allow(clippy::expect_used)]
static CURRENCY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[$€£₦]|[0-9]\s?(?:usd|ngn|eur|gbp)\b|\b(?:usd|ngn|eur|gbp)\s?[0-9]")
        .expect("currency token regex is valid")
});

/// Returns true if the text carries a currency-like token.
#[must_use]
pub fn has_currency_token(text: &str) -> bool {
    CURRENCY_TOKEN.is_match(text)
}

/// Outcome of running a message through the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVerdict {
    /// All three signals present.
    Accepted,
    /// No known brand mentioned.
    NoBrand,
    /// No billing-intent keyword.
    NoIntent,
    /// No currency symbol or code next to a number.
    NoCurrency,
}

impl FilterVerdict {
    /// Whether the message passed.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Short reason, used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::NoBrand => "no_brand",
            Self::NoIntent => "no_intent",
            Self::NoCurrency => "no_currency",
        }
    }
}

/// Gate requiring a brand, an intent keyword and a currency token.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    brands: Vec<String>,
    keywords: Vec<String>,
}

impl CandidateFilter {
    /// Creates a filter. Entries are lower-cased; blank entries are dropped.
    pub fn new<B, K>(brands: B, keywords: K) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        Self {
            brands: lowered(brands),
            keywords: lowered(keywords),
        }
    }

    /// Checks the three signals in order: brand, intent, currency.
    #[must_use]
    pub fn evaluate(&self, text: &str) -> FilterVerdict {
        let lower = text.to_lowercase();

        if !self.brands.iter().any(|b| lower.contains(b.as_str())) {
            FilterVerdict::NoBrand
        } else if !self.keywords.iter().any(|k| lower.contains(k.as_str())) {
            FilterVerdict::NoIntent
        } else if !has_currency_token(&lower) {
            FilterVerdict::NoCurrency
        } else {
            FilterVerdict::Accepted
        }
    }

    /// Shorthand for `evaluate(text).is_accepted()`.
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        self.evaluate(text).is_accepted()
    }
}

fn lowered<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
