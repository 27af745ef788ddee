//! Subscription candidate data model.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Assumed length of a billing cycle, in days.
///
/// Billing cadence is never inferred: every detected start date is projected
/// forward by this fixed monthly cycle.
pub const BILLING_CYCLE_DAYS: u64 = 30;

/// Currencies the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar, also the fallback when no marker is found.
    #[default]
    Usd,
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
    /// Nigerian naira.
    Ngn,
}

impl Currency {
    /// Parse from a three-letter ISO code (case-insensitive).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "usd" => Some(Self::Usd),
            "eur" => Some(Self::Eur),
            "gbp" => Some(Self::Gbp),
            "ngn" => Some(Self::Ngn),
            _ => None,
        }
    }

    /// Upper-case ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Ngn => "NGN",
        }
    }

    /// Currency symbol.
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Usd => '$',
            Self::Eur => '€',
            Self::Gbp => '£',
            Self::Ngn => '₦',
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary amount. Amount and currency only ever exist together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Parsed amount.
    pub amount: f64,
    /// Explicit or inferred currency.
    pub currency: Currency,
}

/// Start date and projected next charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// Date found in the message.
    pub start_date: NaiveDate,
    /// Projected next charge date.
    pub next_billing_date: NaiveDate,
}

impl BillingPeriod {
    /// Builds a period one billing cycle long starting at `start_date`.
    ///
    /// Returns `None` if the projected date is out of range.
    #[must_use]
    pub fn from_start(start_date: NaiveDate) -> Option<Self> {
        let next_billing_date = start_date.checked_add_days(Days::new(BILLING_CYCLE_DAYS))?;
        Some(Self {
            start_date,
            next_billing_date,
        })
    }
}

/// Provenance of a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Message the candidate was inferred from.
    pub source_message_id: String,
    /// Text the extractors ran on.
    pub raw_text: String,
}

/// An unconfirmed subscription record inferred from a single message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionCandidate {
    /// Provider name, or [`crate::UNKNOWN_PROVIDER`].
    pub provider: String,
    /// Plan label (first line, trimmed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Amount and currency.
    #[serde(flatten)]
    pub price: Option<Price>,
    /// Start and next billing dates.
    #[serde(flatten)]
    pub billing: Option<BillingPeriod>,
    /// Where this candidate came from.
    pub evidence: Evidence,
}

impl SubscriptionCandidate {
    /// Amount, if a price was found.
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        self.price.map(|p| p.amount)
    }

    /// Currency, if a price was found.
    #[must_use]
    pub fn currency(&self) -> Option<Currency> {
        self.price.map(|p| p.currency)
    }

    /// Start date, if one was found.
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.billing.map(|b| b.start_date)
    }

    /// Next billing date, if a start date was found.
    #[must_use]
    pub fn next_billing_date(&self) -> Option<NaiveDate> {
        self.billing.map(|b| b.next_billing_date)
    }

    /// Deduplication key: `provider::product`, with `unknown` for a missing product.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        format!(
            "{}::{}",
            self.provider,
            self.product.as_deref().unwrap_or("unknown")
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn candidate(product: Option<&str>) -> SubscriptionCandidate {
        SubscriptionCandidate {
            provider: "spotify".to_string(),
            product: product.map(ToString::to_string),
            price: Some(Price {
                amount: 10.99,
                currency: Currency::Eur,
            }),
            billing: BillingPeriod::from_start(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            evidence: Evidence {
                source_message_id: "m1".to_string(),
                raw_text: "text".to_string(),
            },
        }
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::from_code("usd"), Some(Currency::Usd));
        assert_eq!(Currency::from_code("NGN"), Some(Currency::Ngn));
        assert_eq!(Currency::from_code("Eur"), Some(Currency::Eur));
        assert_eq!(Currency::from_code("cad"), None);
        assert_eq!(Currency::Gbp.code(), "GBP");
        assert_eq!(Currency::Ngn.symbol(), '₦');
        assert_eq!(Currency::default(), Currency::Usd);
    }

    #[test]
    fn test_billing_period_adds_thirty_days() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let period = BillingPeriod::from_start(start).unwrap();
        assert_eq!(period.next_billing_date, NaiveDate::from_ymd_opt(2024, 4, 4).unwrap());

        // Crosses a leap day.
        let start = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let period = BillingPeriod::from_start(start).unwrap();
        assert_eq!(period.next_billing_date, NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    }

    #[test]
    fn test_billing_period_overflow() {
        assert!(BillingPeriod::from_start(NaiveDate::MAX).is_none());
    }

    #[test]
    fn test_accessors() {
        let c = candidate(Some("Premium"));
        assert_eq!(c.amount(), Some(10.99));
        assert_eq!(c.currency(), Some(Currency::Eur));
        assert_eq!(c.start_date(), NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(c.next_billing_date(), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_dedup_key() {
        assert_eq!(candidate(Some("Premium")).dedup_key(), "spotify::Premium");
        assert_eq!(candidate(None).dedup_key(), "spotify::unknown");
    }

    #[test]
    fn test_serialize_flat() {
        let value = serde_json::to_value(candidate(Some("Premium"))).unwrap();
        assert_eq!(value["provider"], "spotify");
        assert_eq!(value["product"], "Premium");
        assert_eq!(value["amount"], 10.99);
        assert_eq!(value["currency"], "EUR");
        assert_eq!(value["start_date"], "2024-01-31");
        assert_eq!(value["next_billing_date"], "2024-03-01");
        assert_eq!(value["evidence"]["source_message_id"], "m1");
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let mut c = candidate(None);
        c.price = None;
        c.billing = None;
        let value = serde_json::to_value(&c).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("product"));
        assert!(!object.contains_key("amount"));
        assert!(!object.contains_key("currency"));
        assert!(!object.contains_key("start_date"));

        let back: SubscriptionCandidate = serde_json::from_value(value).unwrap();
        assert_eq!(back, c);
    }
}
