//! Heuristic extractors.
//!
//! Data flows strictly forward: the [`CandidateFilter`] gates a message,
//! then the provider, price, date and product extractors run independently
//! on it, and the [`Aggregator`] collapses the resulting candidates.
//!
//! Every extractor is a pure function of its input. A field that cannot be
//! found or parsed comes back as `None`; nothing here returns an error.

mod aggregate;
mod date;
mod filter;
mod money;
mod product;
mod provider;

pub use aggregate::Aggregator;
pub use date::extract_billing_period;
pub use filter::{CandidateFilter, FilterVerdict, has_currency_token};
pub use money::extract_price;
pub use product::extract_product;
pub use provider::{ProviderMatch, UNKNOWN_PROVIDER, match_provider};
