//! # subledger-core
//!
//! Heuristic extraction of subscription records from decoded email text.
//!
//! This crate provides:
//! - **Candidate Filter** - gates messages on brand, billing intent and a currency token
//! - **Extractors** - provider, price, billing dates and plan label, each a pure function
//! - **Aggregator** - first-seen deduplication on `(provider, product)`
//! - **Configuration** - brand, keyword and provider lists passed in explicitly
//!
//! Mail retrieval, MIME decoding and persistence are left to the caller: the
//! engine consumes already-decoded messages and returns candidates.
//!
//! ## Example
//!
//! ```
//! use subledger_core::{ExtractionConfig, Extractor, Headers, InputMessage};
//!
//! let config = ExtractionConfig::default().with_brands(["netflix"]);
//! let extractor = Extractor::new(config)?;
//!
//! let message = InputMessage::new(
//!     "m1",
//!     "Your Netflix subscription of $15.99 renewed on 2024-03-05",
//!     Headers::new(),
//! );
//!
//! let candidates = extractor.extract_subscriptions(&[message]);
//! assert_eq!(candidates.len(), 1);
//! assert_eq!(candidates[0].provider, "netflix");
//! assert_eq!(candidates[0].amount(), Some(15.99));
//! # Ok::<(), subledger_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod candidate;
pub mod config;
mod engine;
mod error;
pub mod extract;
mod headers;
mod message;

pub use candidate::{BillingPeriod, Currency, Evidence, Price, SubscriptionCandidate};
pub use config::ExtractionConfig;
pub use engine::{ExtractionReport, Extractor, extract_subscriptions};
pub use error::{Error, Result};
pub use extract::{Aggregator, CandidateFilter, FilterVerdict, ProviderMatch, UNKNOWN_PROVIDER};
pub use headers::{Header, Headers};
pub use message::{InputMessage, parse_batch, read_batch};
