//! Extraction entry point.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::candidate::{Evidence, SubscriptionCandidate};
use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::extract::{
    Aggregator, CandidateFilter, extract_billing_period, extract_price, extract_product,
    match_provider,
};
use crate::message::InputMessage;

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    /// Deduplicated candidates in first-seen order.
    pub candidates: Vec<SubscriptionCandidate>,
    /// Messages looked at.
    pub scanned: usize,
    /// Messages that passed the filter.
    pub accepted: usize,
    /// Candidates dropped by deduplication.
    pub duplicates: usize,
}

/// Runs the filter, extractors and aggregator over message batches.
///
/// Holds no state between calls: the same batch always yields the same
/// output.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractionConfig,
    filter: CandidateFilter,
}

impl Extractor {
    /// Creates an extractor from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the configuration fails validation.
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        let config = config.normalized();
        let filter = CandidateFilter::new(&config.known_brands, &config.intent_keywords);
        Ok(Self { config, filter })
    }

    /// The normalized configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Builds a candidate from one message, or `None` if the filter rejects it.
    #[must_use]
    pub fn extract_message(&self, message: &InputMessage) -> Option<SubscriptionCandidate> {
        let verdict = self.filter.evaluate(&message.text);
        if !verdict.is_accepted() {
            debug!(id = %message.id, reason = verdict.as_str(), "Message filtered out");
            return None;
        }

        let provider = match_provider(&message.headers, &message.text, &self.config.providers);
        debug!(
            id = %message.id,
            provider = provider.name(),
            tier = provider.tier(),
            "Provider resolved"
        );

        Some(SubscriptionCandidate {
            provider: provider.name().to_string(),
            product: extract_product(&message.text),
            price: extract_price(&message.text),
            billing: extract_billing_period(&message.text),
            evidence: Evidence {
                source_message_id: message.id.clone(),
                raw_text: message.text.clone(),
            },
        })
    }

    /// Extracts and deduplicates candidates from a batch.
    #[must_use]
    pub fn extract_subscriptions(&self, messages: &[InputMessage]) -> Vec<SubscriptionCandidate> {
        self.extract_with_report(messages).candidates
    }

    /// Like [`Self::extract_subscriptions`], with per-batch counters.
    #[must_use]
    pub fn extract_with_report(&self, messages: &[InputMessage]) -> ExtractionReport {
        reduce(messages.len(), messages.iter().map(|m| self.extract_message(m)))
    }

    /// Parallel variant of [`Self::extract_subscriptions`].
    ///
    /// Messages are extracted on the rayon pool; deduplication then runs in
    /// input order, so the output matches the sequential version exactly.
    #[must_use]
    pub fn extract_subscriptions_par(
        &self,
        messages: &[InputMessage],
    ) -> Vec<SubscriptionCandidate> {
        self.extract_with_report_par(messages).candidates
    }

    /// Parallel variant of [`Self::extract_with_report`].
    #[must_use]
    pub fn extract_with_report_par(&self, messages: &[InputMessage]) -> ExtractionReport {
        let extracted: Vec<_> = messages
            .par_iter()
            .map(|m| self.extract_message(m))
            .collect();
        reduce(messages.len(), extracted)
    }
}

fn reduce<I>(scanned: usize, extracted: I) -> ExtractionReport
where
    I: IntoIterator<Item = Option<SubscriptionCandidate>>,
{
    let mut aggregator = Aggregator::new();
    let mut accepted = 0;
    for candidate in extracted.into_iter().flatten() {
        accepted += 1;
        aggregator.push(candidate);
    }

    let duplicates = aggregator.duplicates();
    let candidates = aggregator.into_candidates();
    info!(
        scanned,
        accepted,
        duplicates,
        kept = candidates.len(),
        "Extraction finished"
    );

    ExtractionReport {
        candidates,
        scanned,
        accepted,
        duplicates,
    }
}

/// One-shot extraction with an explicit brand list.
///
/// `known_brands` replaces the brand list of `config`; with no config the
/// built-in keyword and provider lists are used.
///
/// # Errors
///
/// Returns [`crate::Error::Config`] if the resulting configuration is invalid.
pub fn extract_subscriptions<I, S>(
    messages: &[InputMessage],
    known_brands: I,
    config: Option<ExtractionConfig>,
) -> Result<Vec<SubscriptionCandidate>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = config.unwrap_or_default().with_brands(known_brands);
    Ok(Extractor::new(config)?.extract_subscriptions(messages))
}
