//! Monetary extractor.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::candidate::{Currency, Price};

/// Optional leading marker, a number, optional trailing code.
///
/// The number is comma-grouped thousands (`1,299.00`), dot-grouped thousands
/// (`1.299,00`) or plain digits with an optional 1-2 digit fraction using
/// `.` or `,` (`15.99`, `9,99`).
#[allow(clippy::expect_used)]
static PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(?P<lead>usd|ngn|eur|gbp)|[$€£₦])?\s?(?:(?P<grouped>[0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]{1,2})?)|(?P<dotted>[0-9]{1,3}(?:\.[0-9]{3})+(?:,[0-9]{1,2})?)|(?P<plain>[0-9]+(?:[.,][0-9]{1,2})?))(?:\s?(?P<trail>usd|ngn|eur|gbp)\b)?",
    )
    .expect("price regex is valid")
});

/// Extracts the first monetary amount in `text`.
///
/// An explicit three-letter code next to the number decides the currency.
/// Otherwise symbols anywhere in the text are checked in the order `$`, `€`,
/// `₦`, and USD is assumed when none is present.
#[must_use]
pub fn extract_price(text: &str) -> Option<Price> {
    let caps = PRICE.captures(text)?;
    let amount = parse_amount(&caps)?;

    let currency = caps
        .name("lead")
        .or_else(|| caps.name("trail"))
        .and_then(|code| Currency::from_code(code.as_str()))
        .unwrap_or_else(|| infer_currency(text));

    Some(Price { amount, currency })
}

fn parse_amount(caps: &Captures<'_>) -> Option<f64> {
    let normalized = if let Some(grouped) = caps.name("grouped") {
        grouped.as_str().replace(',', "")
    } else if let Some(dotted) = caps.name("dotted") {
        dotted.as_str().replace('.', "").replace(',', ".")
    } else {
        caps.name("plain")?.as_str().replace(',', ".")
    };

    match normalized.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Some(amount),
        Ok(_) | Err(_) => {
            debug!(raw = %normalized, "Unparseable amount");
            None
        }
    }
}

fn infer_currency(text: &str) -> Currency {
    [Currency::Usd, Currency::Eur, Currency::Ngn]
        .into_iter()
        .find(|currency| text.contains(currency.symbol()))
        .unwrap_or_default()
}
