//! Temporal extractor.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};
use tracing::debug;

use crate::candidate::BillingPeriod;

/// `2024-03-05` or `2024/3/5`, years 2000-2099.
///
/// Bounded by non-digits only, so timestamps (`2024-03-05T10:00:00Z`) and
/// dates glued to words (`invoice_2024-03-05`) still match.
#[allow(clippy::expect_used)]
static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^0-9])(?P<date>(?P<year>20[0-9]{2})[-/](?P<month>[0-9]{1,2})[-/](?P<day>[0-9]{1,2}))(?:[^0-9]|$)",
    )
    .expect("ISO date regex is valid")
});

/// `Jan 5, 2024`, `March 5th 2024`, `Sept. 12, 2025`.
#[allow(clippy::expect_used)]
static LONG_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<month>jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(?P<day>[0-9]{1,2})(?:st|nd|rd|th)?,?\s+(?P<year>[0-9]{4})\b",
    )
    .expect("long date regex is valid")
});

/// Finds a start date and projects the next charge one cycle later.
///
/// ISO dates are tried before long-form dates and the first pattern that
/// matches decides. A match that is not a real calendar date (`2024-13-45`,
/// `Feb 30, 2024`) yields `None` instead of falling through.
#[must_use]
pub fn extract_billing_period(text: &str) -> Option<BillingPeriod> {
    let (raw, start) = if let Some(caps) = ISO_DATE.captures(text) {
        (caps.name("date")?.as_str(), parse_iso(&caps))
    } else if let Some(caps) = LONG_DATE.captures(text) {
        (caps.get(0)?.as_str(), parse_long(&caps))
    } else {
        return None;
    };

    let period = start.and_then(BillingPeriod::from_start);
    if period.is_none() {
        debug!(raw, "Ignoring invalid date");
    }
    period
}

fn parse_iso(caps: &Captures<'_>) -> Option<NaiveDate> {
    let year = caps.name("year")?.as_str().parse().ok()?;
    let month = caps.name("month")?.as_str().parse().ok()?;
    let day = caps.name("day")?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_long(caps: &Captures<'_>) -> Option<NaiveDate> {
    let month = month_number(caps.name("month")?.as_str())?;
    let day = caps.name("day")?.as_str().parse().ok()?;
    let year = caps.name("year")?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
