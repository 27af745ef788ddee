//! Product/plan extractor.

use std::sync::LazyLock;

use regex::Regex;

/// A plan keyword, an optional `:`/`-` separator, then the label text.
///
/// Keywords must stand as whole words, optionally plural (`subscriptions`),
/// so prefixes such as `planet` or `promo` never fire.
#[allow(clippy::expect_used)]
static PLAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:plan|subscription|membership|premium|pro|plus|monthly|annual)s?\b[ \t]*[:\-]?[ \t]*(?P<label>[A-Za-z0-9 \-]+)",
    )
    .expect("plan regex is valid")
});

/// Extracts the text following the first plan keyword.
///
/// Only the first line of the captured text is kept, trimmed. Returns `None`
/// when no keyword is followed by label text.
#[must_use]
pub fn extract_product(text: &str) -> Option<String> {
    let label = PLAN.captures(text)?.name("label")?.as_str();
    let label = label.lines().next().unwrap_or_default().trim();
    (!label.is_empty()).then(|| label.to_string())
}
