//! Provider matcher.

use crate::headers::Headers;

/// Provider name used when neither tier finds a match.
pub const UNKNOWN_PROVIDER: &str = "unknown";

/// Which signal identified the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMatch<'a> {
    /// Found in the `From` header.
    Header(&'a str),
    /// Found in the message text.
    Body(&'a str),
    /// No provider mentioned anywhere.
    Unknown,
}

impl<'a> ProviderMatch<'a> {
    /// The provider name, or [`UNKNOWN_PROVIDER`].
    #[must_use]
    pub const fn name(&self) -> &'a str {
        match *self {
            Self::Header(name) | Self::Body(name) => name,
            Self::Unknown => UNKNOWN_PROVIDER,
        }
    }

    /// Short tier label, used in logs.
    #[must_use]
    pub const fn tier(&self) -> &'static str {
        match self {
            Self::Header(_) => "header",
            Self::Body(_) => "body",
            Self::Unknown => "none",
        }
    }
}

/// Resolves the provider of a message.
///
/// The first `From` header is checked before the body since it is the
/// stronger signal. Within each tier the first provider in `providers` order
/// that occurs as a substring wins.
#[must_use]
pub fn match_provider<'a>(
    headers: &Headers,
    text: &str,
    providers: &'a [String],
) -> ProviderMatch<'a> {
    if let Some(name) = headers
        .get("from")
        .and_then(|from| first_contained(&from.to_lowercase(), providers))
    {
        return ProviderMatch::Header(name);
    }

    first_contained(&text.to_lowercase(), providers)
        .map_or(ProviderMatch::Unknown, ProviderMatch::Body)
}

fn first_contained<'a>(haystack: &str, providers: &'a [String]) -> Option<&'a str> {
    providers
        .iter()
        .map(String::as_str)
        .find(|p| !p.is_empty() && haystack.contains(&p.to_lowercase()))
}
