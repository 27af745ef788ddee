//! Extraction configuration.
//!
//! Brand, keyword and provider lists are passed into the engine explicitly,
//! so tests and deployments can swap them without touching extraction logic.
//! A configuration file is plain JSON; any list left out falls back to the
//! built-in default.
//!
//! ```json
//! {
//!   "known_brands": ["netflix", "spotify"],
//!   "providers": ["netflix", "spotify", "openai"]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Keywords that signal billing intent.
pub const DEFAULT_INTENT_KEYWORDS: &[&str] = &[
    "subscription",
    "subscribed",
    "renewal",
    "renewed",
    "renew",
    "invoice",
    "receipt",
    "charged",
    "payment",
    "billing",
    "billed",
    "plan",
    "auto-renew",
    "membership",
    "trial",
];

/// Providers recognised by the matcher, in priority order.
pub const DEFAULT_PROVIDERS: &[&str] = &[
    "openai",
    "spotify",
    "netflix",
    "stripe",
    "apple",
    "amazon",
    "youtube",
    "claude",
    "anthropic",
    "perplexity",
    "google",
    "microsoft",
    "adobe",
    "dropbox",
    "github",
    "notion",
    "canva",
    "disney",
    "hulu",
    "paddle",
];

/// Lists driving the filter and provider matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Brand names a message must mention to be considered at all.
    pub known_brands: Vec<String>,
    /// Keywords that signal billing intent.
    pub intent_keywords: Vec<String>,
    /// Provider enumeration, checked in order.
    pub providers: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            known_brands: Vec::new(),
            intent_keywords: to_owned(DEFAULT_INTENT_KEYWORDS),
            providers: to_owned(DEFAULT_PROVIDERS),
        }
    }
}

impl ExtractionConfig {
    /// Replaces the brand list.
    #[must_use]
    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_brands = brands.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the intent keyword list.
    #[must_use]
    pub fn with_intent_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.intent_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the provider enumeration.
    #[must_use]
    pub fn with_providers<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.providers = providers.into_iter().map(Into::into).collect();
        self
    }

    /// Trims and lower-cases every entry.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.known_brands,
            &mut self.intent_keywords,
            &mut self.providers,
        ] {
            for entry in list.iter_mut() {
                *entry = entry.trim().to_lowercase();
            }
        }
        self
    }

    /// Checks the lists are usable.
    ///
    /// A blank entry would match every message as a substring, so it is
    /// rejected rather than ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on a blank entry or an empty provider list.
    pub fn validate(&self) -> Result<()> {
        for (field, list) in [
            ("known_brands", &self.known_brands),
            ("intent_keywords", &self.intent_keywords),
            ("providers", &self.providers),
        ] {
            if let Some(pos) = list.iter().position(|e| e.trim().is_empty()) {
                return Err(Error::Config(format!("{field}[{pos}] is blank")));
            }
        }
        if self.providers.is_empty() {
            return Err(Error::Config("providers must not be empty".to_string()));
        }
        Ok(())
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        info!(
            "Loaded config from {:?} ({} brands)",
            path,
            config.known_brands.len()
        );
        Ok(config)
    }

    /// Default config file location (`<config dir>/subledger/config.json`).
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("subledger")
            .join("config.json")
    }

    /// Loads the default config file, or the built-in defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            debug!(?path, "No config file, using defaults");
            Ok(Self::default())
        }
    }
}

fn to_owned(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}
