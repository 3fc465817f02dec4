//! Supported locales and the caller's locale preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A locale with a message table.
///
/// # Example
///
/// ```
/// use estate_engine::presentation::Locale;
///
/// let locale: Locale = "id-ID".parse().unwrap();
/// assert_eq!(locale, Locale::Id);
/// assert_eq!(locale.as_str(), "id");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Indonesian.
    Id,
}

impl Locale {
    /// Every supported locale.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Id];

    /// Returns the short locale code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "id" | "id-id" => Ok(Locale::Id),
            _ => Err(EngineError::UnknownLocale {
                code: s.to_string(),
            }),
        }
    }
}

/// The locale a caller asked for, resolved against a default.
///
/// The preference is an explicit value handed to the renderer; nothing in
/// the engine remembers it between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePreference {
    default: Locale,
    requested: Option<String>,
}

impl LocalePreference {
    /// Creates a preference that resolves to `default`.
    pub fn new(default: Locale) -> Self {
        Self {
            default,
            requested: None,
        }
    }

    /// Records the locale code the caller asked for.
    pub fn with_requested(mut self, code: impl Into<String>) -> Self {
        self.requested = Some(code.into());
        self
    }

    /// Returns the requested locale, or the default when none was requested
    /// or the code is not supported.
    pub fn resolve(&self) -> Locale {
        self.requested
            .as_deref()
            .and_then(|code| code.parse().ok())
            .unwrap_or(self.default)
    }
}
