//! Application state for the Estate Distribution Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::presentation::{Locale, LocalePreference};

/// Shared application state.
///
/// Holds the loaded scheme, which handlers only read, and the locale used
/// when a request does not name a supported one.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    default_locale: Locale,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            default_locale: Locale::default(),
        }
    }

    /// Sets the locale used when a request does not name a supported one.
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the default locale.
    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Resolves a requested locale code against the default.
    pub fn resolve_locale(&self, requested: Option<&str>) -> Locale {
        let preference = LocalePreference::new(self.default_locale);
        match requested {
            Some(code) => preference.with_requested(code).resolve(),
            None => preference.resolve(),
        }
    }
}
