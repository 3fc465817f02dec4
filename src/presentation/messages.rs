//! Per-locale message tables.

use std::collections::HashMap;

use super::Locale;

/// Message templates keyed by locale and message key.
///
/// Templates use `{name}` placeholders. Lookups fall back to English and
/// then to the key itself, so a missing translation never fails a render.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use estate_engine::presentation::{Locale, MessageCatalog};
///
/// let mut messages = MessageCatalog::default();
/// messages.insert(
///     Locale::En,
///     HashMap::from([("greet".to_string(), "Hello {name}".to_string())]),
/// );
///
/// assert_eq!(messages.format(Locale::Id, "greet", &[("name", "Ali")]), "Hello Ali");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    tables: HashMap<Locale, HashMap<String, String>>,
}

impl MessageCatalog {
    /// Adds or replaces the table for a locale.
    pub fn insert(&mut self, locale: Locale, messages: HashMap<String, String>) {
        self.tables.insert(locale, messages);
    }

    /// Returns the locales that have a table.
    pub fn locales(&self) -> Vec<Locale> {
        Locale::ALL
            .into_iter()
            .filter(|locale| self.tables.contains_key(locale))
            .collect()
    }

    /// Returns the template for `key`.
    pub fn get<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.lookup(locale, key)
            .or_else(|| self.lookup(Locale::En, key))
            .unwrap_or(key)
    }

    /// Returns the template for `key` with placeholders substituted.
    ///
    /// The template is scanned once, so substituted values are copied
    /// verbatim even when they contain `{...}` themselves. Placeholders
    /// without a matching argument are left as written.
    pub fn format(&self, locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
        let template = self.get(locale, key);
        let mut text = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            text.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                text.push_str(&rest[open..]);
                return text;
            };
            let name = &after[..close];
            if name.contains('{') {
                // Stray brace; the real placeholder starts later.
                text.push('{');
                rest = after;
                continue;
            }
            match args.iter().find(|(arg, _)| *arg == name) {
                Some((_, value)) => text.push_str(value),
                None => text.push_str(&rest[open..open + close + 2]),
            }
            rest = &after[close + 1..];
        }

        text.push_str(rest);
        text
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.tables
            .get(&locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}
