//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a scheme's
//! rule catalog, reference tables and message tables from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Fraction, Role};
use crate::presentation::{Locale, MessageCatalog};

use super::types::{
    PrioritiesConfig, ReferencesConfig, RolesConfig, Rule, RuleCatalog, RulesConfig,
    SchemeConfig, SchemeMetadata,
};

/// A message table file under `locales/`.
#[derive(Debug, serde::Deserialize)]
struct LocaleFile {
    messages: HashMap<String, String>,
}

/// Loads and provides access to scheme configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides methods to query the rule catalog, role descriptions,
/// reference texts and message tables.
///
/// # Directory Structure
///
/// ```text
/// config/faraid/
/// ├── scheme.yaml      # Scheme metadata
/// ├── rules.yaml       # Candidate rules per role
/// ├── priorities.yaml  # Residual priority table
/// ├── roles.yaml       # Role descriptions
/// ├── references.yaml  # Full text of cited verses and hadith
/// └── locales/
///     ├── en.yaml      # English message table
///     └── id.yaml      # Indonesian message table
/// ```
///
/// # Example
///
/// ```no_run
/// use estate_engine::config::ConfigLoader;
/// use estate_engine::models::Role;
///
/// let loader = ConfigLoader::load("./config/faraid")?;
/// println!("Loaded scheme: {}", loader.scheme().name);
/// println!("Wife: {:?}", loader.role_description(Role::Wife));
/// # Ok::<(), estate_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SchemeConfig,
    messages: MessageCatalog,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or an invalid rule (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<SchemeMetadata>(&path.join("scheme.yaml"))?;

        let rules_path = path.join("rules.yaml");
        let rules = Self::load_yaml::<RulesConfig>(&rules_path)?;
        Self::validate_rules(&rules_path, &rules.rules)?;

        let priorities = Self::load_yaml::<PrioritiesConfig>(&path.join("priorities.yaml"))?;
        let roles = Self::load_yaml::<RolesConfig>(&path.join("roles.yaml"))?;
        let references = Self::load_yaml::<ReferencesConfig>(&path.join("references.yaml"))?;

        let messages = Self::load_locales(&path.join("locales"))?;

        let catalog = RuleCatalog::new(rules.rules, priorities.residual_priority);
        debug!(
            scheme = %metadata.code,
            roles = catalog.role_count(),
            locales = messages.locales().len(),
            "Loaded scheme configuration"
        );

        let config = SchemeConfig::new(metadata, catalog, roles.roles, references.references);

        Ok(Self { config, messages })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects fixed shares outside (0, 1] and non-positive residual weights.
    fn validate_rules(path: &Path, rules: &HashMap<Role, Vec<Rule>>) -> EngineResult<()> {
        for (role, candidates) in rules {
            for rule in candidates {
                let valid = if rule.is_fixed() {
                    rule.share.is_positive() && rule.share <= Fraction::one()
                } else {
                    rule.share.is_positive()
                };
                if !valid {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!(
                            "rule '{}' for role '{}' has invalid share {}",
                            rule.id, role, rule.share
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// Loads every message table from the locales directory.
    fn load_locales(locales_dir: &Path) -> EngineResult<MessageCatalog> {
        let dir_str = locales_dir.display().to_string();

        let entries = fs::read_dir(locales_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut messages = MessageCatalog::default();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let code = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or_default();
                let locale: Locale =
                    code.parse()
                        .map_err(|e: EngineError| EngineError::ConfigParseError {
                            path: path.display().to_string(),
                            message: e.to_string(),
                        })?;
                let file = Self::load_yaml::<LocaleFile>(&path)?;
                messages.insert(locale, file.messages);
            }
        }

        if messages.locales().is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no locale files found)", dir_str),
            });
        }

        Ok(messages)
    }

    /// Returns the underlying scheme configuration.
    pub fn config(&self) -> &SchemeConfig {
        &self.config
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.config.scheme()
    }

    /// Returns the rule catalog.
    pub fn catalog(&self) -> &RuleCatalog {
        self.config.catalog()
    }

    /// Returns the message tables.
    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Gets the description of a role.
    pub fn role_description(&self, role: Role) -> Option<&str> {
        self.config.role_descriptions().get(&role).map(String::as_str)
    }

    /// Gets the full text behind a citation.
    ///
    /// The lookup tries the exact citation first, then the part before the
    /// first " - ", so "Sunnah - residuary inheritance" resolves to "Sunnah".
    pub fn reference_text(&self, citation: &str) -> Option<&str> {
        let references = self.config.references();
        references
            .get(citation)
            .or_else(|| {
                citation
                    .split_once(" - ")
                    .and_then(|(head, _)| references.get(head))
            })
            .map(String::as_str)
    }
}
