//! Configuration loading and management for the Estate Distribution Engine.
//!
//! This module loads a scheme's rule catalog from YAML files. The catalog is
//! plain data: candidate rules with their conditions, shares and citations,
//! plus the residual priority table. Selection logic lives in
//! [`crate::calculation`].
//!
//! # Example
//!
//! ```no_run
//! use estate_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/faraid").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Condition, DEFAULT_RESIDUAL_PRIORITY, PrioritiesConfig, ReferencesConfig, RolesConfig, Rule,
    RuleCatalog, RuleCategory, RulesConfig, SchemeConfig, SchemeMetadata,
};
