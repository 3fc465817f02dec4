//! Configuration types for the rule catalog.
//!
//! This module contains the strongly-typed structures that are deserialized
//! from the YAML files of a scheme directory, and the [`RuleCatalog`] the
//! engine reads during a calculation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Fraction, Gender, Role};

/// Residual rank given to roles missing from the priority table.
pub const DEFAULT_RESIDUAL_PRIORITY: u32 = 999;

/// Metadata about the inheritance scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeMetadata {
    /// Short code identifying the scheme (e.g., "faraid").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The version of the rule tables.
    pub version: String,
    /// Where the rules come from.
    pub source: String,
}

/// Category of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// The rule prescribes a fraction of the estate.
    Fixed,
    /// The rule entitles the heir to part of the remainder.
    Residual,
}

/// A predicate over the family configuration.
///
/// Conditions are evaluated against a
/// [`FamilyContext`](crate::calculation::FamilyContext). In YAML they are
/// written as `{check: <kind>, args: <arguments>}`:
///
/// ```
/// use estate_engine::config::Condition;
/// use estate_engine::models::Role;
///
/// let yaml = "
/// check: all
/// args:
///   - check: deceased_gender
///     args: male
///   - check: none_present
///     args: [son, daughter]
/// ";
/// let condition: Condition = serde_yaml::from_str(yaml).unwrap();
/// assert!(matches!(condition, Condition::All(ref parts) if parts.len() == 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "check", content = "args", rename_all = "snake_case")]
pub enum Condition {
    /// Always holds.
    #[default]
    Always,
    /// The deceased has the given gender.
    DeceasedGender(Gender),
    /// At least one relative with any of the roles is alive.
    AnyPresent(Vec<Role>),
    /// No relative with any of the roles is alive.
    NonePresent(Vec<Role>),
    /// At least `count` relatives with the roles are alive.
    AtLeast {
        /// Roles counted together.
        roles: Vec<Role>,
        /// Minimum count.
        count: usize,
    },
    /// Exactly `count` relatives with the roles are alive.
    Exactly {
        /// Roles counted together.
        roles: Vec<Role>,
        /// Required count.
        count: usize,
    },
    /// Every nested condition holds.
    All(Vec<Condition>),
    /// At least one nested condition holds.
    Any(Vec<Condition>),
    /// The nested condition does not hold.
    Not(Box<Condition>),
}

/// A candidate rule for a role.
///
/// For fixed rules `share` is the prescribed fraction of the estate. For
/// residual rules it is the heir's weight relative to the other heirs of
/// the same residual rank (a son weighs 1, a daughter alongside him 1/2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Stable identifier used in the audit trace.
    pub id: String,
    /// When the rule applies.
    #[serde(default)]
    pub condition: Condition,
    /// The fraction or residual weight.
    pub share: Fraction,
    /// Fixed or residual.
    pub category: RuleCategory,
    /// Citation supporting the rule.
    pub reference: String,
    /// Explanation shown with the award.
    pub explanation: String,
    /// Position among the role's candidates; lower is tried first.
    pub priority: u32,
    /// Roles that divide a collective fixed share equally.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_among: Vec<Role>,
    /// Residual rank to take instead of the role's own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranks_with: Option<Role>,
}

impl Rule {
    /// Returns true if the rule is a fixed share.
    pub fn is_fixed(&self) -> bool {
        self.category == RuleCategory::Fixed
    }

    /// Returns true if the rule is a residual entitlement.
    pub fn is_residual(&self) -> bool {
        self.category == RuleCategory::Residual
    }
}

/// rules.yaml structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    /// Map of role to its candidate rules.
    pub rules: HashMap<Role, Vec<Rule>>,
}

/// priorities.yaml structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PrioritiesConfig {
    /// Map of role to residual rank (1 is highest).
    pub residual_priority: HashMap<Role, u32>,
}

/// roles.yaml structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RolesConfig {
    /// Map of role to description.
    pub roles: HashMap<Role, String>,
}

/// references.yaml structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferencesConfig {
    /// Map of citation to its full text.
    pub references: HashMap<String, String>,
}

/// The read-only rule catalog consumed by the engine.
///
/// Built from YAML by [`ConfigLoader`](super::ConfigLoader) or directly in
/// code, which keeps every engine component testable against synthetic
/// catalogs.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use estate_engine::config::{Condition, Rule, RuleCatalog, RuleCategory};
/// use estate_engine::models::{Fraction, Role};
///
/// let mut rules = HashMap::new();
/// rules.insert(Role::Son, vec![Rule {
///     id: "son_residual".to_string(),
///     condition: Condition::Always,
///     share: Fraction::one(),
///     category: RuleCategory::Residual,
///     reference: "Quran 4:11".to_string(),
///     explanation: "Sons take the remainder".to_string(),
///     priority: 1,
///     shared_among: vec![],
///     ranks_with: None,
/// }]);
///
/// let catalog = RuleCatalog::new(rules, HashMap::from([(Role::Son, 1)]));
/// assert_eq!(catalog.rules_for(Role::Son).map(|r| r.len()), Some(1));
/// assert_eq!(catalog.residual_priority(Role::Son), 1);
/// assert_eq!(catalog.residual_priority(Role::PaternalUncle), 999);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleCatalog {
    rules: HashMap<Role, Vec<Rule>>,
    residual_priority: HashMap<Role, u32>,
}

impl RuleCatalog {
    /// Creates a catalog, ordering each role's candidates by priority.
    pub fn new(rules: HashMap<Role, Vec<Rule>>, residual_priority: HashMap<Role, u32>) -> Self {
        let mut rules = rules;
        for candidates in rules.values_mut() {
            candidates.sort_by_key(|rule| rule.priority);
        }
        Self {
            rules,
            residual_priority,
        }
    }

    /// Returns the ordered candidate rules for a role, if it has any.
    pub fn rules_for(&self, role: Role) -> Option<&[Rule]> {
        self.rules.get(&role).map(Vec::as_slice)
    }

    /// Returns the residual rank of a role; lower ranks take precedence.
    pub fn residual_priority(&self, role: Role) -> u32 {
        self.residual_priority
            .get(&role)
            .copied()
            .unwrap_or(DEFAULT_RESIDUAL_PRIORITY)
    }

    /// Returns the number of roles with at least one rule.
    pub fn role_count(&self) -> usize {
        self.rules.len()
    }
}

/// The complete scheme configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct SchemeConfig {
    metadata: SchemeMetadata,
    catalog: RuleCatalog,
    role_descriptions: HashMap<Role, String>,
    references: HashMap<String, String>,
}

impl SchemeConfig {
    /// Creates a new SchemeConfig from its component parts.
    pub fn new(
        metadata: SchemeMetadata,
        catalog: RuleCatalog,
        role_descriptions: HashMap<Role, String>,
        references: HashMap<String, String>,
    ) -> Self {
        Self {
            metadata,
            catalog,
            role_descriptions,
            references,
        }
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Returns the rule catalog.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Returns all role descriptions.
    pub fn role_descriptions(&self) -> &HashMap<Role, String> {
        &self.role_descriptions
    }

    /// Returns all reference texts keyed by citation.
    pub fn references(&self) -> &HashMap<String, String> {
        &self.references
    }
}
