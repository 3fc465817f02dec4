//! Relative model and related types.
//!
//! This module defines the kinship [`Role`] enum, [`Gender`], and the
//! [`Relative`] and [`Deceased`] records supplied with every case.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gender of a relative or of the deceased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// The kinship role of a relative with respect to the deceased.
///
/// # Example
///
/// ```
/// use estate_engine::models::Role;
///
/// let role: Role = serde_json::from_str("\"grandson_son\"").unwrap();
/// assert_eq!(role, Role::GrandsonSon);
/// assert_eq!(role.as_str(), "grandson_son");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Father of the deceased.
    Father,
    /// Mother of the deceased.
    Mother,
    /// Father's father.
    PaternalGrandfather,
    /// Father's mother.
    PaternalGrandmother,
    /// Mother's mother.
    MaternalGrandmother,
    /// Husband of the deceased.
    Husband,
    /// Wife of the deceased.
    Wife,
    /// Son of the deceased.
    Son,
    /// Daughter of the deceased.
    Daughter,
    /// Brother sharing both parents.
    FullBrother,
    /// Sister sharing both parents.
    FullSister,
    /// Half-brother through the father.
    PaternalBrother,
    /// Half-sister through the father.
    PaternalSister,
    /// Half-brother through the mother.
    MaternalBrother,
    /// Half-sister through the mother.
    MaternalSister,
    /// Father's brother.
    PaternalUncle,
    /// Full or paternal brother's son.
    PaternalNephew,
    /// Son's son.
    GrandsonSon,
    /// Son's daughter.
    GranddaughterSon,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 19] = [
        Role::Father,
        Role::Mother,
        Role::PaternalGrandfather,
        Role::PaternalGrandmother,
        Role::MaternalGrandmother,
        Role::Husband,
        Role::Wife,
        Role::Son,
        Role::Daughter,
        Role::FullBrother,
        Role::FullSister,
        Role::PaternalBrother,
        Role::PaternalSister,
        Role::MaternalBrother,
        Role::MaternalSister,
        Role::PaternalUncle,
        Role::PaternalNephew,
        Role::GrandsonSon,
        Role::GranddaughterSon,
    ];

    /// Children and son's children of the deceased.
    pub const DESCENDANTS: [Role; 4] = [
        Role::Son,
        Role::Daughter,
        Role::GrandsonSon,
        Role::GranddaughterSon,
    ];

    /// Brothers and sisters of every kind.
    pub const SIBLINGS: [Role; 6] = [
        Role::FullBrother,
        Role::FullSister,
        Role::PaternalBrother,
        Role::PaternalSister,
        Role::MaternalBrother,
        Role::MaternalSister,
    ];

    /// Returns the snake_case identifier used in configuration and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Father => "father",
            Role::Mother => "mother",
            Role::PaternalGrandfather => "paternal_grandfather",
            Role::PaternalGrandmother => "paternal_grandmother",
            Role::MaternalGrandmother => "maternal_grandmother",
            Role::Husband => "husband",
            Role::Wife => "wife",
            Role::Son => "son",
            Role::Daughter => "daughter",
            Role::FullBrother => "full_brother",
            Role::FullSister => "full_sister",
            Role::PaternalBrother => "paternal_brother",
            Role::PaternalSister => "paternal_sister",
            Role::MaternalBrother => "maternal_brother",
            Role::MaternalSister => "maternal_sister",
            Role::PaternalUncle => "paternal_uncle",
            Role::PaternalNephew => "paternal_nephew",
            Role::GrandsonSon => "grandson_son",
            Role::GranddaughterSon => "granddaughter_son",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The deceased whose estate is being distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deceased {
    /// Gender of the deceased; selects the spouse rules.
    pub gender: Gender,
}

/// A declared relative of the deceased.
///
/// Relatives are read-only to the engine; only those with `alive = true`
/// take part in the distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relative {
    /// Identifier, unique within a case.
    pub id: String,
    /// Kinship role with respect to the deceased.
    pub role: Role,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the relative survived the deceased.
    pub alive: bool,
    /// Gender of the relative.
    pub gender: Gender,
}

impl Relative {
    /// Creates a living relative without a display name.
    pub fn alive(id: impl Into<String>, role: Role, gender: Gender) -> Self {
        Self {
            id: id.into(),
            role,
            name: None,
            alive: true,
            gender,
        }
    }

    /// Returns the display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
