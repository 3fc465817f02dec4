//! Request types for the Estate Distribution Engine API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Deceased, Gender, InheritanceCase, Relative, Role};

/// Request body for the `/calculate` endpoint.
///
/// Contains the deceased, the declared relatives and the optional estate
/// value, plus presentation options that do not affect the distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The deceased.
    pub deceased: DeceasedRequest,
    /// Declared relatives, alive or not.
    #[serde(default)]
    pub relatives: Vec<RelativeRequest>,
    /// Value of the estate to distribute.
    #[serde(default)]
    pub estate_value: Option<Decimal>,
    /// The role of the person asking.
    #[serde(default)]
    pub user_role: Option<Role>,
    /// Locale code for the localized summary (e.g., "en", "id").
    #[serde(default)]
    pub locale: Option<String>,
}

/// Deceased information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeceasedRequest {
    /// Gender of the deceased.
    pub gender: Gender,
}

/// Relative information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativeRequest {
    /// Identifier, unique within the request.
    pub id: String,
    /// Kinship role with respect to the deceased.
    pub role: Role,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the relative survived the deceased.
    #[serde(default = "default_alive")]
    pub alive: bool,
    /// Gender of the relative.
    pub gender: Gender,
}

fn default_alive() -> bool {
    true
}

impl From<DeceasedRequest> for Deceased {
    fn from(req: DeceasedRequest) -> Self {
        Deceased { gender: req.gender }
    }
}

impl From<RelativeRequest> for Relative {
    fn from(req: RelativeRequest) -> Self {
        Relative {
            id: req.id,
            role: req.role,
            name: req.name,
            alive: req.alive,
            gender: req.gender,
        }
    }
}

impl From<CalculationRequest> for InheritanceCase {
    fn from(req: CalculationRequest) -> Self {
        InheritanceCase {
            deceased: req.deceased.into(),
            relatives: req.relatives.into_iter().map(Into::into).collect(),
            estate_value: req.estate_value,
            user_role: req.user_role,
        }
    }
}
