//! Inheritance case model.
//!
//! An [`InheritanceCase`] is everything the engine needs for one
//! calculation: the deceased, the declared relatives and an optional
//! estate value.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{Deceased, Relative, Role};

/// A single inheritance case.
///
/// The case is constructed by the caller and only read by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InheritanceCase {
    /// The deceased.
    pub deceased: Deceased,
    /// Declared relatives, alive or not.
    pub relatives: Vec<Relative>,
    /// Value of the estate to distribute, if monetary amounts are wanted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estate_value: Option<Decimal>,
    /// The role of the person asking, used to highlight their share.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<Role>,
}

impl InheritanceCase {
    /// Creates a case without an estate value.
    pub fn new(deceased: Deceased, relatives: Vec<Relative>) -> Self {
        Self {
            deceased,
            relatives,
            estate_value: None,
            user_role: None,
        }
    }

    /// Sets the estate value.
    pub fn with_estate_value(mut self, value: Decimal) -> Self {
        self.estate_value = Some(value);
        self
    }

    /// Checks the case for input the engine cannot distribute sensibly.
    ///
    /// Rejects a negative estate value, empty relative ids and duplicate
    /// relative ids with [`EngineError::InvalidInput`].
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(value) = self.estate_value {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(EngineError::invalid_input(
                    "estate_value",
                    format!("must not be negative, got {}", value),
                ));
            }
        }

        let mut seen = HashSet::new();
        for (index, relative) in self.relatives.iter().enumerate() {
            if relative.id.trim().is_empty() {
                return Err(EngineError::invalid_input(
                    format!("relatives[{}].id", index),
                    "must not be empty",
                ));
            }
            if !seen.insert(relative.id.as_str()) {
                return Err(EngineError::invalid_input(
                    format!("relatives[{}].id", index),
                    format!("duplicate relative id '{}'", relative.id),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Relative};
    use std::str::FromStr;

    fn male_deceased() -> Deceased {
        Deceased {
            gender: Gender::Male,
        }
    }

    #[test]
    fn test_valid_case_passes() {
        let case = InheritanceCase::new(
            male_deceased(),
            vec![
                Relative::alive("w", Role::Wife, Gender::Female),
                Relative::alive("s", Role::Son, Gender::Male),
            ],
        )
        .with_estate_value(Decimal::from(1000));

        assert!(case.validate().is_ok());
    }

    #[test]
    fn test_zero_estate_is_allowed() {
        let case = InheritanceCase::new(male_deceased(), vec![]).with_estate_value(Decimal::ZERO);
        assert!(case.validate().is_ok());
    }

    #[test]
    fn test_negative_estate_is_rejected() {
        let case = InheritanceCase::new(male_deceased(), vec![])
            .with_estate_value(Decimal::from_str("-1.50").unwrap());

        match case.validate() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "estate_value");
                assert!(message.contains("-1.50"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let case = InheritanceCase::new(
            male_deceased(),
            vec![
                Relative::alive("x", Role::Son, Gender::Male),
                Relative::alive("x", Role::Daughter, Gender::Female),
            ],
        );

        match case.validate() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "relatives[1].id");
                assert!(message.contains("duplicate"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let case = InheritanceCase::new(
            male_deceased(),
            vec![Relative::alive("  ", Role::Son, Gender::Male)],
        );
        assert!(matches!(
            case.validate(),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_deserialize_case_with_estate_as_string() {
        let json = r#"{
            "deceased": {"gender": "female"},
            "relatives": [{"id": "h", "role": "husband", "alive": true, "gender": "male"}],
            "estate_value": "120000.00",
            "user_role": "husband"
        }"#;

        let case: InheritanceCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.deceased.gender, Gender::Female);
        assert_eq!(case.estate_value, Some(Decimal::from_str("120000.00").unwrap()));
        assert_eq!(case.user_role, Some(Role::Husband));
    }
}
