//! Calculation result models for the Estate Distribution Engine.
//!
//! This module contains the [`CalculationResult`] type and its associated
//! structures: one [`ShareAward`] per award, the relatives removed by
//! blocking, and the audit trace of every decision taken.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Fraction, Role};

/// The category of an award.
///
/// # Example
///
/// ```
/// use estate_engine::models::ShareCategory;
///
/// let json = serde_json::to_string(&ShareCategory::Residual).unwrap();
/// assert_eq!(json, "\"residual\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareCategory {
    /// A prescribed fraction of the estate.
    Fixed,
    /// A portion of what remains after fixed shares.
    Residual,
    /// Nullified by a closer relative.
    Excluded,
}

impl ShareCategory {
    /// Returns the snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareCategory::Fixed => "fixed",
            ShareCategory::Residual => "residual",
            ShareCategory::Excluded => "excluded",
        }
    }
}

/// A share of the estate awarded to one relative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareAward {
    /// The id of the relative receiving the award.
    pub relative_id: String,
    /// The role under which the award was made.
    pub role: Role,
    /// The awarded fraction of the whole estate.
    pub share: Fraction,
    /// Whether the award is fixed or residual.
    pub category: ShareCategory,
    /// Monetary amount, present when an estate value was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Human-readable explanation of the award.
    pub reasoning: String,
    /// Citation supporting the award.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A relative removed from the distribution by a closer relative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedRelative {
    /// The id of the excluded relative.
    pub relative_id: String,
    /// The role of the excluded relative.
    pub role: Role,
    /// The role whose presence nullified the entitlement.
    pub blocked_by: Role,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule
/// application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the rule or procedure that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Citation for the rule, when it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of distributing an estate.
///
/// Holds no timestamps or generated identifiers: calculating the same case
/// twice yields equal results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Awards in the order they were made: fixed shares, then residual.
    pub awards: Vec<ShareAward>,
    /// Exact sum of all award fractions.
    pub total_awarded: Fraction,
    /// True when fixed shares exceeded the estate and were rescaled.
    pub overflow_corrected: bool,
    /// Portion of the estate left without an heir.
    pub unassigned: Fraction,
    /// Relatives removed by blocking.
    pub excluded: Vec<ExcludedRelative>,
    /// Every decision taken during the calculation.
    pub audit_trace: Vec<AuditStep>,
    /// Multi-line textual summary.
    pub summary: String,
}

impl CalculationResult {
    /// Returns the awards made to the given relative.
    pub fn awards_for<'a>(&'a self, relative_id: &'a str) -> impl Iterator<Item = &'a ShareAward> {
        self.awards
            .iter()
            .filter(move |award| award.relative_id == relative_id)
    }

    /// Returns the total fraction awarded to the given relative.
    pub fn share_of(&self, relative_id: &str) -> Fraction {
        self.awards_for(relative_id).map(|award| award.share).sum()
    }

    /// Returns the total fraction awarded to relatives holding `role`.
    pub fn share_of_role(&self, role: Role) -> Fraction {
        self.awards
            .iter()
            .filter(|award| award.role == role)
            .map(|award| award.share)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    fn award(id: &str, role: Role, share: Fraction, category: ShareCategory) -> ShareAward {
        ShareAward {
            relative_id: id.to_string(),
            role,
            share,
            category,
            amount: None,
            reasoning: "test".to_string(),
            reference: None,
        }
    }

    fn sample_result() -> CalculationResult {
        CalculationResult {
            awards: vec![
                award("f", Role::Father, frac(1, 6), ShareCategory::Fixed),
                award("d", Role::Daughter, frac(1, 2), ShareCategory::Fixed),
                award("f", Role::Father, frac(1, 3), ShareCategory::Residual),
            ],
            total_awarded: Fraction::one(),
            overflow_corrected: false,
            unassigned: Fraction::zero(),
            excluded: vec![],
            audit_trace: vec![],
            summary: String::new(),
        }
    }

    #[test]
    fn test_share_of_sums_fixed_and_residual() {
        let result = sample_result();
        assert_eq!(result.share_of("f"), frac(1, 2));
        assert_eq!(result.awards_for("f").count(), 2);
    }

    #[test]
    fn test_share_of_unknown_relative_is_zero() {
        assert!(sample_result().share_of("nobody").is_zero());
    }

    #[test]
    fn test_share_of_role() {
        assert_eq!(sample_result().share_of_role(Role::Daughter), frac(1, 2));
    }

    #[test]
    fn test_share_category_serialization() {
        assert_eq!(
            serde_json::to_string(&ShareCategory::Fixed).unwrap(),
            "\"fixed\""
        );
        let category: ShareCategory = serde_json::from_str("\"excluded\"").unwrap();
        assert_eq!(category, ShareCategory::Excluded);
    }

    #[test]
    fn test_award_serialization_skips_missing_amount() {
        let json = serde_json::to_value(award("w", Role::Wife, frac(1, 8), ShareCategory::Fixed))
            .unwrap();
        assert!(json.get("amount").is_none());
        assert_eq!(json["share"]["denominator"], 8);
        assert_eq!(json["role"], "wife");
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let back: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
