//! Proportional reduction when fixed shares exceed the estate.
//!
//! When the exact sum of fixed shares is greater than one, every fixed
//! share is multiplied by the reciprocal of the sum. The awards keep their
//! relative proportions and add up to exactly one.

use tracing::info;

use crate::error::EngineResult;
use crate::models::{AuditStep, Fraction, ShareAward};

/// The outcome of an overflow correction.
#[derive(Debug, Clone)]
pub struct OverflowCorrection {
    /// The rescaled awards, in their original order.
    pub awards: Vec<ShareAward>,
    /// The exact sum of the shares before correction.
    pub original_total: Fraction,
    /// The factor every share was multiplied by.
    pub factor: Fraction,
    /// The audit step recording the correction.
    pub audit_step: AuditStep,
}

/// Returns the exact sum of the award shares.
pub fn total_share(awards: &[ShareAward]) -> Fraction {
    awards.iter().map(|award| award.share).sum()
}

/// Rescales the fixed awards if their sum exceeds one.
///
/// Returns `Ok(None)` when the total is at most one; the awards are then
/// left untouched.
///
/// # Examples
///
/// ```
/// use estate_engine::calculation::correct_overflow;
/// use estate_engine::models::{Fraction, Role, ShareAward, ShareCategory};
///
/// let award = |id: &str, n, d| ShareAward {
///     relative_id: id.to_string(),
///     role: Role::FullSister,
///     share: Fraction::new(n, d).unwrap(),
///     category: ShareCategory::Fixed,
///     amount: None,
///     reasoning: String::new(),
///     reference: None,
/// };
///
/// let awards = vec![award("a", 2, 3), award("b", 1, 2)];
/// let corrected = correct_overflow(&awards, 1).unwrap().unwrap();
///
/// assert_eq!(corrected.factor, Fraction::new(6, 7).unwrap());
/// assert_eq!(corrected.awards[0].share, Fraction::new(4, 7).unwrap());
/// assert_eq!(corrected.awards[1].share, Fraction::new(3, 7).unwrap());
/// ```
pub fn correct_overflow(
    awards: &[ShareAward],
    step_number: u32,
) -> EngineResult<Option<OverflowCorrection>> {
    let original_total = total_share(awards);
    if original_total <= Fraction::one() {
        return Ok(None);
    }

    let factor = original_total.reciprocal()?;

    let awards: Vec<ShareAward> = awards
        .iter()
        .map(|award| ShareAward {
            share: award.share.multiply(factor),
            reasoning: format!(
                "{}; reduced proportionally from {}",
                award.reasoning, award.share
            ),
            ..award.clone()
        })
        .collect();

    info!(
        original_total = %original_total,
        factor = %factor,
        "fixed shares exceed the estate, reducing proportionally"
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "overflow_correction".to_string(),
        rule_name: "Proportional Reduction".to_string(),
        reference: None,
        input: serde_json::json!({
            "total_fixed": original_total,
            "awards": awards.len()
        }),
        output: serde_json::json!({
            "factor": factor,
            "total_after": total_share(&awards)
        }),
        reasoning: format!(
            "Fixed shares sum to {} which exceeds the estate; every share is multiplied by {}",
            original_total, factor
        ),
    };

    Ok(Some(OverflowCorrection {
        awards,
        original_total,
        factor,
        audit_step,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, ShareCategory};

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    fn award(id: &str, role: Role, share: Fraction) -> ShareAward {
        ShareAward {
            relative_id: id.to_string(),
            role,
            share,
            category: ShareCategory::Fixed,
            amount: None,
            reasoning: "fixed".to_string(),
            reference: None,
        }
    }

    #[test]
    fn test_no_correction_at_exactly_one() {
        let awards = vec![
            award("h", Role::Husband, frac(1, 2)),
            award("s", Role::FullSister, frac(1, 2)),
        ];
        assert!(correct_overflow(&awards, 1).unwrap().is_none());
    }

    #[test]
    fn test_no_correction_for_empty_awards() {
        assert!(correct_overflow(&[], 1).unwrap().is_none());
    }

    #[test]
    fn test_five_quarters_scaled_by_four_fifths() {
        let awards = vec![
            award("w", Role::Wife, frac(1, 4)),
            award("s1", Role::FullSister, frac(1, 3)),
            award("s2", Role::FullSister, frac(1, 3)),
            award("m", Role::Mother, frac(1, 3)),
        ];

        let corrected = correct_overflow(&awards, 4).unwrap().unwrap();

        assert_eq!(corrected.original_total, frac(5, 4));
        assert_eq!(corrected.factor, frac(4, 5));
        assert_eq!(corrected.awards[0].share, frac(1, 5));
        assert_eq!(corrected.awards[1].share, frac(4, 15));
        assert_eq!(total_share(&corrected.awards), Fraction::one());
        assert_eq!(corrected.audit_step.step_number, 4);
    }

    #[test]
    fn test_correction_keeps_order_and_metadata() {
        let awards = vec![
            award("h", Role::Husband, frac(1, 2)),
            award("s1", Role::FullSister, frac(1, 3)),
            award("s2", Role::FullSister, frac(1, 3)),
        ];

        let corrected = correct_overflow(&awards, 1).unwrap().unwrap();

        let ids: Vec<&str> = corrected
            .awards
            .iter()
            .map(|a| a.relative_id.as_str())
            .collect();
        assert_eq!(ids, vec!["h", "s1", "s2"]);
        assert_eq!(corrected.awards[0].share, frac(3, 7));
        assert!(corrected.awards[0].reasoning.contains("reduced proportionally from 1/2"));
    }
}
