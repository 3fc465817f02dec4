//! Residual distribution.
//!
//! Whatever the fixed shares leave over goes to the residual heirs of the
//! best residual rank. Heirs of that rank split the remainder in proportion
//! to the weight carried by their residual rule, which gives the 2:1 split
//! between a son and a daughter.

use tracing::debug;

use crate::config::{Rule, RuleCatalog};
use crate::error::EngineResult;
use crate::models::{AuditStep, Fraction, Relative, ShareAward, ShareCategory};

use super::FamilyContext;

/// An eligible relative entitled to part of the remainder.
#[derive(Debug, Clone, Copy)]
pub struct ResidualCandidate<'a> {
    /// The relative.
    pub relative: &'a Relative,
    /// The first applicable residual rule for the relative's role.
    pub rule: &'a Rule,
    /// The effective residual rank; lower takes precedence.
    pub rank: u32,
}

/// The result of residual distribution.
#[derive(Debug, Clone)]
pub struct ResidualResult {
    /// One award per heir of the best rank.
    pub awards: Vec<ShareAward>,
    /// The part of the remainder nobody received.
    pub unassigned: Fraction,
    /// The audit step recording the split.
    pub audit_step: AuditStep,
}

/// Finds every eligible relative with at least one applicable residual rule.
///
/// A relative whose first applicable rule is fixed still qualifies when a
/// later residual rule applies too: a father alongside a daughter takes
/// 1/6 and then the remainder.
pub fn find_residual_candidates<'a>(
    eligible: &'a [Relative],
    context: &FamilyContext,
    catalog: &'a RuleCatalog,
) -> Vec<ResidualCandidate<'a>> {
    eligible
        .iter()
        .filter_map(|relative| {
            let rule = catalog
                .rules_for(relative.role)?
                .iter()
                .find(|rule| rule.is_residual() && context.satisfies(&rule.condition))?;
            let rank = catalog.residual_priority(rule.ranks_with.unwrap_or(relative.role));
            Some(ResidualCandidate {
                relative,
                rule,
                rank,
            })
        })
        .collect()
}

/// Splits the remainder among the residual heirs of the best rank.
///
/// If there is no candidate, or the remainder is zero, nothing is awarded
/// and the remainder is reported as unassigned.
///
/// # Arguments
///
/// * `eligible` - Relatives that survived eligibility resolution
/// * `context` - The family snapshot conditions are evaluated against
/// * `catalog` - The rule catalog
/// * `remainder` - One minus the fixed shares
/// * `step_number` - The step number for the audit step
///
/// # Errors
///
/// Returns `DivisionByZero` if the winning heirs' weights sum to zero.
///
/// # Examples
///
/// ```no_run
/// use estate_engine::calculation::{distribute_residual, FamilyContext};
/// use estate_engine::config::ConfigLoader;
/// use estate_engine::models::{Deceased, Fraction, Gender, Relative, Role};
///
/// let loader = ConfigLoader::load("config/faraid").unwrap();
/// let relatives = vec![
///     Relative::alive("s", Role::Son, Gender::Male),
///     Relative::alive("d", Role::Daughter, Gender::Female),
/// ];
/// let context = FamilyContext::new(&Deceased { gender: Gender::Male }, &relatives);
///
/// let result =
///     distribute_residual(&relatives, &context, loader.catalog(), Fraction::one(), 1).unwrap();
/// assert_eq!(result.awards[0].share, Fraction::new(2, 3).unwrap());
/// assert_eq!(result.awards[1].share, Fraction::new(1, 3).unwrap());
/// ```
pub fn distribute_residual(
    eligible: &[Relative],
    context: &FamilyContext,
    catalog: &RuleCatalog,
    remainder: Fraction,
    step_number: u32,
) -> EngineResult<ResidualResult> {
    let candidates = find_residual_candidates(eligible, context, catalog);

    let best_rank = candidates.iter().map(|candidate| candidate.rank).min();
    let best_rank = match best_rank {
        Some(rank) if remainder.is_positive() => rank,
        _ => {
            debug!(
                remainder = %remainder,
                candidates = candidates.len(),
                "remainder left unassigned"
            );
            return Ok(ResidualResult {
                awards: Vec::new(),
                unassigned: remainder,
                audit_step: AuditStep {
                    step_number,
                    rule_id: "residual_distribution".to_string(),
                    rule_name: "Residual Distribution".to_string(),
                    reference: None,
                    input: serde_json::json!({
                        "remainder": remainder,
                        "candidates": candidates.len()
                    }),
                    output: serde_json::json!({ "unassigned": remainder }),
                    reasoning: if candidates.is_empty() {
                        format!("No residual heir present; {} remains unassigned", remainder)
                    } else {
                        "Fixed shares exhaust the estate; nothing remains for residual heirs"
                            .to_string()
                    },
                },
            });
        }
    };

    let winners: Vec<&ResidualCandidate> = candidates
        .iter()
        .filter(|candidate| candidate.rank == best_rank)
        .collect();
    let total_weight: Fraction = winners.iter().map(|candidate| candidate.rule.share).sum();

    let mut awards = Vec::with_capacity(winners.len());
    for candidate in &winners {
        let portion = candidate.rule.share.divide(total_weight)?;
        let share = remainder.multiply(portion);

        debug!(
            relative_id = %candidate.relative.id,
            rule_id = %candidate.rule.id,
            rank = candidate.rank,
            share = %share,
            "residual share assigned"
        );

        awards.push(ShareAward {
            relative_id: candidate.relative.id.clone(),
            role: candidate.relative.role,
            share,
            category: ShareCategory::Residual,
            amount: None,
            reasoning: format!(
                "{}; receives {} of the remainder {}",
                candidate.rule.explanation, portion, remainder
            ),
            reference: Some(candidate.rule.reference.clone()),
        });
    }

    let candidate_log: Vec<serde_json::Value> = candidates
        .iter()
        .map(|c| {
            serde_json::json!({
                "relative_id": c.relative.id,
                "rule_id": c.rule.id,
                "rank": c.rank
            })
        })
        .collect();
    let award_log: Vec<serde_json::Value> = awards
        .iter()
        .map(|a| serde_json::json!({ "relative_id": a.relative_id, "share": a.share }))
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "residual_distribution".to_string(),
        rule_name: "Residual Distribution".to_string(),
        reference: None,
        input: serde_json::json!({
            "remainder": remainder,
            "candidates": candidate_log
        }),
        output: serde_json::json!({
            "rank": best_rank,
            "total_weight": total_weight,
            "awards": award_log
        }),
        reasoning: format!(
            "Remainder {} split among {} heir(s) of residual rank {}",
            remainder,
            winners.len(),
            best_rank
        ),
    };

    Ok(ResidualResult {
        awards,
        unassigned: Fraction::zero(),
        audit_step,
    })
}
