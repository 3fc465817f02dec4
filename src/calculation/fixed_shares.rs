//! Fixed-share assignment.
//!
//! Each eligible relative is matched against its role's candidate rules.
//! The first rule whose condition holds is the relative's rule; fixed rules
//! produce an award here, residual rules are left to
//! [`distribute_residual`](super::distribute_residual).

use tracing::debug;

use crate::config::{Rule, RuleCatalog};
use crate::error::EngineResult;
use crate::models::{AuditStep, Fraction, Relative, Role, ShareAward, ShareCategory};

use super::FamilyContext;

/// The result of fixed-share assignment.
#[derive(Debug, Clone)]
pub struct FixedShareResult {
    /// One award per relative whose selected rule is fixed.
    pub awards: Vec<ShareAward>,
    /// One audit step per eligible relative.
    pub audit_steps: Vec<AuditStep>,
}

/// Returns the first candidate rule for `role` whose condition holds.
///
/// Returns `None` when the catalog has no entry for the role or when no
/// candidate applies to this family.
///
/// # Examples
///
/// ```no_run
/// use estate_engine::calculation::{select_rule, FamilyContext};
/// use estate_engine::config::ConfigLoader;
/// use estate_engine::models::{Deceased, Gender, Relative, Role};
///
/// let loader = ConfigLoader::load("config/faraid").unwrap();
/// let relatives = vec![
///     Relative::alive("w", Role::Wife, Gender::Female),
///     Relative::alive("s", Role::Son, Gender::Male),
/// ];
/// let context = FamilyContext::new(&Deceased { gender: Gender::Male }, &relatives);
///
/// let rule = select_rule(Role::Wife, &context, loader.catalog()).unwrap();
/// assert_eq!(rule.id, "wife_eighth");
/// ```
pub fn select_rule<'a>(
    role: Role,
    context: &FamilyContext,
    catalog: &'a RuleCatalog,
) -> Option<&'a Rule> {
    catalog
        .rules_for(role)?
        .iter()
        .find(|rule| context.satisfies(&rule.condition))
}

/// Assigns fixed shares to the eligible relatives.
///
/// Relatives without a catalog entry or without an applicable rule are
/// skipped. When the selected rule names a `shared_among` group, its share
/// is divided equally among every eligible relative whose own selected
/// fixed rule names the same group.
///
/// # Arguments
///
/// * `eligible` - Relatives that survived eligibility resolution
/// * `context` - The family snapshot conditions are evaluated against
/// * `catalog` - The rule catalog
/// * `step_number` - The step number for the first audit step
///
/// # Errors
///
/// Returns an error only if a group share cannot be divided, which a
/// non-empty group never triggers.
pub fn assign_fixed_shares(
    eligible: &[Relative],
    context: &FamilyContext,
    catalog: &RuleCatalog,
    step_number: u32,
) -> EngineResult<FixedShareResult> {
    let selections: Vec<(&Relative, Option<&Rule>)> = eligible
        .iter()
        .map(|relative| (relative, select_rule(relative.role, context, catalog)))
        .collect();

    let mut awards = Vec::new();
    let mut audit_steps = Vec::new();

    for (index, (relative, selected)) in selections.iter().enumerate() {
        let step_number = step_number + index as u32;

        let Some(rule) = selected else {
            debug!(relative_id = %relative.id, role = %relative.role, "no applicable rule");
            audit_steps.push(selection_step(
                step_number,
                relative,
                None,
                serde_json::json!({ "selected": null }),
                format!("No rule applies to {} in this family", relative.role),
            ));
            continue;
        };

        if rule.is_residual() {
            debug!(relative_id = %relative.id, rule_id = %rule.id, "deferred to residual");
            audit_steps.push(selection_step(
                step_number,
                relative,
                Some(rule),
                serde_json::json!({
                    "selected": rule.id,
                    "category": rule.category
                }),
                format!("{} takes part in the remainder", relative.role),
            ));
            continue;
        }

        let group_size = if rule.shared_among.is_empty() {
            1
        } else {
            selections
                .iter()
                .filter(|(_, other)| {
                    other.is_some_and(|other| {
                        other.is_fixed() && same_group(&other.shared_among, &rule.shared_among)
                    })
                })
                .count()
                .max(1)
        };

        let share = rule
            .share
            .divide(Fraction::from_integer(group_size as i64))?;

        let reasoning = if group_size > 1 {
            format!(
                "{}; {} shared equally among {}",
                rule.explanation, rule.share, group_size
            )
        } else {
            rule.explanation.clone()
        };

        debug!(
            relative_id = %relative.id,
            rule_id = %rule.id,
            share = %share,
            "fixed share assigned"
        );

        audit_steps.push(selection_step(
            step_number,
            relative,
            Some(rule),
            serde_json::json!({
                "rule_share": rule.share,
                "group_size": group_size,
                "share": share,
                "category": ShareCategory::Fixed
            }),
            reasoning.clone(),
        ));

        awards.push(ShareAward {
            relative_id: relative.id.clone(),
            role: relative.role,
            share,
            category: ShareCategory::Fixed,
            amount: None,
            reasoning,
            reference: Some(rule.reference.clone()),
        });
    }

    Ok(FixedShareResult {
        awards,
        audit_steps,
    })
}

/// Audit step recording the rule chosen for one relative.
fn selection_step(
    step_number: u32,
    relative: &Relative,
    rule: Option<&Rule>,
    output: serde_json::Value,
    reasoning: String,
) -> AuditStep {
    let (rule_id, rule_name) = match rule {
        None => ("no_applicable_rule".to_string(), "Rule Selection"),
        Some(rule) if rule.is_residual() => (rule.id.clone(), "Rule Selection"),
        Some(rule) => (rule.id.clone(), "Fixed Share"),
    };
    AuditStep {
        step_number,
        rule_id,
        rule_name: rule_name.to_string(),
        reference: rule.map(|rule| rule.reference.clone()),
        input: serde_json::json!({
            "relative_id": relative.id,
            "role": relative.role
        }),
        output,
        reasoning,
    }
}

fn same_group(a: &[Role], b: &[Role]) -> bool {
    a.len() == b.len() && a.iter().all(|role| b.contains(role))
}
