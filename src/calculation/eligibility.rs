//! Eligibility resolution (blocking).
//!
//! This module removes relatives whose entitlement is nullified by the
//! presence of a closer relative. The cascade is fixed; every rule is
//! evaluated against the living population, so the order in which the
//! rules are applied does not change the eligible set.

use std::collections::HashMap;

use crate::models::{AuditStep, ExcludedRelative, Relative, Role};

/// A single blocking rule: the presence of `blocker` nullifies `blocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockingRule {
    /// The role whose presence blocks.
    pub blocker: Role,
    /// The roles that lose their entitlement.
    pub blocked: &'static [Role],
}

/// The blocking cascade, in application order.
pub const BLOCKING_RULES: [BlockingRule; 4] = [
    BlockingRule {
        blocker: Role::Father,
        blocked: &[Role::PaternalGrandfather],
    },
    BlockingRule {
        blocker: Role::Mother,
        blocked: &[Role::PaternalGrandmother, Role::MaternalGrandmother],
    },
    BlockingRule {
        blocker: Role::Son,
        blocked: &[
            Role::FullBrother,
            Role::PaternalBrother,
            Role::MaternalBrother,
            Role::FullSister,
            Role::PaternalSister,
            Role::MaternalSister,
        ],
    },
    BlockingRule {
        blocker: Role::FullBrother,
        blocked: &[Role::PaternalBrother, Role::PaternalSister],
    },
];

/// The result of eligibility resolution.
#[derive(Debug, Clone)]
pub struct EligibilityResult {
    /// Living relatives that keep their entitlement, in input order.
    pub eligible: Vec<Relative>,
    /// Living relatives removed by blocking, in input order.
    pub excluded: Vec<ExcludedRelative>,
    /// Audit steps recording the alive filter and each blocking rule fired.
    pub audit_steps: Vec<AuditStep>,
}

/// Determines which declared relatives take part in the distribution.
///
/// Relatives who are not alive are dropped first. Each blocking rule whose
/// blocker is alive then removes the blocked roles; a relative caught by
/// several rules is attributed to the first. Nullification is never
/// reversed.
///
/// # Arguments
///
/// * `relatives` - Every declared relative, alive or not
/// * `step_number` - The step number for the first audit step
///
/// # Examples
///
/// ```
/// use estate_engine::calculation::resolve_eligibility;
/// use estate_engine::models::{Gender, Relative, Role};
///
/// let relatives = vec![
///     Relative::alive("s", Role::Son, Gender::Male),
///     Relative::alive("b", Role::FullBrother, Gender::Male),
/// ];
///
/// let result = resolve_eligibility(&relatives, 1);
/// assert_eq!(result.eligible.len(), 1);
/// assert_eq!(result.excluded[0].blocked_by, Role::Son);
/// ```
pub fn resolve_eligibility(relatives: &[Relative], step_number: u32) -> EligibilityResult {
    let mut step_number = step_number;
    let mut audit_steps = Vec::new();

    let (alive, dead): (Vec<&Relative>, Vec<&Relative>) =
        relatives.iter().partition(|relative| relative.alive);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "alive_filter".to_string(),
        rule_name: "Surviving Relatives".to_string(),
        reference: None,
        input: serde_json::json!({
            "declared": relatives.len()
        }),
        output: serde_json::json!({
            "alive": alive.len(),
            "dropped": dead.iter().map(|r| r.id.as_str()).collect::<Vec<_>>()
        }),
        reasoning: format!(
            "{} of {} declared relatives survived the deceased",
            alive.len(),
            relatives.len()
        ),
    });
    step_number += 1;

    let present = |role: Role| alive.iter().any(|relative| relative.role == role);

    // Blocked role -> first blocker in cascade order.
    let mut blocked_by: HashMap<Role, Role> = HashMap::new();
    for rule in BLOCKING_RULES.iter().filter(|rule| present(rule.blocker)) {
        let removed: Vec<&str> = alive
            .iter()
            .filter(|relative| rule.blocked.contains(&relative.role))
            .map(|relative| relative.id.as_str())
            .collect();

        if removed.is_empty() {
            continue;
        }

        for role in rule.blocked {
            blocked_by.entry(*role).or_insert(rule.blocker);
        }

        audit_steps.push(AuditStep {
            step_number,
            rule_id: format!("blocking_by_{}", rule.blocker),
            rule_name: "Exclusion by Closer Relative".to_string(),
            reference: None,
            input: serde_json::json!({
                "blocker": rule.blocker,
                "blocked_roles": rule.blocked
            }),
            output: serde_json::json!({
                "excluded": removed
            }),
            reasoning: format!(
                "Presence of {} excludes {}",
                rule.blocker,
                removed.join(", ")
            ),
        });
        step_number += 1;
    }

    let mut eligible = Vec::new();
    let mut excluded = Vec::new();
    for relative in alive {
        match blocked_by.get(&relative.role) {
            Some(blocker) => excluded.push(ExcludedRelative {
                relative_id: relative.id.clone(),
                role: relative.role,
                blocked_by: *blocker,
            }),
            None => eligible.push(relative.clone()),
        }
    }

    EligibilityResult {
        eligible,
        excluded,
        audit_steps,
    }
}
