//! Family context snapshot for rule-condition evaluation.
//!
//! This module provides [`FamilyContext`], a count of living relatives per
//! role together with the deceased's gender. Rule conditions from the
//! catalog are evaluated against it.

use std::collections::HashMap;

use crate::config::Condition;
use crate::models::{Deceased, Gender, Relative, Role};

/// A snapshot of the family configuration of one case.
///
/// Counts are taken over every living relative, including those later
/// excluded by blocking: an excluded sibling still reduces the mother's
/// share, for example.
///
/// # Example
///
/// ```
/// use estate_engine::calculation::FamilyContext;
/// use estate_engine::config::Condition;
/// use estate_engine::models::{Deceased, Gender, Relative, Role};
///
/// let relatives = vec![
///     Relative::alive("s1", Role::Son, Gender::Male),
///     Relative::alive("d1", Role::Daughter, Gender::Female),
/// ];
/// let context = FamilyContext::new(&Deceased { gender: Gender::Male }, &relatives);
///
/// assert!(context.has_descendants());
/// assert!(context.satisfies(&Condition::AnyPresent(vec![Role::Son])));
/// assert!(!context.satisfies(&Condition::NonePresent(vec![Role::Daughter])));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyContext {
    deceased_gender: Gender,
    counts: HashMap<Role, usize>,
}

impl FamilyContext {
    /// Builds the snapshot from the declared relatives, ignoring the dead.
    pub fn new(deceased: &Deceased, relatives: &[Relative]) -> Self {
        let mut counts = HashMap::new();
        for relative in relatives.iter().filter(|r| r.alive) {
            *counts.entry(relative.role).or_insert(0) += 1;
        }
        Self {
            deceased_gender: deceased.gender,
            counts,
        }
    }

    /// Returns the deceased's gender.
    pub fn deceased_gender(&self) -> Gender {
        self.deceased_gender
    }

    /// Returns the number of living relatives with the role.
    pub fn count(&self, role: Role) -> usize {
        self.counts.get(&role).copied().unwrap_or(0)
    }

    /// Returns the number of living relatives holding any of the roles.
    pub fn count_any(&self, roles: &[Role]) -> usize {
        roles.iter().map(|role| self.count(*role)).sum()
    }

    /// Returns true if at least one living relative holds any of the roles.
    pub fn has_any(&self, roles: &[Role]) -> bool {
        self.count_any(roles) > 0
    }

    /// Returns true if the deceased left children or son's children.
    pub fn has_descendants(&self) -> bool {
        self.has_any(&Role::DESCENDANTS)
    }

    /// Returns the number of living siblings of every kind.
    pub fn sibling_count(&self) -> usize {
        self.count_any(&Role::SIBLINGS)
    }

    /// Evaluates a rule condition against the snapshot.
    pub fn satisfies(&self, condition: &Condition) -> bool {
        match condition {
            Condition::Always => true,
            Condition::DeceasedGender(gender) => self.deceased_gender == *gender,
            Condition::AnyPresent(roles) => self.has_any(roles),
            Condition::NonePresent(roles) => !self.has_any(roles),
            Condition::AtLeast { roles, count } => self.count_any(roles) >= *count,
            Condition::Exactly { roles, count } => self.count_any(roles) == *count,
            Condition::All(conditions) => conditions.iter().all(|c| self.satisfies(c)),
            Condition::Any(conditions) => conditions.iter().any(|c| self.satisfies(c)),
            Condition::Not(inner) => !self.satisfies(inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(gender: Gender, relatives: &[Relative]) -> FamilyContext {
        FamilyContext::new(&Deceased { gender }, relatives)
    }

    fn dead(id: &str, role: Role, gender: Gender) -> Relative {
        let mut relative = Relative::alive(id, role, gender);
        relative.alive = false;
        relative
    }

    #[test]
    fn test_counts_only_living_relatives() {
        let relatives = vec![
            Relative::alive("s1", Role::Son, Gender::Male),
            dead("s2", Role::Son, Gender::Male),
        ];
        let ctx = context(Gender::Male, &relatives);

        assert_eq!(ctx.count(Role::Son), 1);
        assert_eq!(ctx.count(Role::Daughter), 0);
    }

    #[test]
    fn test_sibling_count_spans_all_kinds() {
        let relatives = vec![
            Relative::alive("a", Role::FullSister, Gender::Female),
            Relative::alive("b", Role::MaternalBrother, Gender::Male),
            Relative::alive("c", Role::PaternalSister, Gender::Female),
        ];
        assert_eq!(context(Gender::Male, &relatives).sibling_count(), 3);
    }

    #[test]
    fn test_no_descendants_when_only_parents() {
        let relatives = vec![
            Relative::alive("f", Role::Father, Gender::Male),
            Relative::alive("m", Role::Mother, Gender::Female),
        ];
        assert!(!context(Gender::Female, &relatives).has_descendants());
    }

    #[test]
    fn test_granddaughter_counts_as_descendant() {
        let relatives = vec![Relative::alive("g", Role::GranddaughterSon, Gender::Female)];
        assert!(context(Gender::Female, &relatives).has_descendants());
    }

    #[test]
    fn test_deceased_gender_condition() {
        let ctx = context(Gender::Female, &[]);
        assert!(ctx.satisfies(&Condition::DeceasedGender(Gender::Female)));
        assert!(!ctx.satisfies(&Condition::DeceasedGender(Gender::Male)));
    }

    #[test]
    fn test_at_least_and_exactly() {
        let relatives = vec![
            Relative::alive("d1", Role::Daughter, Gender::Female),
            Relative::alive("d2", Role::Daughter, Gender::Female),
        ];
        let ctx = context(Gender::Male, &relatives);

        assert!(ctx.satisfies(&Condition::AtLeast {
            roles: vec![Role::Daughter],
            count: 2
        }));
        assert!(!ctx.satisfies(&Condition::Exactly {
            roles: vec![Role::Daughter],
            count: 1
        }));
    }

    #[test]
    fn test_composite_conditions() {
        let relatives = vec![Relative::alive("w", Role::Wife, Gender::Female)];
        let ctx = context(Gender::Male, &relatives);

        let wife_quarter = Condition::All(vec![
            Condition::DeceasedGender(Gender::Male),
            Condition::NonePresent(Role::DESCENDANTS.to_vec()),
        ]);
        assert!(ctx.satisfies(&wife_quarter));
        assert!(!ctx.satisfies(&Condition::Not(Box::new(wife_quarter))));

        let either = Condition::Any(vec![
            Condition::AnyPresent(vec![Role::Son]),
            Condition::AnyPresent(vec![Role::Wife]),
        ]);
        assert!(ctx.satisfies(&either));
    }

    #[test]
    fn test_empty_all_and_any() {
        let ctx = context(Gender::Male, &[]);
        assert!(ctx.satisfies(&Condition::All(vec![])));
        assert!(!ctx.satisfies(&Condition::Any(vec![])));
    }
}
