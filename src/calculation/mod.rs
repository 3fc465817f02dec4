//! Calculation logic for the Estate Distribution Engine.
//!
//! This module contains the stages of a distribution: the family context
//! rule conditions are evaluated against, eligibility resolution (blocking),
//! fixed-share assignment, proportional reduction when fixed shares exceed
//! the estate, residual distribution and result assembly.
//! [`calculate_distribution`] runs them in order.

mod assembler;
mod eligibility;
mod engine;
mod family_context;
mod fixed_shares;
mod overflow;
mod residual;

pub use assembler::{Distribution, assemble_result};
pub use eligibility::{BLOCKING_RULES, BlockingRule, EligibilityResult, resolve_eligibility};
pub use engine::calculate_distribution;
pub use family_context::FamilyContext;
pub use fixed_shares::{FixedShareResult, assign_fixed_shares, select_rule};
pub use overflow::{OverflowCorrection, correct_overflow, total_share};
pub use residual::{
    ResidualCandidate, ResidualResult, distribute_residual, find_residual_candidates,
};
