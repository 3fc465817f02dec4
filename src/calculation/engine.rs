//! End-to-end distribution of an estate.

use std::time::Instant;

use tracing::{debug, info};

use crate::config::RuleCatalog;
use crate::error::EngineResult;
use crate::models::{CalculationResult, Fraction, InheritanceCase};

use super::{
    assemble_result, assign_fixed_shares, correct_overflow, distribute_residual,
    resolve_eligibility, total_share, Distribution, FamilyContext,
};

/// Distributes an estate among the relatives of a case.
///
/// Runs the full pipeline: validation, eligibility, fixed shares, then
/// either the proportional reduction (fixed shares above one) or the
/// residual split, and finally amounts and the summary. The function is
/// pure: the same case and catalog always produce the same result.
///
/// # Errors
///
/// Returns `InvalidInput` when the case fails validation, and
/// `CalculationError` if an amount overflows.
///
/// # Examples
///
/// ```no_run
/// use estate_engine::calculation::calculate_distribution;
/// use estate_engine::config::ConfigLoader;
/// use estate_engine::models::{Deceased, Fraction, Gender, InheritanceCase, Relative, Role};
///
/// let loader = ConfigLoader::load("config/faraid").unwrap();
/// let case = InheritanceCase::new(
///     Deceased { gender: Gender::Male },
///     vec![
///         Relative::alive("mother", Role::Mother, Gender::Female),
///         Relative::alive("father", Role::Father, Gender::Male),
///     ],
/// );
///
/// let result = calculate_distribution(&case, loader.catalog()).unwrap();
/// assert_eq!(result.share_of("mother"), Fraction::new(1, 3).unwrap());
/// assert_eq!(result.share_of("father"), Fraction::new(2, 3).unwrap());
/// assert_eq!(result.total_awarded, Fraction::one());
/// ```
pub fn calculate_distribution(
    case: &InheritanceCase,
    catalog: &RuleCatalog,
) -> EngineResult<CalculationResult> {
    let start_time = Instant::now();
    case.validate()?;

    let mut audit_trace = Vec::new();
    let mut step_number: u32 = 1;

    let context = FamilyContext::new(&case.deceased, &case.relatives);

    let eligibility = resolve_eligibility(&case.relatives, step_number);
    step_number += eligibility.audit_steps.len() as u32;
    audit_trace.extend(eligibility.audit_steps);
    debug!(
        eligible = eligibility.eligible.len(),
        excluded = eligibility.excluded.len(),
        "eligibility resolved"
    );

    let fixed = assign_fixed_shares(&eligibility.eligible, &context, catalog, step_number)?;
    step_number += fixed.audit_steps.len() as u32;
    audit_trace.extend(fixed.audit_steps);

    let total_fixed = total_share(&fixed.awards);
    debug!(total_fixed = %total_fixed, awards = fixed.awards.len(), "fixed shares assigned");

    let distribution = match correct_overflow(&fixed.awards, step_number)? {
        Some(correction) => {
            audit_trace.push(correction.audit_step);
            Distribution {
                awards: correction.awards,
                excluded: eligibility.excluded,
                overflow_corrected: true,
                unassigned: Fraction::zero(),
                audit_trace,
            }
        }
        None => {
            let remainder = Fraction::one().subtract(total_fixed);
            let residual = distribute_residual(
                &eligibility.eligible,
                &context,
                catalog,
                remainder,
                step_number,
            )?;
            audit_trace.push(residual.audit_step);

            let mut awards = fixed.awards;
            awards.extend(residual.awards);
            Distribution {
                awards,
                excluded: eligibility.excluded,
                overflow_corrected: false,
                unassigned: residual.unassigned,
                audit_trace,
            }
        }
    };

    let result = assemble_result(&case.deceased, case.estate_value, distribution)?;

    info!(
        relatives = case.relatives.len(),
        awards = result.awards.len(),
        total_awarded = %result.total_awarded,
        unassigned = %result.unassigned,
        overflow_corrected = result.overflow_corrected,
        duration_us = start_time.elapsed().as_micros() as u64,
        "distribution calculated"
    );

    Ok(result)
}
