//! Result assembly.
//!
//! Attaches monetary amounts to the awards, totals them and renders the
//! plain English summary carried in [`CalculationResult::summary`].

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    AuditStep, CalculationResult, Deceased, ExcludedRelative, Fraction, ShareAward,
};

/// Everything the engine decided, before amounts and totals.
#[derive(Debug, Clone)]
pub struct Distribution {
    /// Fixed awards followed by residual awards.
    pub awards: Vec<ShareAward>,
    /// Relatives removed by blocking.
    pub excluded: Vec<ExcludedRelative>,
    /// Whether fixed shares were reduced proportionally.
    pub overflow_corrected: bool,
    /// The part of the estate no heir received.
    pub unassigned: Fraction,
    /// Audit steps recorded so far.
    pub audit_trace: Vec<AuditStep>,
}

/// Builds the final [`CalculationResult`].
///
/// When `estate_value` is present each award gets `estate × share`; the
/// computation is exact to the precision of [`Decimal`]. A step recording
/// the amounts is appended to the audit trace.
///
/// # Errors
///
/// Returns `CalculationError` if an amount overflows `Decimal`.
pub fn assemble_result(
    deceased: &Deceased,
    estate_value: Option<Decimal>,
    distribution: Distribution,
) -> EngineResult<CalculationResult> {
    let Distribution {
        mut awards,
        excluded,
        overflow_corrected,
        unassigned,
        mut audit_trace,
    } = distribution;

    if let Some(estate) = estate_value {
        for award in &mut awards {
            award.amount = Some(award.share.apply_to(estate)?);
        }

        let amounts: Vec<serde_json::Value> = awards
            .iter()
            .map(|award| {
                serde_json::json!({
                    "relative_id": award.relative_id,
                    "share": award.share,
                    "amount": award.amount
                })
            })
            .collect();
        audit_trace.push(AuditStep {
            step_number: audit_trace.len() as u32 + 1,
            rule_id: "estate_amounts".to_string(),
            rule_name: "Monetary Amounts".to_string(),
            reference: None,
            input: serde_json::json!({ "estate_value": estate }),
            output: serde_json::json!({ "amounts": amounts }),
            reasoning: format!(
                "Estate of {} divided according to {} award(s)",
                estate.normalize(),
                awards.len()
            ),
        });
    }

    let total_awarded: Fraction = awards.iter().map(|award| award.share).sum();
    let summary = render_english_summary(deceased, &awards, overflow_corrected, unassigned);

    Ok(CalculationResult {
        awards,
        total_awarded,
        overflow_corrected,
        unassigned,
        excluded,
        audit_trace,
        summary,
    })
}

fn render_english_summary(
    deceased: &Deceased,
    awards: &[ShareAward],
    overflow_corrected: bool,
    unassigned: Fraction,
) -> String {
    let mut summary = format!("Inheritance calculation for deceased {}:\n\n", deceased.gender);

    if overflow_corrected {
        summary.push_str(
            "Fixed shares exceed the whole estate, so all shares are reduced proportionally.\n\n",
        );
    }

    for award in awards {
        summary.push_str(&format!(
            "- {}: {}",
            award.category.as_str().to_uppercase(),
            award.share
        ));
        if let Some(amount) = award.amount {
            summary.push_str(&format!(" ({} currency units)", amount.round_dp(2).normalize()));
        }
        summary.push_str(&format!("\n  {}\n\n", award.reasoning));
    }

    if unassigned.is_positive() {
        summary.push_str(&format!(
            "{} of the estate is not assigned to any heir.\n",
            unassigned
        ));
    }

    summary
}
