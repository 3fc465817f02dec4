//! Localized rendering of a calculation result.

use std::collections::HashMap;

use crate::models::{CalculationResult, InheritanceCase, Relative, Role};

use super::{Locale, MessageCatalog};

/// Renders a localized, multi-line summary of a calculation result.
///
/// Unlike [`CalculationResult::summary`], which is always English and
/// carries the rule explanations, this summary is built entirely from the
/// message tables and shows the citation behind each award.
pub fn render_summary(
    result: &CalculationResult,
    case: &InheritanceCase,
    messages: &MessageCatalog,
    locale: Locale,
) -> String {
    let names: HashMap<&str, &Relative> = case
        .relatives
        .iter()
        .map(|relative| (relative.id.as_str(), relative))
        .collect();
    let display_name = |id: &str| -> String {
        names
            .get(id)
            .map(|relative| relative.display_name().to_string())
            .unwrap_or_else(|| id.to_string())
    };
    let role_name = |role: Role| messages.get(locale, &role_key(role)).to_string();

    let gender_key = format!("gender.{}", case.deceased.gender);
    let mut lines = vec![
        messages.format(
            locale,
            "summary.header",
            &[("gender", messages.get(locale, &gender_key))],
        ),
        String::new(),
    ];

    if result.overflow_corrected {
        lines.push(messages.get(locale, "summary.overflow").to_string());
        lines.push(String::new());
    }

    for award in &result.awards {
        let category_key = format!("category.{}", award.category.as_str());
        let name = display_name(&award.relative_id);
        let role = role_name(award.role);
        let share = award.share.to_string();
        let mut line = messages.format(
            locale,
            "summary.award",
            &[
                ("name", name.as_str()),
                ("role", role.as_str()),
                ("category", messages.get(locale, &category_key)),
                ("share", share.as_str()),
            ],
        );
        if let Some(amount) = award.amount {
            let amount = amount.round_dp(2).normalize().to_string();
            line.push(' ');
            line.push_str(&messages.format(
                locale,
                "summary.amount",
                &[("amount", amount.as_str())],
            ));
        }
        lines.push(line);
        if let Some(reference) = award.reference.as_deref() {
            lines.push(format!(
                "  {}",
                messages.format(locale, "summary.reference", &[("reference", reference)])
            ));
        }
    }

    if result.unassigned.is_positive() {
        let share = result.unassigned.to_string();
        lines.push(String::new());
        lines.push(messages.format(locale, "summary.unassigned", &[("share", share.as_str())]));
    }

    if !result.excluded.is_empty() {
        lines.push(String::new());
        lines.push(messages.get(locale, "summary.excluded_header").to_string());
        for excluded in &result.excluded {
            let name = display_name(&excluded.relative_id);
            let role = role_name(excluded.role);
            let blocked_by = role_name(excluded.blocked_by);
            lines.push(messages.format(
                locale,
                "summary.excluded",
                &[
                    ("name", name.as_str()),
                    ("role", role.as_str()),
                    ("blocked_by", blocked_by.as_str()),
                ],
            ));
        }
    }

    if let Some(role) = case.user_role {
        let name = role_name(role);
        let share = result.share_of_role(role).to_string();
        lines.push(String::new());
        lines.push(messages.format(
            locale,
            "summary.user_share",
            &[("role", name.as_str()), ("share", share.as_str())],
        ));
    }

    lines.join("\n")
}

fn role_key(role: Role) -> String {
    format!("role.{}", role)
}
