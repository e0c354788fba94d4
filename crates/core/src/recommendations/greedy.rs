use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;

use crate::balance::ensure_record_amount;
use crate::constants::{DEFAULT_MAX_CUT_FRACTION, DISPLAY_DECIMAL_PRECISION};
use crate::errors::{Result, ValidationError};

use super::recommendations_model::{
    ExpenseInput, RecommendationItem, RecommendationRequest, RecommendationsReport,
};

fn round2(value: Decimal) -> Decimal {
    value.round_dp(DISPLAY_DECIMAL_PRECISION)
}

fn default_cut_fraction() -> Decimal {
    Decimal::from_str(DEFAULT_MAX_CUT_FRACTION).unwrap_or(Decimal::ZERO)
}

/// Covers the overspend by trimming non-essential expenses, largest first,
/// each by at most its allowed fraction.
///
/// Expenses are visited non-essential first and by descending amount; every
/// visited expense appears in the result (essential ones unchanged) until the
/// overspend is covered.
pub fn greedy_recommendations(request: &RecommendationRequest) -> Result<RecommendationsReport> {
    if request.budget < Decimal::ZERO {
        return Err(ValidationError::field("budget", "must not be negative").into());
    }
    if request.expenses.iter().any(|e| e.amount < Decimal::ZERO) {
        return Err(ValidationError::field("expenses", "amounts must not be negative").into());
    }
    ensure_record_amount("budget", request.budget)?;
    for expense in &request.expenses {
        ensure_record_amount("expenses", expense.amount)?;
    }

    let total_expenses = round2(request.expenses.iter().map(|e| e.amount).sum());
    let overspend = round2(total_expenses - request.budget);
    let total_budget = round2(request.budget);

    if overspend <= Decimal::ZERO {
        return Ok(RecommendationsReport {
            total_budget,
            total_expenses,
            overspend: Decimal::ZERO,
            recommendations: Vec::new(),
        });
    }

    let mut ordered: Vec<&ExpenseInput> = request.expenses.iter().collect();
    ordered.sort_by(|a, b| {
        a.essential
            .cmp(&b.essential)
            .then_with(|| b.amount.cmp(&a.amount))
    });

    let mut remaining_cut = overspend;
    let mut recommendations = Vec::new();
    for expense in ordered {
        let original = round2(expense.amount);
        let mut reduced = Decimal::ZERO;

        if !expense.essential {
            let fraction = expense
                .max_cut_fraction
                .unwrap_or_else(default_cut_fraction)
                .clamp(Decimal::ZERO, Decimal::ONE);
            let cut = round2(original * fraction).min(remaining_cut);
            reduced = cut;
            remaining_cut = round2(remaining_cut - cut);
        }

        let reduced_by_percent = if original.is_zero() {
            Decimal::ZERO
        } else {
            round2(reduced * Decimal::ONE_HUNDRED / original)
        };
        recommendations.push(RecommendationItem {
            id: expense.id.clone(),
            name: expense.name.clone(),
            category: expense.category.clone(),
            original_amount: original,
            recommended_amount: round2(original - reduced),
            reduced_by: reduced,
            reduced_by_percent,
        });

        if remaining_cut <= Decimal::ZERO {
            break;
        }
    }

    if remaining_cut > Decimal::ZERO {
        debug!("Recommendations leave {} of overspend uncovered", remaining_cut);
    }

    Ok(RecommendationsReport {
        total_budget,
        total_expenses,
        overspend,
        recommendations,
    })
}
