use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::balance::{checked_sum, TransactionTotals};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, MAX_SERIES_MONTHS};
use crate::errors::{Result, ValidationError};
use crate::transactions::{Transaction, TransactionKind};
use crate::utils::time_utils::{days_in_month, trailing_month_starts};

use super::reports_model::{
    DailyExpenseData, ExpenseCategoryData, ExpenseCategoryReport, IncomeTrendData,
    IncomeTrendReport, MonthlySummary, SavingsEvolutionData, SavingsEvolutionReport,
    WeeklyExpensesReport, MONTH_LABELS, WEEKDAY_LABELS,
};

fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (part * Decimal::ONE_HUNDRED / whole).round_dp(DISPLAY_DECIMAL_PRECISION)
}

fn validate_months(months: u32) -> Result<()> {
    if !(1..=MAX_SERIES_MONTHS).contains(&months) {
        return Err(ValidationError::field(
            "months",
            format!("must be between 1 and {}", MAX_SERIES_MONTHS),
        )
        .into());
    }
    Ok(())
}

fn on_or_between(t: &Transaction, from: NaiveDate, to: NaiveDate) -> bool {
    let day = t.date.date();
    day >= from && day <= to
}

pub fn monthly_summary(transactions: &[Transaction], year: i32, month: u32) -> Result<MonthlySummary> {
    let last_day = days_in_month(year, month)
        .ok_or_else(|| ValidationError::field("month", "must be between 1 and 12"))?;
    let from = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ValidationError::field("year", "is out of range"))?;
    let to = from + Duration::days(i64::from(last_day) - 1);

    let totals = TransactionTotals::from_transactions(
        transactions.iter().filter(|t| on_or_between(t, from, to)),
    )?;
    let balance = totals.net()?;

    Ok(MonthlySummary {
        month: format!("{}-{:02}", year, month),
        year,
        total_income: totals.income,
        total_expenses: totals.expense,
        balance,
        savings_percentage: percentage(balance, totals.income),
        transaction_count: totals.income_count + totals.expense_count,
        income_count: totals.income_count,
        expense_count: totals.expense_count,
    })
}

/// Expenses per category between two dates (inclusive), largest first.
pub fn expense_category_report(
    transactions: &[Transaction],
    from: NaiveDate,
    to: NaiveDate,
) -> Result<ExpenseCategoryReport> {
    if from > to {
        return Err(ValidationError::field("start_date", "must not be after end_date").into());
    }

    let mut per_category: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && on_or_between(t, from, to))
    {
        let entry = per_category
            .entry(t.category.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += t.amount;
        entry.1 += 1;
    }

    let total_expenses: Decimal = per_category.values().map(|(amount, _)| *amount).sum();
    let mut categories: Vec<ExpenseCategoryData> = per_category
        .into_iter()
        .map(|(category, (amount, count))| ExpenseCategoryData {
            category: category.to_string(),
            amount,
            percentage: percentage(amount, total_expenses),
            transaction_count: count,
        })
        .collect();
    categories.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));

    Ok(ExpenseCategoryReport {
        period_start: from,
        period_end: to,
        total_expenses,
        categories,
    })
}

/// Seven daily expense totals starting at `week_start`.
pub fn weekly_expenses_report(
    transactions: &[Transaction],
    week_start: NaiveDate,
) -> WeeklyExpensesReport {
    let week_end = week_start + Duration::days(6);
    let daily_data: Vec<DailyExpenseData> = (0..7)
        .map(|offset| {
            let date = week_start + Duration::days(offset);
            let (amount, count) = transactions
                .iter()
                .filter(|t| t.kind == TransactionKind::Expense && t.date.date() == date)
                .fold((Decimal::ZERO, 0), |(sum, n), t| (sum + t.amount, n + 1));
            DailyExpenseData {
                day: WEEKDAY_LABELS[date.weekday().num_days_from_monday() as usize].to_string(),
                date,
                amount,
                transaction_count: count,
            }
        })
        .collect();

    let total_week_expenses: Decimal = daily_data.iter().map(|d| d.amount).sum();
    WeeklyExpensesReport {
        week_start,
        week_end,
        daily_data,
        total_week_expenses,
        average_daily_expense: (total_week_expenses / Decimal::from(7))
            .round_dp(DISPLAY_DECIMAL_PRECISION),
    }
}

/// Income per month for the `months` months ending with the month of `today`.
pub fn income_trend_report(
    transactions: &[Transaction],
    today: NaiveDate,
    months: u32,
) -> Result<IncomeTrendReport> {
    validate_months(months)?;

    let mut per_month: HashMap<(i32, u32), (Decimal, usize)> = HashMap::new();
    for t in transactions.iter().filter(|t| t.kind == TransactionKind::Income) {
        let entry = per_month
            .entry((t.date.year(), t.date.month()))
            .or_insert((Decimal::ZERO, 0));
        entry.0 += t.amount;
        entry.1 += 1;
    }

    let starts = trailing_month_starts(today, months);
    let monthly_data: Vec<IncomeTrendData> = starts
        .iter()
        .map(|start| {
            let (amount, count) = per_month
                .get(&(start.year(), start.month()))
                .copied()
                .unwrap_or((Decimal::ZERO, 0));
            IncomeTrendData {
                period: start.format("%Y-%m").to_string(),
                month: MONTH_LABELS[start.month0() as usize].to_string(),
                year: start.year(),
                amount,
                transaction_count: count,
            }
        })
        .collect();

    let total_income: Decimal = monthly_data.iter().map(|m| m.amount).sum();
    let average_monthly_income = if monthly_data.is_empty() {
        Decimal::ZERO
    } else {
        (total_income / Decimal::from(monthly_data.len())).round_dp(DISPLAY_DECIMAL_PRECISION)
    };
    let growth_rate = match (monthly_data.first(), monthly_data.last()) {
        (Some(first), Some(last)) if monthly_data.len() >= 2 => {
            percentage(last.amount - first.amount, first.amount)
        }
        _ => Decimal::ZERO,
    };

    Ok(IncomeTrendReport {
        period_start: starts.first().copied().unwrap_or(today),
        period_end: today,
        monthly_data,
        total_income,
        average_monthly_income,
        growth_rate,
    })
}

/// Monthly savings (income minus expenses) for the `months` months ending
/// with the month of `today`, with a running total.
pub fn savings_evolution_report(
    transactions: &[Transaction],
    today: NaiveDate,
    months: u32,
) -> Result<SavingsEvolutionReport> {
    validate_months(months)?;

    let starts = trailing_month_starts(today, months);
    let mut cumulative = Decimal::ZERO;
    let mut monthly_data = Vec::with_capacity(starts.len());
    for start in &starts {
        let totals = TransactionTotals::from_transactions(transactions.iter().filter(|t| {
            t.date.year() == start.year() && t.date.month() == start.month()
        }))?;
        let monthly_savings = totals.net()?;
        cumulative = checked_sum(cumulative, monthly_savings)?;
        monthly_data.push(SavingsEvolutionData {
            period: start.format("%Y-%m").to_string(),
            month: MONTH_LABELS[start.month0() as usize].to_string(),
            year: start.year(),
            savings_amount: cumulative,
            monthly_savings,
            savings_rate: percentage(monthly_savings, totals.income),
        });
    }

    let average_monthly_savings = if monthly_data.is_empty() {
        Decimal::ZERO
    } else {
        (cumulative / Decimal::from(monthly_data.len())).round_dp(DISPLAY_DECIMAL_PRECISION)
    };
    let savings_growth_rate = match (monthly_data.first(), monthly_data.last()) {
        (Some(first), Some(last)) if monthly_data.len() >= 2 => percentage(
            last.monthly_savings - first.monthly_savings,
            first.monthly_savings,
        ),
        _ => Decimal::ZERO,
    };

    Ok(SavingsEvolutionReport {
        period_start: starts.first().copied().unwrap_or(today),
        period_end: today,
        monthly_data,
        total_savings: cumulative,
        average_monthly_savings,
        savings_growth_rate,
    })
}
