use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::constants::MAX_SERIES_MONTHS;
use crate::errors::{Result, ValidationError};
use crate::transactions::Transaction;
use crate::utils::time_utils::{days_in_month, trailing_month_starts};

use super::analytics_model::{DailyAmount, MonthlyAmount};

/// Sums `transactions` per (year, month) of their effective date.
pub fn monthly_totals<'a, I>(transactions: I) -> HashMap<(i32, u32), Decimal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = HashMap::new();
    for t in transactions {
        *totals
            .entry((t.date.year(), t.date.month()))
            .or_insert(Decimal::ZERO) += t.amount;
    }
    totals
}

/// `months` entries ending with the month of `today`, oldest first. Months
/// without activity are present with a zero amount.
pub fn build_monthly_series<'a, I>(
    transactions: I,
    today: NaiveDate,
    months: u32,
) -> Result<Vec<MonthlyAmount>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    if !(1..=MAX_SERIES_MONTHS).contains(&months) {
        return Err(ValidationError::field(
            "months",
            format!("must be between 1 and {}", MAX_SERIES_MONTHS),
        )
        .into());
    }
    let totals = monthly_totals(transactions);
    Ok(trailing_month_starts(today, months)
        .into_iter()
        .map(|start| {
            let key = (start.year(), start.month());
            MonthlyAmount {
                period: start.format("%Y-%m").to_string(),
                year: key.0,
                month: key.1,
                amount: totals.get(&key).copied().unwrap_or(Decimal::ZERO),
            }
        })
        .collect())
}

/// One entry per day of the given month, zero-filled.
pub fn build_daily_series<'a, I>(transactions: I, year: i32, month: u32) -> Result<Vec<DailyAmount>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let day_count = days_in_month(year, month)
        .ok_or_else(|| ValidationError::field("month", "must be between 1 and 12"))?;

    let mut per_day = vec![Decimal::ZERO; day_count as usize];
    for t in transactions {
        if t.date.year() == year && t.date.month() == month {
            per_day[t.date.day0() as usize] += t.amount;
        }
    }

    Ok(per_day
        .into_iter()
        .enumerate()
        .filter_map(|(idx, amount)| {
            let day = idx as u32 + 1;
            NaiveDate::from_ymd_opt(year, month, day).map(|date| DailyAmount { day, date, amount })
        })
        .collect())
}
