use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spanish weekday labels, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

/// Spanish short month labels, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// `YYYY-MM`
    pub month: String,
    pub year: i32,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    /// `balance / income * 100`, zero without income.
    pub savings_percentage: Decimal,
    pub transaction_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategoryData {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategoryReport {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_expenses: Decimal,
    pub categories: Vec<ExpenseCategoryData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyExpenseData {
    pub day: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyExpensesReport {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub daily_data: Vec<DailyExpenseData>,
    pub total_week_expenses: Decimal,
    pub average_daily_expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTrendData {
    pub period: String,
    pub month: String,
    pub year: i32,
    pub amount: Decimal,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTrendReport {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub monthly_data: Vec<IncomeTrendData>,
    pub total_income: Decimal,
    pub average_monthly_income: Decimal,
    /// Change from the first to the last month, in percent. Zero when the
    /// first month had no income.
    pub growth_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsEvolutionData {
    pub period: String,
    pub month: String,
    pub year: i32,
    /// Running total of `monthly_savings` up to and including this month.
    pub savings_amount: Decimal,
    /// Income minus expenses for the month. Goal contributions are not
    /// expenses and do not count here.
    pub monthly_savings: Decimal,
    pub savings_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsEvolutionReport {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub monthly_data: Vec<SavingsEvolutionData>,
    pub total_savings: Decimal,
    pub average_monthly_savings: Decimal,
    /// Change from the first to the last month, in percent. Zero unless the
    /// first month saved something.
    pub savings_growth_rate: Decimal,
}
