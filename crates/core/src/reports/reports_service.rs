use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::Result;
use crate::transactions::TransactionRepositoryTrait;
use crate::utils::Clock;

use super::reports_calculator::{
    expense_category_report, income_trend_report, monthly_summary, savings_evolution_report,
    weekly_expenses_report,
};
use super::reports_model::{
    ExpenseCategoryReport, IncomeTrendReport, MonthlySummary, SavingsEvolutionReport,
    WeeklyExpensesReport,
};

pub trait ReportServiceTrait: Send + Sync {
    fn monthly_summary(&self, user_id: &str, year: i32, month: u32) -> Result<MonthlySummary>;
    fn expense_category_report(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ExpenseCategoryReport>;
    fn weekly_expenses_report(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> Result<WeeklyExpensesReport>;
    fn income_trend_report(&self, user_id: &str, months: u32) -> Result<IncomeTrendReport>;
    fn savings_evolution_report(
        &self,
        user_id: &str,
        months: u32,
    ) -> Result<SavingsEvolutionReport>;
}

pub struct ReportService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl ReportService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        ReportService {
            transaction_repository,
            clock,
        }
    }
}

impl ReportServiceTrait for ReportService {
    fn monthly_summary(&self, user_id: &str, year: i32, month: u32) -> Result<MonthlySummary> {
        let transactions = self.transaction_repository.list_by_user(user_id)?;
        monthly_summary(&transactions, year, month)
    }

    fn expense_category_report(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ExpenseCategoryReport> {
        let transactions = self.transaction_repository.list_by_user(user_id)?;
        expense_category_report(&transactions, from, to)
    }

    fn weekly_expenses_report(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> Result<WeeklyExpensesReport> {
        let transactions = self.transaction_repository.list_by_user(user_id)?;
        Ok(weekly_expenses_report(&transactions, week_start))
    }

    fn income_trend_report(&self, user_id: &str, months: u32) -> Result<IncomeTrendReport> {
        let transactions = self.transaction_repository.list_by_user(user_id)?;
        income_trend_report(&transactions, self.clock.today(), months)
    }

    fn savings_evolution_report(
        &self,
        user_id: &str,
        months: u32,
    ) -> Result<SavingsEvolutionReport> {
        let transactions = self.transaction_repository.list_by_user(user_id)?;
        savings_evolution_report(&transactions, self.clock.today(), months)
    }
}
