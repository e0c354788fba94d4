use chrono::NaiveDateTime;
use diesel::prelude::*;

use gastosmart_core::budget::BudgetConfig;

use crate::errors::StorageError;
use crate::utils::{decimal_to_text, parse_column, text_to_decimal};

const TABLE: &str = "user_budgets";

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::user_budgets)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct UserBudgetDB {
    pub user_id: String,
    pub initial_budget: String,
    pub budget_period: String,
    pub budget_configured: bool,
    pub updated_at: Option<NaiveDateTime>,
}

impl TryFrom<UserBudgetDB> for BudgetConfig {
    type Error = StorageError;

    fn try_from(db: UserBudgetDB) -> Result<Self, Self::Error> {
        Ok(BudgetConfig {
            initial_budget: text_to_decimal(TABLE, "initial_budget", &db.initial_budget)?,
            budget_period: parse_column(TABLE, &db.budget_period)?,
            user_id: db.user_id,
            budget_configured: db.budget_configured,
            updated_at: db.updated_at,
        })
    }
}

impl From<BudgetConfig> for UserBudgetDB {
    fn from(domain: BudgetConfig) -> Self {
        UserBudgetDB {
            user_id: domain.user_id,
            initial_budget: decimal_to_text(domain.initial_budget),
            budget_period: domain.budget_period.as_str().to_string(),
            budget_configured: domain.budget_configured,
            updated_at: domain.updated_at,
        }
    }
}
