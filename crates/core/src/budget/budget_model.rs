use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::ensure_record_amount;
use crate::errors::{Error, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Mensual,
    Quincenal,
    Semanal,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Mensual => "mensual",
            BudgetPeriod::Quincenal => "quincenal",
            BudgetPeriod::Semanal => "semanal",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mensual" => Ok(BudgetPeriod::Mensual),
            "quincenal" => Ok(BudgetPeriod::Quincenal),
            "semanal" => Ok(BudgetPeriod::Semanal),
            other => Err(ValidationError::field(
                "budget_period",
                format!("unknown budget period '{}'", other),
            )
            .into()),
        }
    }
}

/// A user's budget settings. Users who never configured one read as
/// [`BudgetConfig::unconfigured`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConfig {
    pub user_id: String,
    pub initial_budget: Decimal,
    pub budget_period: BudgetPeriod,
    pub budget_configured: bool,
    pub updated_at: Option<NaiveDateTime>,
}

impl BudgetConfig {
    pub fn unconfigured(user_id: &str) -> Self {
        BudgetConfig {
            user_id: user_id.to_string(),
            initial_budget: Decimal::ZERO,
            budget_period: BudgetPeriod::Mensual,
            budget_configured: false,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub initial_budget: Decimal,
    #[serde(default)]
    pub budget_period: BudgetPeriod,
}

impl BudgetUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.initial_budget <= Decimal::ZERO {
            return Err(
                ValidationError::field("initial_budget", "must be greater than 0").into(),
            );
        }
        ensure_record_amount("initial_budget", self.initial_budget)
    }
}
