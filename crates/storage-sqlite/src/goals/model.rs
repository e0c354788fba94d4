//! Database models for goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use gastosmart_core::goals::{compute_progress, Goal};

use crate::errors::StorageError;
use crate::utils::{decimal_to_text, parse_column, text_to_decimal};

const TABLE: &str = "goals";

/// Database model for goals. Progress is not stored; it is derived from the
/// two amounts whenever a row is read.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub target_amount: String,
    pub current_amount: String,
    pub target_date: Option<NaiveDate>,
    pub status: String,
    pub currency: String,
    pub is_public: bool,
    pub is_main: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<GoalDB> for Goal {
    type Error = StorageError;

    fn try_from(db: GoalDB) -> Result<Self, Self::Error> {
        let target_amount = text_to_decimal(TABLE, "target_amount", &db.target_amount)?;
        let current_amount = text_to_decimal(TABLE, "current_amount", &db.current_amount)?;
        Ok(Goal {
            category: parse_column(TABLE, &db.category)?,
            status: parse_column(TABLE, &db.status)?,
            progress_percentage: compute_progress(current_amount, target_amount),
            target_amount,
            current_amount,
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            description: db.description,
            target_date: db.target_date,
            currency: db.currency,
            is_public: db.is_public,
            is_main: db.is_main,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        GoalDB {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            description: domain.description,
            category: domain.category.label().to_string(),
            target_amount: decimal_to_text(domain.target_amount),
            current_amount: decimal_to_text(domain.current_amount),
            target_date: domain.target_date,
            status: domain.status.as_str().to_string(),
            currency: domain.currency,
            is_public: domain.is_public,
            is_main: domain.is_main,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
