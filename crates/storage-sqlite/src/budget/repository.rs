use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use gastosmart_core::budget::{BudgetConfig, BudgetRepositoryTrait};
use gastosmart_core::errors::Result;

use super::model::UserBudgetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::user_budgets;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

pub(crate) fn load_budget(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<BudgetConfig>> {
    let row = user_budgets::table
        .find(user_id)
        .select(UserBudgetDB::as_select())
        .first::<UserBudgetDB>(conn)
        .optional()
        .into_core()?;
    Ok(row.map(BudgetConfig::try_from).transpose()?)
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get(&self, user_id: &str) -> Result<Option<BudgetConfig>> {
        let mut conn = get_connection(&self.pool)?;
        load_budget(&mut conn, user_id)
    }

    async fn upsert(&self, config: BudgetConfig) -> Result<BudgetConfig> {
        let row: UserBudgetDB = config.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetConfig> {
                diesel::insert_into(user_budgets::table)
                    .values(&row)
                    .on_conflict(user_budgets::user_id)
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .into_core()?;
                load_budget(conn, &row.user_id)?.ok_or_else(|| {
                    gastosmart_core::Error::Unexpected(format!(
                        "budget for user {} vanished after upsert",
                        row.user_id
                    ))
                })
            })
            .await
    }
}
