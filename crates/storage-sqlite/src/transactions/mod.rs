//! SQLite storage implementation for transactions.

mod model;
mod repository;

pub use model::TransactionDB;
pub(crate) use repository::{insert_transaction, load_user_transactions};
pub use repository::TransactionRepository;
