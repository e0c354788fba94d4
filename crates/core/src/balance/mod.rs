//! Available-balance derivation over a user's transactions.

mod balance_calculator;

pub use balance_calculator::*;
