//! Helpers for columns whose domain type SQLite cannot hold natively.
//!
//! Money is stored as TEXT so that decimal values round-trip exactly.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::StorageError;

pub fn decimal_to_text(value: Decimal) -> String {
    value.normalize().to_string()
}

pub fn text_to_decimal(
    table: &'static str,
    column: &str,
    raw: &str,
) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw).map_err(|e| {
        StorageError::corrupt(table, format!("{} '{}' is not a decimal: {}", column, raw, e))
    })
}

/// Parses an enum column through its `FromStr`, reporting failures as a
/// corrupt row.
pub fn parse_column<T>(table: &'static str, raw: &str) -> Result<T, StorageError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(raw).map_err(|e| StorageError::corrupt(table, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_text_is_normalized() {
        assert_eq!(decimal_to_text(dec!(1500.00)), "1500");
        assert_eq!(decimal_to_text(dec!(0.50)), "0.5");
    }

    #[test]
    fn test_bad_decimal_is_a_corrupt_row() {
        let err = text_to_decimal("goals", "target_amount", "abc").unwrap_err();
        assert!(matches!(err, StorageError::CorruptRow { table: "goals", .. }));
    }
}
