/// Currency every amount is recorded in
pub const DEFAULT_CURRENCY: &str = "COP";

/// Decimal precision for display and report rounding
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Largest single contribution accepted (1.000.000.000 COP)
pub const MAX_CONTRIBUTION_AMOUNT: i64 = 1_000_000_000;

/// Ceiling for recorded transactions, goal targets and budgets
/// (1.000.000.000.000 COP). Keeps every per-user sum far from `Decimal::MAX`.
pub const MAX_RECORD_AMOUNT: i64 = 1_000_000_000_000;

/// Maximum description lengths
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_CONTRIBUTION_DESCRIPTION_LENGTH: usize = 200;

/// Goal name bounds (trimmed characters)
pub const MIN_GOAL_NAME_LENGTH: usize = 3;
pub const MAX_GOAL_NAME_LENGTH: usize = 100;

/// How far ahead a goal target date may be set
pub const MAX_TARGET_DATE_YEARS: i32 = 10;

/// Accepted range for transaction effective dates (inclusive years)
pub const MIN_TRANSACTION_YEAR: i32 = 2020;
pub const MAX_TRANSACTION_YEAR: i32 = 2030;

/// Bounds for monthly series requests
pub const DEFAULT_SERIES_MONTHS: u32 = 6;
pub const MAX_SERIES_MONTHS: u32 = 24;

/// Transaction listing page size
pub const DEFAULT_PAGE_LIMIT: i64 = 100;
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Default cut fraction for non-essential expenses in recommendations
pub const DEFAULT_MAX_CUT_FRACTION: &str = "0.5";

/// Months covered by the income trend report when none are requested
pub const DEFAULT_TREND_MONTHS: u32 = 8;
