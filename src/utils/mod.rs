//! Utility modules for play-by-play aggregation
//!
//! Contains shared functionality used across multiple metric families:
//! - LazyFrame helpers: Schema validation, safe materialization, value extraction
//! - Expressions: Indicator/number columns and guarded ratios
//! - Rounding: Count and rate display precision

pub mod lazy_helpers;
pub mod expressions;
pub mod rounding;

// Re-export commonly used helpers
pub use lazy_helpers::{
    require_columns, materialize_with_columns, scalar_f64, f64_values, i64_values, str_values,
};
pub use expressions::{flag, num, is_set, is_unset, pass_attempted, count_where, ratio};
pub use rounding::{round_count, round_rate};
