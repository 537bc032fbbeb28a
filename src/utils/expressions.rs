//! Expression builders shared by every metric family
//!
//! Indicator columns arrive as 0/1 floats with nulls on non-plays; these
//! helpers cast them once and treat null as 0.

use polars::prelude::*;

/// Indicator column as f64 with nulls treated as 0
pub fn flag(name: &str) -> Expr {
    col(name).cast(DataType::Float64).fill_null(lit(0.0))
}

/// Numeric column as f64 (nulls preserved, so means skip them)
pub fn num(name: &str) -> Expr {
    col(name).cast(DataType::Float64)
}

/// `name == 1`
pub fn is_set(name: &str) -> Expr {
    flag(name).eq(lit(1.0))
}

/// `name == 0`
pub fn is_unset(name: &str) -> Expr {
    flag(name).eq(lit(0.0))
}

/// A thrown pass: `pass_attempt == 1` and not a sack
///
/// Scrambles and penalty plays can carry a passer name without being attempts.
pub fn pass_attempted() -> Expr {
    is_set("pass_attempt").and(is_unset("sack"))
}

/// Number of rows where `predicate` holds
pub fn count_where(predicate: Expr) -> Expr {
    predicate.cast(DataType::Float64).sum()
}

/// `numerator / denominator`, null when the denominator is not positive
pub fn ratio(numerator: Expr, denominator: Expr) -> Expr {
    when(denominator.clone().gt(lit(0.0)))
        .then(numerator.cast(DataType::Float64) / denominator.cast(DataType::Float64))
        .otherwise(lit(NULL).cast(DataType::Float64))
}
