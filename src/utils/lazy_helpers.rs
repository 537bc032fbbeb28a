//! LazyFrame materialization helpers with column validation
//!
//! Provides safe, explicit patterns for working with Polars frames so that a
//! missing play-by-play column surfaces as a readable error instead of a
//! silent null.

use polars::prelude::*;
use anyhow::{Context, Result, anyhow};
use std::collections::HashSet;

/// Check that every required column exists in the LazyFrame schema
///
/// # Arguments
/// * `lazy` - LazyFrame to inspect (only the schema is resolved)
/// * `columns` - Required column names
/// * `context` - Context for error messages (e.g., "season 2021")
///
/// # Errors
/// Returns an error naming every missing column.
pub fn require_columns(lazy: &LazyFrame, columns: &[&str], context: &str) -> Result<()> {
    let schema = lazy
        .clone()
        .collect_schema()
        .with_context(|| format!("{}: Failed to resolve schema", context))?;

    let missing: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|name| !schema.contains(name))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("{}: Missing required columns {:?}", context, missing))
    }
}

/// Materialize LazyFrame with explicit column list and validation
///
/// # Arguments
/// * `lazy` - LazyFrame to materialize
/// * `columns` - Required column names
/// * `context` - Context for error messages (e.g., "completed passes")
///
/// # Returns
/// DataFrame with exactly the specified columns
///
/// # Example
/// ```rust,ignore
/// let df = materialize_with_columns(
///     &passes_lazy,
///     &["week", "receiver", "air_yards"],
///     "completed passes",
/// )?;
/// ```
pub fn materialize_with_columns(
    lazy: &LazyFrame,
    columns: &[&str],
    context: &str,
) -> Result<DataFrame> {
    let col_exprs: Vec<Expr> = columns.iter()
        .map(|&name| col(name))
        .collect();

    let df = lazy
        .clone()
        .select(&col_exprs)
        .collect()
        .with_context(|| format!("{}: Failed to materialize columns {:?}", context, columns))?;

    // VALIDATE: Check all expected columns present
    let actual_cols: HashSet<String> = df.get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for &expected in columns {
        if !actual_cols.contains(expected) {
            return Err(anyhow!(
                "{}: Missing expected column '{}'. Available columns: {:?}",
                context, expected, actual_cols
            ));
        }
    }

    Ok(df)
}

/// First value of a numeric column as f64
///
/// Returns `None` for an empty frame, a null cell, or a non-finite value.
pub fn scalar_f64(df: &DataFrame, name: &str) -> Result<Option<f64>> {
    let column = df
        .column(name)
        .with_context(|| format!("Missing column '{}'", name))?
        .cast(&DataType::Float64)?;

    Ok(column.f64()?.get(0).filter(|v| v.is_finite()))
}

/// All values of a numeric column as f64
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Missing column '{}'", name))?
        .cast(&DataType::Float64)?;

    Ok(column.f64()?.into_iter().collect())
}

/// All values of an integer-like column as i64
pub fn i64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Missing column '{}'", name))?
        .cast(&DataType::Int64)?;

    Ok(column.i64()?.into_iter().collect())
}

/// All values of a string column
pub fn str_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Missing column '{}'", name))?
        .cast(&DataType::String)?;

    Ok(column
        .str()?
        .into_iter()
        .map(|opt| opt.map(|s| s.to_string()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_columns_reports_missing() {
        let df = df![
            "posteam" => &["NE"],
            "yards_gained" => &[4.0],
        ].unwrap();

        assert!(require_columns(&df.clone().lazy(), &["posteam"], "test").is_ok());

        let err = require_columns(&df.lazy(), &["posteam", "sack", "down"], "season 2021")
            .unwrap_err()
            .to_string();
        assert!(err.contains("season 2021"));
        assert!(err.contains("sack"));
        assert!(err.contains("down"));
    }

    #[test]
    fn test_materialize_with_columns_success() {
        let df = df![
            "passer" => &["T.Brady", "M.Jones"],
            "receiver" => &["R.Gronkowski", "J.Meyers"],
            "extra_col" => &["e1", "e2"],
        ].unwrap();

        let lazy = df.lazy();

        let materialized = materialize_with_columns(
            &lazy,
            &["passer", "receiver"],
            "test",
        ).unwrap();

        assert_eq!(materialized.width(), 2);
        assert_eq!(materialized.height(), 2);
    }

    #[test]
    fn test_materialize_with_columns_missing() {
        let df = df![
            "passer" => &["T.Brady"],
        ].unwrap();

        let result = materialize_with_columns(
            &df.lazy(),
            &["missing_column"],
            "test",
        );

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("missing_column") || err_msg.contains("not found"));
    }

    #[test]
    fn test_scalar_f64_empty_and_null() {
        let empty = df!["v" => Vec::<f64>::new()].unwrap();
        assert_eq!(scalar_f64(&empty, "v").unwrap(), None);

        let null = df!["v" => &[None::<f64>]].unwrap();
        assert_eq!(scalar_f64(&null, "v").unwrap(), None);

        let ints = df!["v" => &[7i32]].unwrap();
        assert_eq!(scalar_f64(&ints, "v").unwrap(), Some(7.0));
    }
}
