//! Combining loaded tables into one.
//!
//! Both strategies are pure DataFrame transformations and keep the order in
//! which the files were discovered.

use std::collections::HashSet;

use polars::prelude::*;

use fusion_common::column_names;
use fusion_model::FusionMode;

use crate::error::CombineError;

/// Reduces `tables` to one table with the given strategy.
///
/// A single table is returned unchanged whatever the mode.
pub fn combine(tables: Vec<DataFrame>, mode: FusionMode) -> Result<DataFrame, CombineError> {
    tracing::info!(tables = tables.len(), %mode, "combining tables");
    match mode {
        FusionMode::Concat => concat_tables(tables),
        FusionMode::Merge => merge_tables(tables),
    }
}

/// Stacks rows of all tables.
///
/// Columns are unioned by name in order of first appearance; rows from a
/// table lacking a column get nulls there. A column whose type differs
/// between tables is widened to the common supertype.
pub fn concat_tables(tables: Vec<DataFrame>) -> Result<DataFrame, CombineError> {
    if tables.len() <= 1 {
        return tables.into_iter().next().ok_or(CombineError::NoTables);
    }

    let frames: Vec<LazyFrame> = tables.into_iter().map(IntoLazy::lazy).collect();
    let args = UnionArgs {
        to_supertypes: true,
        ..Default::default()
    };

    concat_lf_diagonal(frames, args)
        .and_then(LazyFrame::collect)
        .map_err(|e| CombineError::polars("concatenate", e))
}

/// Full-outer-joins the tables one after another.
///
/// Each join uses every column name the accumulated table shares with the
/// next table as the key. Unmatched rows on either side are kept with nulls,
/// and the joined rows are ordered by the key columns.
///
/// # Errors
///
/// [`CombineError::NoCommonColumns`] when a table shares no column name with
/// the tables merged before it.
pub fn merge_tables(tables: Vec<DataFrame>) -> Result<DataFrame, CombineError> {
    let mut tables = tables.into_iter();
    let mut merged = tables.next().ok_or(CombineError::NoTables)?;

    for (offset, table) in tables.enumerate() {
        merged = outer_join(merged, table, offset + 1)?;
    }

    Ok(merged)
}

fn outer_join(
    mut left: DataFrame,
    mut right: DataFrame,
    index: usize,
) -> Result<DataFrame, CombineError> {
    let left_names = column_names(&left);
    let right_names = column_names(&right);
    let right_set: HashSet<&str> = right_names.iter().map(String::as_str).collect();
    let keys: Vec<String> = left_names
        .iter()
        .filter(|name| right_set.contains(name.as_str()))
        .cloned()
        .collect();

    if keys.is_empty() {
        return Err(CombineError::NoCommonColumns {
            index,
            left: left_names,
            right: right_names,
        });
    }

    tracing::debug!(table = index, ?keys, "merging on common columns");

    for key in &keys {
        align_key_types(&mut left, &mut right, key)?;
    }

    let on: Vec<Expr> = keys.iter().map(|key| col(key.as_str())).collect();
    let args = JoinArgs {
        nulls_equal: true,
        ..JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns)
    };
    let order = SortMultipleOptions::default()
        .with_nulls_last(true)
        .with_maintain_order(true);

    left.lazy()
        .join(right.lazy(), on.clone(), on.clone(), args)
        .sort_by_exprs(on, order)
        .collect()
        .map_err(|e| CombineError::polars("merge", e))
}

/// Casts the `key` column of both tables to one type so they can be joined.
///
/// A column holding only missing values takes the other side's type; two
/// numeric columns meet at `Float64` if either is a float, `Int64` otherwise.
fn align_key_types(
    left: &mut DataFrame,
    right: &mut DataFrame,
    key: &str,
) -> Result<(), CombineError> {
    let left_column = left
        .column(key)
        .map_err(|e| CombineError::polars("merge", e))?;
    let right_column = right
        .column(key)
        .map_err(|e| CombineError::polars("merge", e))?;
    let (left_type, right_type) = (left_column.dtype().clone(), right_column.dtype().clone());
    if left_type == right_type {
        return Ok(());
    }

    let target = if is_all_null(right_column) {
        left_type.clone()
    } else if is_all_null(left_column) {
        right_type.clone()
    } else if left_type.is_primitive_numeric() && right_type.is_primitive_numeric() {
        if left_type.is_float() || right_type.is_float() {
            DataType::Float64
        } else {
            DataType::Int64
        }
    } else {
        return Err(CombineError::KeyTypeMismatch {
            column: key.to_string(),
            left: left_type.to_string(),
            right: right_type.to_string(),
        });
    };

    tracing::debug!(column = key, %left_type, %right_type, %target, "aligning key types");
    cast_column(left, key, &target)?;
    cast_column(right, key, &target)
}

fn is_all_null(column: &Column) -> bool {
    column.null_count() == column.len()
}

fn cast_column(df: &mut DataFrame, name: &str, dtype: &DataType) -> Result<(), CombineError> {
    let column = df
        .column(name)
        .and_then(|column| column.cast(dtype))
        .map_err(|e| CombineError::polars("merge", e))?;
    df.with_column(column)
        .map_err(|e| CombineError::polars("merge", e))?;
    Ok(())
}
