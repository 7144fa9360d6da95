// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column derivation and row slicing.

extern crate alloc;

use alloc::vec::Vec;

use gapframe_core::{Column, Table, TableError};

use crate::Expr;

/// Returns `table` with a float column `name` computed from `expr` for every row.
///
/// If `name` already exists, that column is replaced in place; otherwise it is appended.
pub fn mutate(table: &Table, name: &str, expr: &Expr) -> Result<Table, TableError> {
    let bound = expr.bind(table)?;
    let values: Vec<f64> = (0..table.row_count()).map(|row| bound.eval(row)).collect();
    table.with_column(name, Column::Float(values))
}

/// Returns the first `n` rows of `table` (all of them if it is shorter).
pub fn head(table: &Table, n: usize) -> Table {
    let rows: Vec<usize> = (0..n.min(table.row_count())).collect();
    // Every index is in range.
    table
        .take(&rows)
        .unwrap_or_else(|_| Table::empty(table.schema().clone()))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use gapframe_core::DataType;

    use super::*;

    fn table() -> Table {
        Table::new(vec![
            ("pop", Column::from(vec![2_i64, 4, 8])),
            ("gdpPercap", Column::from(vec![0.5, 0.25, 2.0])),
        ])
        .unwrap()
    }

    #[test]
    fn appends_total_gdp() {
        let t = table();
        let out = mutate(&t, "gdp", &(Expr::col("pop") * Expr::col("gdpPercap"))).unwrap();
        assert_eq!(out.schema().len(), 3);
        assert_eq!(out.float(2, "gdp"), Ok(16.0));
        // Input is untouched.
        assert_eq!(t.schema().len(), 2);
    }

    #[test]
    fn replaces_existing_column_as_float() {
        let out = mutate(&table(), "pop", &(Expr::col("pop") / Expr::lit(2.0))).unwrap();
        assert_eq!(out.schema().len(), 2);
        assert_eq!(out.schema().field("pop").unwrap().dtype, DataType::Float);
        assert_eq!(out.float(1, "pop"), Ok(2.0));
    }

    #[test]
    fn head_clamps_to_table_length() {
        let t = table();
        assert_eq!(head(&t, 2).row_count(), 2);
        assert_eq!(head(&t, 10).row_count(), 3);
        assert!(head(&t, 0).is_empty());
    }
}
