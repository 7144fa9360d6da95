// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row filtering.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;

use gapframe_core::{Column, DataType, Table, TableError, Value};

use crate::{CompareOp, Predicate};

/// Keeps the rows of `table` for which `predicate` holds, in their original order.
///
/// Every referenced field is checked before any row is read, so a bad predicate fails even on an
/// empty table.
pub fn filter(table: &Table, predicate: &Predicate) -> Result<Table, TableError> {
    let bound = bind(predicate, table)?;
    let rows: Vec<usize> = (0..table.row_count())
        .filter(|&row| bound.eval(row))
        .collect();
    tracing::debug!(
        input_rows = table.row_count(),
        output_rows = rows.len(),
        "filter"
    );
    table.take(&rows)
}

enum Bound<'t> {
    Compare {
        column: &'t Column,
        op: CompareOp,
        value: &'t Value,
    },
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
}

fn bind<'t>(predicate: &'t Predicate, table: &'t Table) -> Result<Bound<'t>, TableError> {
    Ok(match predicate {
        Predicate::Compare { field, op, value } => {
            let column = table.column(field)?;
            let compatible = match column.dtype() {
                DataType::Label => value.data_type() == DataType::Label,
                DataType::Int | DataType::Float => value.data_type().is_numeric(),
            };
            if !compatible {
                return Err(TableError::TypeMismatch {
                    field: field.clone(),
                    expected: column.dtype(),
                    found: value.data_type(),
                });
            }
            Bound::Compare {
                column,
                op: *op,
                value,
            }
        }
        Predicate::And(ps) => Bound::And(
            ps.iter()
                .map(|p| bind(p, table))
                .collect::<Result<_, _>>()?,
        ),
        Predicate::Or(ps) => Bound::Or(
            ps.iter()
                .map(|p| bind(p, table))
                .collect::<Result<_, _>>()?,
        ),
        Predicate::Not(p) => Bound::Not(Box::new(bind(p, table)?)),
    })
}

impl Bound<'_> {
    fn eval(&self, row: usize) -> bool {
        match self {
            Self::Compare { column, op, value } => {
                compare_cell(column, row, value).is_some_and(|ord| op.holds(ord))
            }
            Self::And(ps) => ps.iter().all(|p| p.eval(row)),
            Self::Or(ps) => ps.iter().any(|p| p.eval(row)),
            Self::Not(p) => !p.eval(row),
        }
    }
}

fn compare_cell(column: &Column, row: usize, value: &Value) -> Option<Ordering> {
    match (column, value) {
        (Column::Label(v), Value::Label(s)) => Some(v.get(row)?.as_str().cmp(s.as_str())),
        (Column::Int(v), Value::Int(x)) => Some(v.get(row)?.cmp(x)),
        (column, value) => column.f64(row)?.partial_cmp(&value.as_f64()?),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn countries() -> Table {
        Table::new(vec![
            ("country", Column::from(vec!["A", "B"])),
            ("year", Column::from(vec![1970_i64, 1980])),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_rows_after_year_threshold() {
        let out = filter(&countries(), &Predicate::gt("year", 1975_i64)).unwrap();
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.label(0, "country"), Ok("B"));
        assert_eq!(out.int(0, "year"), Ok(1980));
    }

    #[test]
    fn int_column_compares_with_float_literal() {
        let out = filter(&countries(), &Predicate::lt("year", 1975.5)).unwrap();
        assert_eq!(out.label(0, "country"), Ok("A"));
        assert_eq!(out.row_count(), 1);
    }

    #[test]
    fn compound_predicates() {
        let t = countries();
        let either = Predicate::equals("country", "A").or(Predicate::gt("year", 1975_i64));
        assert_eq!(filter(&t, &either).unwrap().row_count(), 2);

        let neither = either.negate();
        assert_eq!(filter(&t, &neither).unwrap().row_count(), 0);

        let both = Predicate::equals("country", "A").and(Predicate::gt("year", 1975_i64));
        assert!(filter(&t, &both).unwrap().is_empty());
    }

    #[test]
    fn nan_never_matches() {
        let t = Table::new(vec![("x", Column::from(vec![f64::NAN, 1.0]))]).unwrap();
        let out = filter(&t, &Predicate::gt("x", 0.0)).unwrap();
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.float(0, "x"), Ok(1.0));
    }

    #[test]
    fn schema_errors_surface_before_rows_are_read() {
        let empty = countries().take(&[]).unwrap();
        assert_eq!(
            filter(&empty, &Predicate::gt("gdp", 1.0)).unwrap_err(),
            TableError::UnknownField("gdp".into())
        );
        assert_eq!(
            filter(&empty, &Predicate::equals("year", "1970")).unwrap_err(),
            TableError::TypeMismatch {
                field: "year".into(),
                expected: DataType::Int,
                found: DataType::Label,
            }
        );
    }
}
