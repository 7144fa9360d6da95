// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform IR types.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use gapframe_core::{DataType, Table, TableError, Value};

use crate::Expr;

/// Identifies a table flowing through a [`Program`](crate::Program).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub u32);

/// Aggregation operation for [`Transform::Aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    /// Count rows. The field input is not evaluated; the output is an integer column.
    Count,
    /// Sum values.
    Sum,
    /// Minimum value.
    Min,
    /// Maximum value.
    Max,
    /// Arithmetic mean.
    Mean,
}

impl AggregateOp {
    /// Type of the column this op produces.
    pub fn output_type(self) -> DataType {
        match self {
            Self::Count => DataType::Int,
            _ => DataType::Float,
        }
    }

    /// Reduces a non-empty sequence of values to a cell of [`output_type`](Self::output_type).
    ///
    /// Groups are built from existing rows, so every reduction sees at least one value.
    pub fn reduce(self, values: impl Iterator<Item = f64>) -> Value {
        let mut n = 0_usize;
        let mut acc = match self {
            Self::Count | Self::Sum | Self::Mean => 0.0,
            Self::Min => f64::INFINITY,
            Self::Max => f64::NEG_INFINITY,
        };
        for v in values {
            n += 1;
            acc = match self {
                Self::Count => acc,
                Self::Sum | Self::Mean => acc + v,
                Self::Min => acc.min(v),
                Self::Max => acc.max(v),
            };
        }
        match self {
            Self::Count => Value::Int(i64::try_from(n).unwrap_or(i64::MAX)),
            Self::Mean => Value::Float(acc / n as f64),
            _ => Value::Float(acc),
        }
    }
}

/// A single aggregated output field.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateField {
    /// Operation to apply.
    pub op: AggregateOp,
    /// Per-row input, usually a single column.
    pub input: Expr,
    /// Output column name.
    pub output: String,
}

impl AggregateField {
    /// Create an aggregate field.
    pub fn new(op: AggregateOp, input: impl Into<Expr>, output: impl Into<String>) -> Self {
        Self {
            op,
            input: input.into(),
            output: output.into(),
        }
    }

    /// Mean of `input`, written to `output`.
    pub fn mean(input: impl Into<Expr>, output: impl Into<String>) -> Self {
        Self::new(AggregateOp::Mean, input, output)
    }

    /// Row count, written to `output`.
    pub fn count(output: impl Into<String>) -> Self {
        Self::new(AggregateOp::Count, Expr::Lit(1.0), output)
    }
}

/// Sorting order for a [`SortKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// One level of a multi-key sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Column to sort by.
    pub field: String,
    /// Sort order.
    pub order: SortOrder,
}

impl SortKey {
    /// Ascending key.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    /// Descending key.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// Comparison operators for predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==` (exact float equality)
    Eq,
    /// `!=` (exact float inequality)
    Ne,
}

impl CompareOp {
    /// Returns whether `lhs op rhs` holds given `lhs.cmp(rhs)`.
    pub fn holds(self, ord: Ordering) -> bool {
        match self {
            Self::Lt => ord == Ordering::Less,
            Self::Le => ord != Ordering::Greater,
            Self::Gt => ord == Ordering::Greater,
            Self::Ge => ord != Ordering::Less,
            Self::Eq => ord == Ordering::Equal,
            Self::Ne => ord != Ordering::Equal,
        }
    }
}

/// A row predicate used by [`Transform::Filter`].
///
/// Label fields compare with label literals, numeric fields with numeric literals. Rows whose
/// numeric value is NaN never match a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field op value`.
    Compare {
        /// Column to read.
        field: String,
        /// Comparison operator.
        op: CompareOp,
        /// Right-hand constant.
        value: Value,
    },
    /// All sub-predicates hold (true when empty).
    And(Vec<Self>),
    /// Any sub-predicate holds (false when empty).
    Or(Vec<Self>),
    /// The sub-predicate does not hold.
    Not(alloc::boxed::Box<Self>),
}

impl Predicate {
    /// `field op value`.
    pub fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Compare {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// `field == value`.
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    /// `field > value`.
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    /// `field < value`.
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    /// Conjunction of `self` and `other`, flattening nested `And`s.
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut all) => {
                all.push(other);
                Self::And(all)
            }
            first => Self::And(alloc::vec![first, other]),
        }
    }

    /// Disjunction of `self` and `other`, flattening nested `Or`s.
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut any) => {
                any.push(other);
                Self::Or(any)
            }
            first => Self::Or(alloc::vec![first, other]),
        }
    }

    /// Negation.
    pub fn negate(self) -> Self {
        Self::Not(alloc::boxed::Box::new(self))
    }

    /// Collects every field name this predicate reads.
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Compare { field, .. } => out.push(field),
            Self::And(ps) | Self::Or(ps) => ps.iter().for_each(|p| p.collect_fields(out)),
            Self::Not(p) => p.collect_fields(out),
        }
    }
}

/// A table transform from an input table to an output table.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Keep only rows that satisfy a predicate, preserving row order.
    Filter {
        /// Input table.
        input: TableId,
        /// Output table.
        output: TableId,
        /// Predicate to apply per row.
        predicate: Predicate,
    },
    /// Select a subset of columns.
    Project {
        /// Input table.
        input: TableId,
        /// Output table.
        output: TableId,
        /// Columns to include in the output table, in order.
        columns: Vec<String>,
    },
    /// Reorder rows by one or more key columns (stable).
    Sort {
        /// Input table.
        input: TableId,
        /// Output table.
        output: TableId,
        /// Sort keys, most significant first.
        by: Vec<SortKey>,
    },
    /// Append (or replace) a float column computed per row.
    Mutate {
        /// Input table.
        input: TableId,
        /// Output table.
        output: TableId,
        /// Output column name.
        name: String,
        /// Per-row expression.
        expr: Expr,
    },
    /// Group rows by one or more key columns and compute aggregates.
    ///
    /// Output columns are `group_by` (in order) followed by the `fields` outputs (in order).
    /// Output rows follow the first appearance of each key in the input.
    Aggregate {
        /// Input table.
        input: TableId,
        /// Output table.
        output: TableId,
        /// Group-by key columns.
        group_by: Vec<String>,
        /// Aggregated fields.
        fields: Vec<AggregateField>,
    },
    /// Distinct combinations of the given columns, in first-appearance order.
    Distinct {
        /// Input table.
        input: TableId,
        /// Output table.
        output: TableId,
        /// Key columns.
        columns: Vec<String>,
    },
    /// Keep the first `n` rows.
    Head {
        /// Input table.
        input: TableId,
        /// Output table.
        output: TableId,
        /// Maximum number of rows.
        n: usize,
    },
}

impl Transform {
    /// Returns the input table id.
    pub fn input(&self) -> TableId {
        match self {
            Self::Filter { input, .. }
            | Self::Project { input, .. }
            | Self::Sort { input, .. }
            | Self::Mutate { input, .. }
            | Self::Aggregate { input, .. }
            | Self::Distinct { input, .. }
            | Self::Head { input, .. } => *input,
        }
    }

    /// Returns the output table id.
    pub fn output(&self) -> TableId {
        match self {
            Self::Filter { output, .. }
            | Self::Project { output, .. }
            | Self::Sort { output, .. }
            | Self::Mutate { output, .. }
            | Self::Aggregate { output, .. }
            | Self::Distinct { output, .. }
            | Self::Head { output, .. } => *output,
        }
    }

    /// Applies this transform to `table`, returning a new table.
    pub fn apply(&self, table: &Table) -> Result<Table, TableError> {
        match self {
            Self::Filter { predicate, .. } => crate::filter(table, predicate),
            Self::Project { columns, .. } => table.select(columns),
            Self::Sort { by, .. } => crate::sort(table, by),
            Self::Mutate { name, expr, .. } => crate::mutate(table, name, expr),
            Self::Aggregate {
                group_by, fields, ..
            } => crate::aggregate(table, group_by, fields),
            Self::Distinct { columns, .. } => crate::distinct(table, columns),
            Self::Head { n, .. } => Ok(crate::head(table, *n)),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn reductions_over_small_sets() {
        let xs = [2.0, 4.0, 9.0];
        assert_eq!(AggregateOp::Count.reduce(xs.iter().copied()), Value::Int(3));
        assert_eq!(AggregateOp::Sum.reduce(xs.iter().copied()), Value::Float(15.0));
        assert_eq!(AggregateOp::Min.reduce(xs.iter().copied()), Value::Float(2.0));
        assert_eq!(AggregateOp::Max.reduce(xs.iter().copied()), Value::Float(9.0));
        assert_eq!(AggregateOp::Mean.reduce(xs.iter().copied()), Value::Float(5.0));
        assert_eq!(AggregateOp::Count.output_type(), DataType::Int);
        assert_eq!(AggregateOp::Mean.output_type(), DataType::Float);
    }

    #[test]
    fn compare_op_truth_table() {
        use Ordering::*;
        assert!(CompareOp::Le.holds(Equal));
        assert!(!CompareOp::Lt.holds(Equal));
        assert!(CompareOp::Ge.holds(Greater));
        assert!(CompareOp::Ne.holds(Less));
        assert!(!CompareOp::Eq.holds(Greater));
    }

    #[test]
    fn predicate_builders_flatten_and_list_fields() {
        let p = Predicate::gt("year", 1975_i64)
            .and(Predicate::equals("continent", "Asia"))
            .and(Predicate::lt("pop", 1.0e6).negate());
        let Predicate::And(parts) = &p else {
            panic!("expected a flat conjunction");
        };
        assert_eq!(parts.len(), 3);
        assert_eq!(p.fields(), alloc::vec!["year", "continent", "pop"]);
    }
}
